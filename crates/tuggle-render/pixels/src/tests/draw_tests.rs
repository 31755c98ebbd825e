use super::*;

use tuggle_render_common::Renderer;
use tuggle_ui::{Affine, DisplayList, Polygon, SceneNode};
use tuggle_ui_graphics::Size;

use crate::{PixelsRenderer, PixelsRendererError};

fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let idx = ((y * width + x) * 4) as usize;
    [frame[idx], frame[idx + 1], frame[idx + 2], frame[idx + 3]]
}

fn render(list: &DisplayList, width: u32, height: u32) -> Vec<u8> {
    let mut renderer = PixelsRenderer::new();
    renderer.rebuild_scene(list).expect("non-empty viewport");
    let mut frame = vec![0u8; (width * height * 4) as usize];
    renderer.draw(&mut frame, width, height);
    frame
}

#[test]
fn clears_to_background() {
    let list = DisplayList::new(Color::from_rgb_u8(40, 40, 40), Size::new(10.0, 10.0));
    let frame = render(&list, 10, 10);
    assert_eq!(pixel(&frame, 10, 5, 5), [40, 40, 40, 255]);
}

#[test]
fn scene_y_up_maps_to_frame_y_down() {
    let mut list = DisplayList::new(Color::BLACK, Size::new(100.0, 100.0));
    let quad = SceneNode::polygon(Polygon::rect(100.0, 50.0))
        .with_anchor(Point::ZERO)
        .with_color(Color::RED);
    list.push_node(&quad, Affine::IDENTITY);

    let frame = render(&list, 100, 100);
    assert_eq!(pixel(&frame, 100, 50, 90), [255, 0, 0, 255], "bottom half filled");
    assert_eq!(pixel(&frame, 100, 50, 10), [0, 0, 0, 255], "top half clear");
}

#[test]
fn viewport_scales_to_frame_size() {
    let mut list = DisplayList::new(Color::BLACK, Size::new(1000.0, 1000.0));
    let quad = SceneNode::polygon(Polygon::rect(500.0, 1000.0))
        .with_anchor(Point::ZERO)
        .with_color(Color::GREEN);
    list.push_node(&quad, Affine::IDENTITY);

    let frame = render(&list, 20, 20);
    assert_eq!(pixel(&frame, 20, 4, 10), [0, 255, 0, 255]);
    assert_eq!(pixel(&frame, 20, 15, 10), [0, 0, 0, 255]);
}

#[test]
fn translucent_fill_blends_over_background() {
    let mut list = DisplayList::new(Color::BLACK, Size::new(10.0, 10.0));
    let quad = SceneNode::polygon(Polygon::rect(10.0, 10.0))
        .with_anchor(Point::ZERO)
        .with_color(Color::WHITE.with_alpha(0.5));
    list.push_node(&quad, Affine::IDENTITY);

    let frame = render(&list, 10, 10);
    let [r, g, b, a] = pixel(&frame, 10, 3, 3);
    assert!((127..=128).contains(&r) && r == g && g == b);
    assert_eq!(a, 255);
}

#[test]
fn offscreen_geometry_is_clipped() {
    let mut list = DisplayList::new(Color::BLACK, Size::new(10.0, 10.0));
    let quad = SceneNode::polygon(Polygon::rect(10.0, 10.0))
        .with_anchor(Point::ZERO)
        .with_position(Point::new(-20.0, 0.0))
        .with_color(Color::WHITE);
    list.push_node(&quad, Affine::IDENTITY);

    let frame = render(&list, 10, 10);
    assert!(frame.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn empty_viewport_is_rejected() {
    let list = DisplayList::new(Color::BLACK, Size::ZERO);
    let mut renderer = PixelsRenderer::new();
    assert!(matches!(
        renderer.rebuild_scene(&list),
        Err(PixelsRendererError::EmptyViewport(_))
    ));
}
