use tuggle_ui_graphics::{Color, Point};

use crate::scene::{FrameTriangle, Scene};

#[derive(Clone, Copy, Debug, PartialEq)]
struct ClipBounds {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

fn clip_triangle_to_bounds(vertices: &[Point; 3], width: u32, height: u32) -> Option<ClipBounds> {
    let min_x = vertices.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).max(0.0);
    let min_y = vertices.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).max(0.0);
    let max_x = vertices
        .iter()
        .map(|p| p.x)
        .fold(f32::NEG_INFINITY, f32::max)
        .min(width as f32);
    let max_y = vertices
        .iter()
        .map(|p| p.y)
        .fold(f32::NEG_INFINITY, f32::max)
        .min(height as f32);

    if max_x <= min_x || max_y <= min_y {
        return None;
    }

    let bounds = ClipBounds {
        min_x: (min_x.floor() as i32).clamp(0, width as i32),
        min_y: (min_y.floor() as i32).clamp(0, height as i32),
        max_x: (max_x.ceil() as i32).clamp(0, width as i32),
        max_y: (max_y.ceil() as i32).clamp(0, height as i32),
    };
    if bounds.min_x >= bounds.max_x || bounds.min_y >= bounds.max_y {
        return None;
    }
    Some(bounds)
}

pub fn draw_scene(frame: &mut [u8], width: u32, height: u32, scene: &Scene) {
    let clear = scene.clear_color.with_alpha(1.0).to_rgba_u8();
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&clear);
    }
    for triangle in &scene.triangles {
        draw_triangle(frame, width, height, triangle);
    }
}

fn draw_triangle(frame: &mut [u8], width: u32, height: u32, triangle: &FrameTriangle) {
    let [a, b, c] = triangle
        .vertices
        .map(|p| Point::new(p.x * width as f32, p.y * height as f32));
    let Some(bounds) = clip_triangle_to_bounds(&[a, b, c], width, height) else {
        return;
    };
    let area = edge(a, b, c);
    if area.abs() <= f32::EPSILON {
        return;
    }
    let color = color_to_rgba(triangle.color);
    if color[3] <= 0.0 {
        return;
    }

    for py in bounds.min_y..bounds.max_y {
        for px in bounds.min_x..bounds.max_x {
            let p = Point::new(px as f32 + 0.5, py as f32 + 0.5);
            // Same-sign test works for either winding.
            let w0 = edge(b, c, p) / area;
            let w1 = edge(c, a, p) / area;
            let w2 = edge(a, b, p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }
            let idx = ((py as u32 * width + px as u32) * 4) as usize;
            if let Some(pixel) = frame.get_mut(idx..idx + 4) {
                blend(pixel, color);
            }
        }
    }
}

fn edge(a: Point, b: Point, p: Point) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

fn blend(existing: &mut [u8], color: [f32; 4]) {
    let alpha = color[3];
    for i in 0..3 {
        let dst = existing[i] as f32 / 255.0;
        let out = color[i] * alpha + dst * (1.0 - alpha);
        existing[i] = (out.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    let dst_a = existing[3] as f32 / 255.0;
    let out_a = alpha + dst_a * (1.0 - alpha);
    existing[3] = (out_a.clamp(0.0, 1.0) * 255.0).round() as u8;
}

fn color_to_rgba(color: Color) -> [f32; 4] {
    [
        color.0.clamp(0.0, 1.0),
        color.1.clamp(0.0, 1.0),
        color.2.clamp(0.0, 1.0),
        color.3.clamp(0.0, 1.0),
    ]
}

#[cfg(test)]
#[path = "tests/draw_tests.rs"]
mod tests;
