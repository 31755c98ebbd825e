//! Desktop runtime: a winit window presenting a `pixels` frame buffer.

use std::rc::Rc;
use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use tuggle_app_shell::{AppShell, DevOptions};
use tuggle_feedback::{AudioController, Feedback, Haptics, LogHaptics, SilentAudio};
use tuggle_foundation::{Clock, SystemClock};
use tuggle_platform_desktop_winit::DesktopWinitPlatform;
use tuggle_render_pixels::PixelsRenderer;
use tuggle_ui::Page;
use tuggle_ui_graphics::Size;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::launcher::AppSettings;
use crate::LaunchError;

/// Runs the carousel in a fixed-size window until it is closed.
pub fn run(settings: AppSettings, pages: Vec<Box<dyn Page>>) -> Result<(), LaunchError> {
    let event_loop = EventLoopBuilder::new()
        .build()
        .map_err(|err| LaunchError::EventLoop(err.to_string()))?;

    let window = Arc::new(
        WindowBuilder::new()
            .with_title(settings.window_title.clone())
            .with_inner_size(LogicalSize::new(
                settings.initial_width as f64,
                settings.initial_height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)
            .map_err(|err| LaunchError::Window(err.to_string()))?,
    );

    let size = window.inner_size();
    let scale_factor = window.scale_factor();
    let mut buffer_size = (size.width.max(1), size.height.max(1));
    let surface = SurfaceTexture::new(buffer_size.0, buffer_size.1, window.clone());
    let mut pixels = Pixels::new(buffer_size.0, buffer_size.1, surface)
        .map_err(|err| LaunchError::Surface(err.to_string()))?;

    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let mut platform = DesktopWinitPlatform::new(scale_factor);
    let feedback = Feedback::new(
        Haptics::new(Rc::new(LogHaptics)),
        AudioController::new(Box::new(SilentAudio::new(clock.clone()))),
    )
    .with_accelerometer(Box::new(platform.tilt()));

    let display = Size::new(
        (buffer_size.0 as f64 / scale_factor) as f32,
        (buffer_size.1 as f64 / scale_factor) as f32,
    );
    let shell_settings = settings.shell.with_display_size(display);
    let mut app = AppShell::new(
        PixelsRenderer::new(),
        shell_settings,
        pages,
        feedback,
        clock.clone(),
    );
    app.set_dev_options(DevOptions {
        fps_counter: settings.fps_counter,
    });
    if let Some(index) = settings.start_page {
        log::info!("starting on page {index}");
        app.scroll_to_page(index, false);
    }

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { window_id, event } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested => {
                            app.shutdown();
                            elwt.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            if new_size.width > 0 && new_size.height > 0 {
                                if let Err(err) =
                                    pixels.resize_surface(new_size.width, new_size.height)
                                {
                                    log::error!("surface resize failed: {err}");
                                }
                                if let Err(err) =
                                    pixels.resize_buffer(new_size.width, new_size.height)
                                {
                                    log::error!("buffer resize failed: {err}");
                                } else {
                                    buffer_size = (new_size.width, new_size.height);
                                }
                            }
                        }
                        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                            platform.set_scale_factor(scale_factor);
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            if let Some(event) = platform.cursor_moved(position, clock.now()) {
                                app.pointer_event(event);
                            }
                        }
                        WindowEvent::CursorLeft { .. } => {
                            if let Some(event) = platform.cursor_left(clock.now()) {
                                app.pointer_event(event);
                            }
                        }
                        WindowEvent::MouseInput { state, button, .. } => {
                            if let Some(event) = platform.mouse_input(state, button, clock.now())
                            {
                                app.pointer_event(event);
                            }
                        }
                        WindowEvent::Touch(touch) => {
                            app.pointer_event(platform.touch(&touch, clock.now()));
                        }
                        WindowEvent::Focused(false) => app.cancel_gesture(),
                        WindowEvent::KeyboardInput { event, .. } => {
                            if event.state != ElementState::Pressed {
                                return;
                            }
                            if let PhysicalKey::Code(code) = event.physical_key {
                                if code == KeyCode::Escape {
                                    app.shutdown();
                                    elwt.exit();
                                } else {
                                    platform.key_pressed(code);
                                }
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            app.tick();
                            if let Err(err) = app.render() {
                                log::error!("scene rebuild failed: {err}");
                                return;
                            }
                            app.renderer()
                                .draw(pixels.frame_mut(), buffer_size.0, buffer_size.1);
                            if let Err(err) = pixels.render() {
                                log::error!("present failed: {err}");
                                app.shutdown();
                                elwt.exit();
                            }
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => window.request_redraw(),
                _ => {}
            }
        })
        .map_err(|err| LaunchError::EventLoop(err.to_string()))
}
