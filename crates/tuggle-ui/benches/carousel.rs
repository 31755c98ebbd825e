use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tuggle_feedback::{AudioController, Feedback, Haptics, NoopHaptics, SilentAudio};
use tuggle_foundation::{GesturePhase, GestureSnapshot, ManualClock};
use tuggle_ui::prelude::*;
use tuggle_ui::{Carousel, CarouselConfig};

struct Dots {
    core: PageCore,
}

impl Page for Dots {
    fn core(&self) -> &PageCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PageCore {
        &mut self.core
    }

    fn build_content(&mut self, _ctx: &mut PageContext<'_>) {
        let size = self.core.page_size();
        for i in 0..64 {
            let x = (i % 8) as f32 * size.width / 8.0 + 20.0;
            let y = (i / 8) as f32 * size.height / 8.0 + 20.0;
            self.core.root.add_child(
                SceneNode::polygon(Polygon::circle(12.0, 32)).with_position(Point::new(x, y)),
            );
        }
    }

    fn activate_inputs(&mut self) {}

    fn deactivate_inputs(&mut self) {}
}

fn carousel_drag_frame(c: &mut Criterion) {
    let clock = ManualClock::new();
    let mut feedback = Feedback::new(
        Haptics::new(Rc::new(NoopHaptics)),
        AudioController::new(Box::new(SilentAudio::new(Rc::new(clock)))),
    );
    let size = Size::new(768.0, 1024.0);
    let pages: Vec<Box<dyn Page>> = (0..8)
        .map(|_| Box::new(Dots { core: PageCore::new("dots") }) as Box<dyn Page>)
        .collect();
    let idle = GestureSnapshot::default();
    let mut ctx = PageContext::new(&idle, &mut feedback, 1.0, size.height);
    let mut carousel = Carousel::new(CarouselConfig::default(), size, pages, &mut ctx);

    let mut x = 700.0f32;
    c.bench_function("carousel_drag_update_and_flatten", |b| {
        b.iter(|| {
            x = if x < 100.0 { 700.0 } else { x - 7.0 };
            let input = GestureSnapshot {
                position: Point::new(x, 500.0),
                start_position: Point::new(700.0, 500.0),
                phase: GesturePhase::Dragging,
                drag_started: x == 693.0,
                ..GestureSnapshot::default()
            };
            let mut ctx = PageContext::new(&input, &mut feedback, 1.0, size.height);
            carousel.update(1.0 / 60.0, &mut ctx);
            black_box(carousel.display_list(Color::BLACK).triangle_count())
        })
    });
}

criterion_group!(benches, carousel_drag_frame);
criterion_main!(benches);
