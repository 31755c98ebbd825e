//! FPS monitoring for performance tracking.
//!
//! Frames are recorded by the shell after each render. Stats are read
//! back for the dev overlay and the periodic debug log.

use std::collections::VecDeque;
use std::sync::RwLock;
use web_time::Instant;

/// Global FPS tracker singleton
static FPS_TRACKER: RwLock<Option<FpsTracker>> = RwLock::new(None);

/// Number of frames to average for FPS calculation
const FRAME_HISTORY_SIZE: usize = 60;

/// Tracks frame times to calculate FPS.
struct FpsTracker {
    frame_times: VecDeque<Instant>,
    last_fps: f32,
    frame_count: u64,
    /// Rolling average of frame duration in ms
    avg_frame_ms: f32,
    /// Slowest frame in the current history, in ms
    worst_frame_ms: f32,
}

impl FpsTracker {
    fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(FRAME_HISTORY_SIZE + 1),
            last_fps: 0.0,
            frame_count: 0,
            avg_frame_ms: 0.0,
            worst_frame_ms: 0.0,
        }
    }

    fn record_frame(&mut self, now: Instant) {
        self.frame_times.push_back(now);
        self.frame_count += 1;

        while self.frame_times.len() > FRAME_HISTORY_SIZE {
            self.frame_times.pop_front();
        }

        if let (Some(first), Some(last)) = (self.frame_times.front(), self.frame_times.back()) {
            let duration = last.duration_since(*first).as_secs_f32();
            let intervals = (self.frame_times.len() - 1) as f32;
            if duration > 0.0 {
                self.last_fps = intervals / duration;
                self.avg_frame_ms = duration * 1000.0 / intervals;
            }
        }

        self.worst_frame_ms = self
            .frame_times
            .iter()
            .zip(self.frame_times.iter().skip(1))
            .map(|(a, b)| b.duration_since(*a).as_secs_f32() * 1000.0)
            .fold(0.0, f32::max);
    }

    fn stats(&self) -> FpsStats {
        FpsStats {
            fps: self.last_fps,
            avg_ms: self.avg_frame_ms,
            worst_ms: self.worst_frame_ms,
            frame_count: self.frame_count,
        }
    }
}

/// Frame statistics snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct FpsStats {
    /// Current FPS (frames per second)
    pub fps: f32,
    /// Average frame time in milliseconds
    pub avg_ms: f32,
    /// Longest frame interval in the averaging window
    pub worst_ms: f32,
    /// Total frame count since start
    pub frame_count: u64,
}

/// Initialize the FPS tracker. Call once at app startup.
pub(crate) fn init_fps_tracker() {
    if let Ok(mut tracker) = FPS_TRACKER.write() {
        *tracker = Some(FpsTracker::new());
    }
}

/// Record a frame. Call once per frame in the render loop.
pub(crate) fn record_frame() {
    if let Ok(mut tracker) = FPS_TRACKER.write() {
        if let Some(ref mut t) = *tracker {
            t.record_frame(Instant::now());
        }
    }
}

/// Get current FPS.
pub fn current_fps() -> f32 {
    fps_stats().fps
}

/// Get detailed frame statistics.
pub fn fps_stats() -> FpsStats {
    if let Ok(tracker) = FPS_TRACKER.read() {
        if let Some(ref t) = *tracker {
            return t.stats();
        }
    }
    FpsStats::default()
}

/// Format FPS as a display string.
pub fn fps_display() -> String {
    let stats = fps_stats();
    format!("{:.0} FPS ({:.1}ms)", stats.fps, stats.avg_ms)
}

/// Format detailed stats as a display string.
pub fn fps_display_detailed() -> String {
    let stats = fps_stats();
    format!(
        "{:.0} FPS | {:.1}ms avg | {:.1}ms worst | {} frames",
        stats.fps, stats.avg_ms, stats.worst_ms, stats.frame_count
    )
}
