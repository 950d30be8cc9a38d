use std::time::Duration;

use crate::geometry::Rect;

/// Start and end frames of an animated zoom change.
///
/// The controller applies the end state immediately; adapters that want the
/// animation draw `frame_at(elapsed)` until `is_finished`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransition {
    pub from: Rect,
    pub to: Rect,
    pub duration: Duration,
}

impl ZoomTransition {
    pub fn new(from: Rect, to: Rect, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Interpolated frame with ease-out cubic timing.
    pub fn frame_at(&self, elapsed: Duration) -> Rect {
        let t = self.progress(elapsed);
        let eased = 1.0 - (1.0 - t).powi(3);
        self.from.lerp(&self.to, eased)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}
