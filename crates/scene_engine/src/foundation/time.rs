//! Time management utilities

use std::time::Instant;

/// Frame clock that hands out `dt` once per tick
///
/// `dt` is clamped to `max_delta` so that a stalled frame (debugger, window
/// drag, slow terminal) does not teleport entities across the play area.
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    max_delta: f32,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer with a 100 ms delta clamp
    pub fn new() -> Self {
        Self::with_max_delta(0.1)
    }

    /// Create a new timer with a custom delta clamp in seconds
    pub fn with_max_delta(max_delta: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            max_delta,
        }
    }

    /// Update the timer (should be called once per frame) and return `dt`
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.advance(elapsed);
        self.last_frame = now;
        self.delta_time
    }

    /// Advance by an explicit amount of seconds (fixed-step drivers, tests)
    pub fn advance(&mut self, seconds: f32) {
        self.delta_time = seconds.clamp(0.0, self.max_delta);
        self.total_time += self.delta_time;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
