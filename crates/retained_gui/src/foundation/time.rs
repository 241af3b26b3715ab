//! Time management utilities

use std::time::{Duration, Instant};

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Fixed-rate frame pacer
///
/// Measures how long the work of one frame took and sleeps the remainder of
/// the target period. An overrun is not an error; the next frame simply
/// starts without sleeping.
#[derive(Debug)]
pub struct FramePacer {
    period: Duration,
    frame_start: Instant,
}

impl FramePacer {
    /// Create a pacer targeting `fps` frames per second
    ///
    /// Returns `None` when `fps` is zero.
    pub fn new(fps: u32) -> Option<Self> {
        if fps == 0 {
            return None;
        }
        Some(Self {
            period: Duration::from_nanos(NANOS_PER_SECOND / u64::from(fps)),
            frame_start: Instant::now(),
        })
    }

    /// Target duration of a single frame
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Mark the start of a frame's work
    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Time left in the current period after `work` has been spent
    pub fn remaining(&self, work: Duration) -> Option<Duration> {
        self.period.checked_sub(work).filter(|left| !left.is_zero())
    }

    /// Sleep for whatever is left of the current period
    ///
    /// Returns the duration slept, zero on overrun.
    pub fn sleep_remainder(&self) -> Duration {
        match self.remaining(self.frame_start.elapsed()) {
            Some(left) => {
                std::thread::sleep(left);
                left
            }
            None => Duration::ZERO,
        }
    }
}

/// High-precision timer for frame statistics
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub const fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the current frame count
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
