//! Time management utilities
//!
//! Frame timing is expressed as [`Duration`]s read from a
//! [`Clock`](crate::platform::Clock), so the same code drives a real loop
//! and a simulated one.

use std::time::Duration;

/// Frame timer computing delta time from successive clock readings
#[derive(Debug, Clone, Default)]
pub struct Timer {
    last_frame: Option<Duration>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the timer (should be called once per frame)
    ///
    /// The first reading yields a zero delta.
    pub fn update(&mut self, now: Duration) -> f32 {
        let last = self.last_frame.unwrap_or(now);
        self.delta_time = now.saturating_sub(last).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = Some(now);
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since the first update
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Fixed-tick frame pacer
///
/// Each frame gets a deadline one tick after it started; the loop sleeps
/// for whatever is left of it.
#[derive(Debug, Clone)]
pub struct FramePacer {
    tick: Duration,
    next_deadline: Duration,
}

impl FramePacer {
    /// Create a pacer targeting one frame every `tick`
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            next_deadline: Duration::ZERO,
        }
    }

    /// Mark the start of a frame
    pub fn begin_frame(&mut self, now: Duration) {
        self.next_deadline = now + self.tick;
    }

    /// Time remaining until the current frame's deadline, zero once passed
    pub fn time_left(&self, now: Duration) -> Duration {
        self.next_deadline.saturating_sub(now)
    }

    /// Configured tick interval
    pub fn tick(&self) -> Duration {
        self.tick
    }
}

/// Counts frames and reports the rate once per second
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: Option<Duration>,
    frames: u32,
    last_fps: u32,
}

impl FpsCounter {
    /// Create a new counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame; returns the frame rate whenever a full second elapsed
    pub fn tick(&mut self, now: Duration) -> Option<u32> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        if now.saturating_sub(start) >= Duration::from_secs(1) {
            self.last_fps = self.frames;
            self.frames = 0;
            self.window_start = Some(now);
            Some(self.last_fps)
        } else {
            None
        }
    }

    /// Most recently reported frame rate
    pub fn last_fps(&self) -> u32 {
        self.last_fps
    }
}
