//! Frame-duration sampling windows
use serde::{Deserialize, Serialize};

use crate::constants::MS_PER_SECOND;
use crate::numbers::u32_to_f64;

/// Summary of one completed sampling window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSample {
    pub frames: u32,
    pub average_frame_ms: f64,
    pub fps: f64,
}

/// Accumulates frame durations and closes a window every `window` samples.
///
/// Each window is averaged on its own and then cleared, so one slow window
/// can trigger at most one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSampler {
    window: u32,
    count: u32,
    total_ms: f64,
    windows_completed: u64,
    last_timestamp_ms: Option<f64>,
}

impl FrameSampler {
    #[must_use]
    pub fn new(window: u32) -> Self {
        Self {
            window: window.max(1),
            count: 0,
            total_ms: 0.0,
            windows_completed: 0,
            last_timestamp_ms: None,
        }
    }

    #[must_use]
    pub const fn window(&self) -> u32 {
        self.window
    }

    /// Samples collected toward the current window.
    #[must_use]
    pub const fn pending(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub const fn windows_completed(&self) -> u64 {
        self.windows_completed
    }

    /// Record one frame duration. Non-finite or negative durations are dropped.
    pub fn record(&mut self, frame_ms: f64) -> Option<WindowSample> {
        if !frame_ms.is_finite() || frame_ms < 0.0 {
            return None;
        }
        self.count += 1;
        self.total_ms += frame_ms;
        if self.count < self.window {
            return None;
        }

        let average_frame_ms = self.total_ms / u32_to_f64(self.count);
        let fps = if average_frame_ms > 0.0 {
            MS_PER_SECOND / average_frame_ms
        } else {
            f64::INFINITY
        };
        let sample = WindowSample {
            frames: self.count,
            average_frame_ms,
            fps,
        };
        self.count = 0;
        self.total_ms = 0.0;
        self.windows_completed += 1;
        Some(sample)
    }

    /// Record an animation-frame timestamp; the first one only primes the clock.
    pub fn record_timestamp(&mut self, now_ms: f64) -> Option<WindowSample> {
        if !now_ms.is_finite() {
            return None;
        }
        let previous = self.last_timestamp_ms.replace(now_ms)?;
        self.record(now_ms - previous)
    }

    /// Drop the timestamp clock but keep pending samples.
    ///
    /// The next timestamp only primes the clock, so a gap in which no frames
    /// were rendered never turns into one long frame.
    pub fn reset_clock(&mut self) {
        self.last_timestamp_ms = None;
    }

    /// Forget every pending sample and the timestamp clock.
    pub fn clear(&mut self) {
        *self = Self::new(self.window);
    }
}
