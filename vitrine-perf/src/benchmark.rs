//! Device self-test scoring.
//!
//! The settings surface can run a short self-test (frame count over one
//! second, JS heap in use, time to lay out a synthetic DOM burst) and show a
//! score out of 100. Scoring is weighted 40/30/30 across the three readings.
use serde::{Deserialize, Serialize};

/// Raw readings from one self-test run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BenchmarkReadings {
    pub fps: f64,
    pub memory_used_mb: f64,
    pub render_ms: f64,
}

/// Weighted score out of 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceScore {
    pub fps_points: u8,
    pub memory_points: u8,
    pub render_points: u8,
}

impl DeviceScore {
    #[must_use]
    pub fn from_readings(readings: &BenchmarkReadings) -> Self {
        Self {
            fps_points: fps_points(readings.fps),
            memory_points: memory_points(readings.memory_used_mb),
            render_points: render_points(readings.render_ms),
        }
    }

    #[must_use]
    pub const fn total(&self) -> u8 {
        self.fps_points + self.memory_points + self.render_points
    }
}

fn fps_points(fps: f64) -> u8 {
    match fps {
        f if f >= 55.0 => 40,
        f if f >= 30.0 => 30,
        f if f >= 15.0 => 20,
        _ => 10,
    }
}

// Unavailable heap readings arrive as 0 MB and score as a light page.
fn memory_points(used_mb: f64) -> u8 {
    match used_mb {
        m if m < 50.0 => 30,
        m if m < 100.0 => 25,
        m if m < 200.0 => 20,
        _ => 10,
    }
}

fn render_points(render_ms: f64) -> u8 {
    match render_ms {
        r if r < 5.0 => 30,
        r if r < 10.0 => 25,
        r if r < 20.0 => 20,
        _ => 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_device_scores_one_hundred() {
        let score = DeviceScore::from_readings(&BenchmarkReadings {
            fps: 60.0,
            memory_used_mb: 20.0,
            render_ms: 3.0,
        });
        assert_eq!(score.total(), 100);
    }

    #[test]
    fn bucket_edges() {
        assert_eq!(fps_points(55.0), 40);
        assert_eq!(fps_points(54.9), 30);
        assert_eq!(fps_points(15.0), 20);
        assert_eq!(fps_points(f64::NAN), 10);
        assert_eq!(memory_points(50.0), 25);
        assert_eq!(memory_points(250.0), 10);
        assert_eq!(render_points(10.0), 20);
        assert_eq!(render_points(42.0), 10);
    }

    #[test]
    fn struggling_device_scores_floor() {
        let score = DeviceScore::from_readings(&BenchmarkReadings {
            fps: 9.0,
            memory_used_mb: 400.0,
            render_ms: 80.0,
        });
        assert_eq!(score.total(), 30);
    }
}
