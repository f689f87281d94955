//! Pointer velocity estimation
//!
//! Keeps the samples of the trailing window and reports the average speed
//! across it. Good enough for fling detection; not a physics model.

use std::collections::VecDeque;
use std::time::Duration;

/// Samples older than this relative to the newest one are discarded
const WINDOW: Duration = Duration::from_millis(100);

/// Upper bound on retained samples
const MAX_SAMPLES: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(Duration, f32)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Record a position (along one axis) at a timestamp
    pub fn add(&mut self, time: Duration, position: f32) {
        if let Some(&(last, _)) = self.samples.back() {
            if time < last {
                // Out-of-order event stream; restart rather than guess
                self.samples.clear();
            }
        }
        self.samples.push_back((time, position));
        while self.samples.len() > MAX_SAMPLES {
            self.samples.pop_front();
        }
        while let Some(&(oldest, _)) = self.samples.front() {
            if time.saturating_sub(oldest) > WINDOW {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity in units per second, zero without enough data
    pub fn velocity(&self) -> f32 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.front(), self.samples.back())
        else {
            return 0.0;
        };
        let dt = t1.saturating_sub(t0).as_secs_f32();
        if dt <= 0.0 {
            return 0.0;
        }
        (p1 - p0) / dt
    }
}

/// Zero out magnitudes below `min` and clamp magnitudes above `max`
pub fn clamp_magnitude(value: f32, min: f32, max: f32) -> f32 {
    let magnitude = value.abs();
    if magnitude < min {
        0.0
    } else if magnitude > max {
        max.copysign(value)
    } else {
        value
    }
}
