//! Settle animation: eased interpolation of openness toward a target
//!
//! The animation is sampled, not driven: the host calls the tracker once per
//! frame with the current timestamp and gets back the interpolated value.

use std::f32::consts::PI;
use std::time::Duration;

/// Quintic ease-out: fast start, gentle landing
pub fn ease_out_quint(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * t * t * t + 1.0
}

/// How long a settle should take for a slide of `delta` pixels
///
/// With release velocity the duration follows the time the pointer would
/// need to cover a distance that grows with the slide's share of the
/// container; without velocity it grows linearly with the share of the
/// drawer's own travel. Always capped at `max`.
pub fn settle_duration(
    delta: f32,
    velocity: f32,
    range: f32,
    extent: f32,
    base: Duration,
    max: Duration,
) -> Duration {
    if delta == 0.0 {
        return Duration::ZERO;
    }

    let speed = velocity.abs();
    let millis = if speed > 0.0 && extent > 0.0 {
        let half = extent / 2.0;
        let ratio = (delta.abs() / extent).min(1.0);
        let distance = half + half * ((ratio - 0.5) * 0.3 * PI / 2.0).sin();
        4.0 * (1000.0 * (distance / speed).abs()).round()
    } else {
        let share = if range > 0.0 { delta.abs() / range } else { 1.0 };
        (share + 1.0) * base.as_millis() as f32
    };

    Duration::from_millis(millis.max(0.0) as u64).min(max)
}

/// One in-flight settle from `from` to `to` (both openness values)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleAnimation {
    pub from: f32,
    pub to: f32,
    pub start: Duration,
    pub duration: Duration,
}

impl SettleAnimation {
    pub fn new(from: f32, to: f32, start: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// Value at `now`, and whether the animation has reached its target
    ///
    /// The final sample is exactly `to` so endpoint checks can compare
    /// with `==`.
    pub fn sample(&self, now: Duration) -> (f32, bool) {
        let elapsed = now.saturating_sub(self.start);
        if self.duration.is_zero() || elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let value = self.from + (self.to - self.from) * ease_out_quint(t);
        (value, false)
    }
}
