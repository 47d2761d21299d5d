//! Frame-driven tweening: springs for motion, eased halves for the flip, a pulse for taps.

use std::f32::consts::PI;

use crate::card::CardTransform;

/// `ln(1000)`: the spring envelope has decayed to 0.1 % when the duration elapses.
const SPRING_SETTLE_LOG: f32 = 6.907_755;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Linear,
    EaseIn,
    EaseOut,
    /// Underdamped step response. `initial_velocity` is in total distances per second.
    Spring {
        damping_ratio: f32,
        initial_velocity: f32,
    },
}

impl Curve {
    /// Maps normalized time `s` in `0..=1` to progress; springs may overshoot 1.
    pub fn progress(&self, s: f32, duration: f32) -> f32 {
        if s <= 0.0 {
            return 0.0;
        }
        if s >= 1.0 {
            return 1.0;
        }
        match *self {
            Curve::Linear => s,
            Curve::EaseIn => s * s * s,
            Curve::EaseOut => 1.0 - (1.0 - s).powi(3),
            Curve::Spring {
                damping_ratio,
                initial_velocity,
            } => spring_step(s, duration, damping_ratio, initial_velocity),
        }
    }
}

fn spring_step(s: f32, duration: f32, damping_ratio: f32, initial_velocity: f32) -> f32 {
    let zeta = damping_ratio.clamp(0.05, 0.999);
    // Natural and damped frequencies in units of the whole duration.
    let omega = SPRING_SETTLE_LOG / zeta;
    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
    let v0 = initial_velocity * duration;
    let envelope = (-zeta * omega * s).exp();
    1.0 - envelope
        * ((omega_d * s).cos() + (zeta * omega - v0) / omega_d * (omega_d * s).sin())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    from: CardTransform,
    to: CardTransform,
    delay: f32,
    duration: f32,
    elapsed: f32,
    curve: Curve,
}

impl Animation {
    pub fn new(from: CardTransform, to: CardTransform, duration: f32, curve: Curve) -> Self {
        Self {
            from,
            to,
            delay: 0.0,
            duration: duration.max(f32::EPSILON),
            elapsed: 0.0,
            curve,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }

    /// Advances the clock; returns true once the animation has reached its end.
    pub fn advance(&mut self, dt: f32) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.is_finished()
    }

    /// Current interpolated transform. Holds `from` during the delay, lands exactly on `to`.
    pub fn sample(&self) -> CardTransform {
        if self.is_finished() {
            return self.to;
        }
        let running = self.elapsed - self.delay;
        if running <= 0.0 {
            return self.from;
        }
        let t = self.curve.progress(running / self.duration, self.duration);
        self.from.interpolate(&self.to, t)
    }
}

/// Scale oscillation played as tap feedback; it never touches the stored transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    peak: f32,
    duration: f32,
    elapsed: f32,
}

impl Pulse {
    pub fn new(peak: f32, duration: f32) -> Self {
        Self {
            peak,
            duration: duration.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.elapsed >= self.duration
    }

    /// Multiplier applied on top of the card scale: 1.0 at both ends, decaying swings between.
    pub fn scale_factor(&self) -> f32 {
        let s = (self.elapsed / self.duration).clamp(0.0, 1.0);
        1.0 + (self.peak - 1.0) * (1.0 - s) * (3.0 * PI * s).sin()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
