//! Shared helpers for the demos.

use std::f64::consts::PI;

/// A 4-7-8 breathing cycle: inhale 4 s, hold 7 s, exhale 8 s.
pub struct BreathingPattern {
    pub inhale: f64,
    pub hold: f64,
    pub exhale: f64,
    /// Scale at the bottom of the breath
    pub rest: f64,
    /// Scale at the top of the breath
    pub full: f64,
}

impl Default for BreathingPattern {
    fn default() -> Self {
        Self {
            inhale: 4.0,
            hold: 7.0,
            exhale: 8.0,
            rest: 0.8,
            full: 1.5,
        }
    }
}

impl BreathingPattern {
    pub fn cycle_seconds(&self) -> f64 {
        self.inhale + self.hold + self.exhale
    }

    /// Breathing scale `seconds` into the session, eased with a half cosine.
    pub fn scale_at(&self, seconds: f64) -> f64 {
        let t = seconds.rem_euclid(self.cycle_seconds());
        let depth = if t < self.inhale {
            0.5 - 0.5 * (PI * t / self.inhale).cos()
        } else if t < self.inhale + self.hold {
            1.0
        } else {
            let t = t - self.inhale - self.hold;
            0.5 + 0.5 * (PI * t / self.exhale).cos()
        };
        self.rest + depth * (self.full - self.rest)
    }
}
