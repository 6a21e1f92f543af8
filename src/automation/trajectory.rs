//! Scheduled parameter trajectories.
//!
//! An `Automation` is what a control-side call leaves behind for the audio
//! thread: an anchor value at a start time plus the transition that follows
//! it. Both sides evaluate the very same value, so the control side can answer
//! "what is the master gain doing right now?" without touching the render
//! thread, and tests can assert on trajectories without an audio device.

use super::Curve;

/// After this many time constants an exponential approach is treated as
/// having arrived (e^-20 is below 3e-9).
const SETTLE_TIME_CONSTANTS: f64 = 20.0;

/// How a parameter moves away from its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Stay at the anchor value.
    Hold,
    /// Travel to `target`, arriving exactly at time `end`.
    Ramp { target: f64, end: f64, curve: Curve },
    /// Exponential approach toward `target` with the given time constant.
    Approach { target: f64, time_constant: f64 },
}

/// A parameter trajectory: anchor `(value, start)` followed by a transition.
///
/// Scheduling a new transition never queues behind the old one. The current
/// trajectory is evaluated at the scheduling time and that value becomes the
/// new anchor, so trajectories chain without jumps.
///
/// # Examples
///
/// ```
/// use zendrone::{Automation, Curve};
///
/// let silent = Automation::hold(0.0);
/// let fade_in = silent.ramp_to(0.5, 1.0, 2.0, Curve::Linear);
/// assert_eq!(fade_in.value_at(2.0), 0.25);
/// assert_eq!(fade_in.value_at(3.0), 0.5);
/// assert_eq!(fade_in.target(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Automation {
    anchor: f64,
    start: f64,
    transition: Transition,
}

impl Automation {
    /// A parameter resting at `value` since time zero.
    pub fn hold(value: f64) -> Self {
        Self {
            anchor: value,
            start: 0.0,
            transition: Transition::Hold,
        }
    }

    pub fn anchor(&self) -> f64 {
        self.anchor
    }

    /// Time in seconds at which the transition begins.
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    /// The value the trajectory settles at.
    pub fn target(&self) -> f64 {
        match self.transition {
            Transition::Hold => self.anchor,
            Transition::Ramp { target, .. } | Transition::Approach { target, .. } => target,
        }
    }

    /// Evaluates the trajectory at time `t` (seconds).
    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        match self.transition {
            Transition::Hold => self.anchor,
            Transition::Ramp { target, end, curve } => {
                if t >= end {
                    target
                } else {
                    curve.map(t, (self.start, end), (self.anchor, target))
                }
            }
            Transition::Approach {
                target,
                time_constant,
            } => {
                let elapsed = (t - self.start).max(0.0);
                if elapsed >= time_constant * SETTLE_TIME_CONSTANTS {
                    target
                } else {
                    target + (self.anchor - target) * (-elapsed / time_constant).exp()
                }
            }
        }
    }

    /// True once the value no longer changes after `t`.
    pub fn is_settled_at(&self, t: f64) -> bool {
        match self.transition {
            Transition::Hold => true,
            Transition::Ramp { end, .. } => t >= end,
            Transition::Approach { time_constant, .. } => {
                t - self.start >= time_constant * SETTLE_TIME_CONSTANTS
            }
        }
    }

    /// Jumps to `value` at time `at`.
    pub fn set_value_at(&self, value: f64, at: f64) -> Self {
        Self {
            anchor: value,
            start: at,
            transition: Transition::Hold,
        }
    }

    /// Ramps from wherever the trajectory is at `at` to `target` over
    /// `duration` seconds. A non-positive duration is an immediate set.
    pub fn ramp_to(&self, target: f64, at: f64, duration: f64, curve: Curve) -> Self {
        if duration.is_nan() || duration <= 0.0 {
            return self.set_value_at(target, at);
        }
        Self {
            anchor: self.value_at(at),
            start: at,
            transition: Transition::Ramp {
                target,
                end: at + duration,
                curve,
            },
        }
    }

    /// Approaches `target` exponentially from wherever the trajectory is at
    /// `at`. A non-positive time constant is an immediate set.
    pub fn approach(&self, target: f64, at: f64, time_constant: f64) -> Self {
        if time_constant.is_nan() || time_constant <= 0.0 {
            return self.set_value_at(target, at);
        }
        Self {
            anchor: self.value_at(at),
            start: at,
            transition: Transition::Approach {
                target,
                time_constant,
            },
        }
    }
}

impl Default for Automation {
    fn default() -> Self {
        Self::hold(0.0)
    }
}
