//! Engine lifecycle states.

use std::fmt;

/// Externally visible lifecycle state of an `AmbientEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing built yet; the first `start` builds the graph
    Uninitialized,
    /// Graph built and silent
    Idle,
    /// Audibly playing, or fading in
    Active,
    /// Fading to silence
    Stopping,
    /// The host has no audio; every operation is a no-op
    Unsupported,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineState::Uninitialized => "uninitialized",
            EngineState::Idle => "idle",
            EngineState::Active => "active",
            EngineState::Stopping => "stopping",
            EngineState::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// Where a built graph is in its play/stop cycle. Fade end times are on the
/// context clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Phase {
    Idle,
    Active { fade_in_end: f64 },
    Stopping { fade_out_end: f64 },
}

impl Phase {
    /// Resolves time-driven transitions: a finished fade out is idle.
    pub(crate) fn at(self, now: f64) -> Phase {
        match self {
            Phase::Stopping { fade_out_end } if now >= fade_out_end => Phase::Idle,
            phase => phase,
        }
    }

    pub(crate) fn state(self) -> EngineState {
        match self {
            Phase::Idle => EngineState::Idle,
            Phase::Active { .. } => EngineState::Active,
            Phase::Stopping { .. } => EngineState::Stopping,
        }
    }

    /// Whether the breathing cycle may drive the master volume.
    pub(crate) fn follows_breathing(self, now: f64) -> bool {
        matches!(self, Phase::Active { fade_in_end } if now >= fade_in_end)
    }
}
