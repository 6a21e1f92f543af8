//! Core trait definitions for oscillators.

use crate::Pitched;

/// Oscillators are pitched signals with resettable phase.
pub trait Oscillator: Pitched {
    /// Resets the oscillator phase to zero.
    fn reset(&mut self);
}
