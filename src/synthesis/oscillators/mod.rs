//! Oscillator implementations for the drone ensemble.
//!
//! This module contains the `Oscillator` trait, the concrete sine and
//! triangle oscillators, and `DroneOscillator`, which picks between them by
//! `Waveform`.

mod sine;
mod traits;
mod triangle;
mod waveform;

pub use sine::SineOscillator;
pub use traits::Oscillator;
pub use triangle::TriangleOscillator;
pub use waveform::{DroneOscillator, Waveform};
