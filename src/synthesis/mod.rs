//! Audio synthesis components.
//!
//! This module provides the sound-making building blocks of the soundscape:
//! - Oscillators (sine, triangle) for the drone ensemble
//! - Noise generators (white, pink, brown) and the looping noise bed
//! - The biquad filter shared by both buses

pub mod filters;
pub mod noise;
pub mod oscillators;

pub use filters::{BiquadFilter, FilterType};
pub use noise::{BrownNoise, NoiseColor, NoiseLoop, PinkNoise, WhiteNoise};
pub use oscillators::{DroneOscillator, Oscillator, SineOscillator, TriangleOscillator, Waveform};
