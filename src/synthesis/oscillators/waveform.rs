//! Waveform selection for drone voices.

use serde::{Deserialize, Serialize};

use super::{Oscillator, SineOscillator, TriangleOscillator};
use crate::{AudioSignal, Pitched, Signal};

/// The shape of a drone voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    /// Pure tone
    #[default]
    Sine,
    /// Soft odd-harmonic tone
    Triangle,
}

/// An oscillator whose waveform is chosen at runtime.
///
/// Voices are described by configuration, so the concrete oscillator type is
/// only known once the graph is built. An enum keeps the ensemble in a plain
/// array without boxing.
///
/// # Examples
///
/// ```
/// use zendrone::{DroneOscillator, Pitched, Waveform};
///
/// let osc = DroneOscillator::<48000>::new(Waveform::Triangle, 204.15);
/// assert_eq!(osc.waveform(), Waveform::Triangle);
/// assert!((osc.frequency() - 204.15).abs() < 1e-9);
/// ```
pub enum DroneOscillator<const SAMPLE_RATE: u32> {
    Sine(SineOscillator<SAMPLE_RATE>),
    Triangle(TriangleOscillator<SAMPLE_RATE>),
}

impl<const SAMPLE_RATE: u32> DroneOscillator<SAMPLE_RATE> {
    /// Creates an oscillator of the given shape at `frequency` Hz.
    pub fn new(waveform: Waveform, frequency: f64) -> Self {
        match waveform {
            Waveform::Sine => Self::Sine(SineOscillator::new(frequency)),
            Waveform::Triangle => Self::Triangle(TriangleOscillator::new(frequency)),
        }
    }

    /// The shape this oscillator was built with.
    pub fn waveform(&self) -> Waveform {
        match self {
            Self::Sine(_) => Waveform::Sine,
            Self::Triangle(_) => Waveform::Triangle,
        }
    }
}

impl<const SAMPLE_RATE: u32> Signal for DroneOscillator<SAMPLE_RATE> {
    #[inline]
    fn next_sample(&mut self) -> f64 {
        match self {
            Self::Sine(osc) => osc.next_sample(),
            Self::Triangle(osc) => osc.next_sample(),
        }
    }
}

impl<const SAMPLE_RATE: u32> AudioSignal<SAMPLE_RATE> for DroneOscillator<SAMPLE_RATE> {}

impl<const SAMPLE_RATE: u32> Pitched for DroneOscillator<SAMPLE_RATE> {
    fn frequency(&self) -> f64 {
        match self {
            Self::Sine(osc) => osc.frequency(),
            Self::Triangle(osc) => osc.frequency(),
        }
    }
}

impl<const SAMPLE_RATE: u32> Oscillator for DroneOscillator<SAMPLE_RATE> {
    fn reset(&mut self) {
        match self {
            Self::Sine(osc) => osc.reset(),
            Self::Triangle(osc) => osc.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatches_to_matching_shape() {
        let mut sine = DroneOscillator::<48000>::new(Waveform::Sine, 1000.0);
        let mut triangle = DroneOscillator::<48000>::new(Waveform::Triangle, 1000.0);

        // Phase zero: sine starts at 0, triangle at its trough
        assert_eq!(sine.next_sample(), 0.0);
        assert_eq!(triangle.next_sample(), -1.0);
    }

    #[test]
    fn test_waveform_deserializes_snake_case() {
        let waveform: Waveform = serde_json::from_str("\"triangle\"").unwrap();
        assert_eq!(waveform, Waveform::Triangle);
    }

    #[test]
    fn test_reset_through_enum() {
        let mut osc = DroneOscillator::<44100>::new(Waveform::Sine, 136.1);
        for _ in 0..50 {
            osc.next_sample();
        }
        osc.reset();
        assert_eq!(osc.next_sample(), 0.0);
    }
}
