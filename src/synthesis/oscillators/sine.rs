//! Sine wave oscillator implementation.

use super::Oscillator;
use crate::{AudioSignal, Pitched, Signal};
use std::f64::consts::TAU;

/// A phase-continuous sine oscillator.
///
/// The pure tone used for the fundamental, sub-octave and octave drone
/// voices.
///
/// # Type Parameters
///
/// * `SAMPLE_RATE` - Sample rate in Hz (e.g., 44100 for CD quality)
pub struct SineOscillator<const SAMPLE_RATE: u32> {
    /// Current phase of the oscillator (0.0 to 1.0)
    phase: f64,
    /// Phase increment per sample (frequency / sample_rate)
    phase_increment: f64,
}

impl<const SAMPLE_RATE: u32> SineOscillator<SAMPLE_RATE> {
    /// Creates a new sine oscillator.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Frequency of the sine wave in Hz
    ///
    /// # Examples
    ///
    /// ```
    /// use zendrone::{Signal, SineOscillator};
    ///
    /// // The "Om" fundamental at 48 kHz
    /// let mut osc = SineOscillator::<48000>::new(136.1);
    /// let sample = osc.next_sample();
    /// assert_eq!(sample, 0.0);
    /// ```
    pub fn new(frequency: f64) -> Self {
        Self {
            phase: 0.0,
            phase_increment: frequency / SAMPLE_RATE as f64,
        }
    }
}

impl<const SAMPLE_RATE: u32> Signal for SineOscillator<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        let sample = (self.phase * TAU).sin();

        self.phase += self.phase_increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        sample
    }
}

impl<const SAMPLE_RATE: u32> AudioSignal<SAMPLE_RATE> for SineOscillator<SAMPLE_RATE> {}

impl<const SAMPLE_RATE: u32> Pitched for SineOscillator<SAMPLE_RATE> {
    fn frequency(&self) -> f64 {
        self.phase_increment * SAMPLE_RATE as f64
    }
}

impl<const SAMPLE_RATE: u32> Oscillator for SineOscillator<SAMPLE_RATE> {
    fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oscillator_creation() {
        let osc = SineOscillator::<48000>::new(136.1);
        assert!((osc.frequency() - 136.1).abs() < 1e-9);
    }

    #[test]
    fn test_sample_range() {
        let mut osc = SineOscillator::<48000>::new(68.05);
        for _ in 0..48000 {
            let sample = osc.next_sample();
            assert!((-1.0..=1.0).contains(&sample));
        }
    }

    #[test]
    fn test_quarter_period_peak() {
        // 1 kHz at 48 kHz: 48 samples per cycle, peak at sample 12
        let mut osc = SineOscillator::<48000>::new(1000.0);
        for _ in 0..12 {
            osc.next_sample();
        }
        assert!((osc.next_sample() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_phase_wrapping() {
        let mut osc = SineOscillator::<44100>::new(272.2);
        for _ in 0..100000 {
            osc.next_sample();
        }
        assert!(osc.phase >= 0.0 && osc.phase < 1.0);
    }

    #[test]
    fn test_reset() {
        let mut osc = SineOscillator::<44100>::new(136.1);
        for _ in 0..100 {
            osc.next_sample();
        }
        osc.reset();
        assert_eq!(osc.phase, 0.0);
    }
}
