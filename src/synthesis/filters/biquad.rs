//! Biquad filter implementation.
//!
//! A second-order IIR section computed with the standard Direct Form I
//! difference equation. Coefficients follow Robert Bristow-Johnson's Audio EQ
//! Cookbook. Unlike a source-wrapping filter, this one is fed sample by sample
//! by the soundscape graph, because its input is the sum of two buses and its
//! cutoff is driven by automation rather than by another signal.

use serde::{Deserialize, Serialize};

/// The response of the filter stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Attenuates frequencies above the cutoff
    #[default]
    LowPass,
    /// Attenuates frequencies below the cutoff
    HighPass,
    /// Passes frequencies near the cutoff, attenuates others
    BandPass,
}

/// Normalized biquad coefficients (a0 divided out).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Coefficients {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

/// A biquad filter with an adjustable cutoff and resonance.
///
/// # Examples
///
/// ```
/// use zendrone::{BiquadFilter, FilterType};
///
/// let mut filter = BiquadFilter::<48000>::new(FilterType::LowPass, 400.0, 1.0);
/// let y = filter.tick(1.0);
/// assert!(y > 0.0 && y < 1.0);
/// ```
pub struct BiquadFilter<const SAMPLE_RATE: u32> {
    filter_type: FilterType,
    cutoff: f64,
    q: f64,
    coefficients: Coefficients,

    x1: f64, // Input at t-1
    x2: f64, // Input at t-2
    y1: f64, // Output at t-1
    y2: f64, // Output at t-2
}

impl<const SAMPLE_RATE: u32> BiquadFilter<SAMPLE_RATE> {
    /// Creates a filter of the given type.
    ///
    /// # Arguments
    ///
    /// * `filter_type` - Response shape
    /// * `cutoff` - Cutoff (or center) frequency in Hz
    /// * `q` - Resonance; 0.707 is maximally flat, 1.0 adds a gentle peak
    pub fn new(filter_type: FilterType, cutoff: f64, q: f64) -> Self {
        let mut filter = Self {
            filter_type,
            cutoff,
            q,
            coefficients: Coefficients::default(),
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        };
        filter.update_coefficients();
        filter
    }

    /// Creates a low-pass filter.
    pub fn lowpass(cutoff: f64, q: f64) -> Self {
        Self::new(FilterType::LowPass, cutoff, q)
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    /// The requested cutoff in Hz, before clamping to the usable band.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    /// Sets the cutoff frequency, recomputing coefficients only on change.
    #[inline]
    pub fn set_cutoff(&mut self, cutoff: f64) {
        if cutoff != self.cutoff {
            self.cutoff = cutoff;
            self.update_coefficients();
        }
    }

    /// Sets the resonance, recomputing coefficients only on change.
    pub fn set_q(&mut self, q: f64) {
        if q != self.q {
            self.q = q;
            self.update_coefficients();
        }
    }

    /// Filters one input sample.
    #[inline]
    pub fn tick(&mut self, x0: f64) -> f64 {
        let c = &self.coefficients;
        // y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
        let y0 = c.b0 * x0 + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x0;
        self.y2 = self.y1;
        self.y1 = y0;

        y0
    }

    /// Clears the delay line without touching the coefficients.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    fn update_coefficients(&mut self) {
        use std::f64::consts::PI;

        let sample_rate = SAMPLE_RATE as f64;
        // Non-finite cutoffs fall back to the bottom of the band
        let freq = if self.cutoff.is_finite() {
            self.cutoff.clamp(1.0, sample_rate * 0.49)
        } else {
            1.0
        };
        let q = if self.q.is_finite() {
            self.q.max(0.001)
        } else {
            0.001
        };

        let omega = 2.0 * PI * freq / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let (b0, b1, b2) = match self.filter_type {
            FilterType::LowPass => {
                let b1 = 1.0 - cos_omega;
                (b1 / 2.0, b1, b1 / 2.0)
            }
            FilterType::HighPass => {
                let b1 = -(1.0 + cos_omega);
                (-b1 / 2.0, b1, -b1 / 2.0)
            }
            // Constant 0 dB peak gain
            FilterType::BandPass => (alpha, 0.0, -alpha),
        };
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        self.coefficients = Coefficients {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Signal, SineOscillator};

    /// Peak output over `periods` cycles of a sine at `freq`, after settling.
    fn peak_response(filter: &mut BiquadFilter<44100>, freq: f64) -> f64 {
        let mut osc = SineOscillator::<44100>::new(freq);
        for _ in 0..4410 {
            filter.tick(osc.next_sample());
        }
        (0..4410)
            .map(|_| filter.tick(osc.next_sample()).abs())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_lowpass_attenuates_high_frequencies() {
        let mut filter = BiquadFilter::<44100>::lowpass(400.0, 1.0);
        let peak = peak_response(&mut filter, 8000.0);
        assert!(peak < 0.01, "Expected attenuation, got {}", peak);
    }

    #[test]
    fn test_lowpass_passes_drone_fundamental() {
        let mut filter = BiquadFilter::<44100>::lowpass(400.0, 1.0);
        let peak = peak_response(&mut filter, 136.1);
        assert!(peak > 0.9, "Expected pass-through, got {}", peak);
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let mut filter = BiquadFilter::<44100>::new(FilterType::HighPass, 100.0, 0.707);
        for _ in 0..2000 {
            filter.tick(1.0);
        }
        let sample = filter.tick(1.0);
        assert!(sample.abs() < 0.01, "Expected DC blocking, got {}", sample);
    }

    #[test]
    fn test_bandpass_attenuates_extremes() {
        let mut low = BiquadFilter::<44100>::new(FilterType::BandPass, 1000.0, 5.0);
        let mut high = BiquadFilter::<44100>::new(FilterType::BandPass, 1000.0, 5.0);
        assert!(peak_response(&mut low, 100.0) < 0.3);
        assert!(peak_response(&mut high, 10000.0) < 0.3);
    }

    #[test]
    fn test_set_cutoff_only_recomputes_on_change() {
        let mut filter = BiquadFilter::<44100>::lowpass(400.0, 1.0);
        let before = filter.coefficients;
        filter.set_cutoff(400.0);
        assert_eq!(filter.coefficients, before);
        filter.set_cutoff(525.0);
        assert_ne!(filter.coefficients, before);
        assert_eq!(filter.cutoff(), 525.0);
    }

    #[test]
    fn test_out_of_band_cutoff_is_clamped() {
        let mut filter = BiquadFilter::<44100>::lowpass(-75.0, 1.0);
        let mut osc = SineOscillator::<44100>::new(136.1);
        for _ in 0..1000 {
            assert!(filter.tick(osc.next_sample()).is_finite());
        }
        filter.set_cutoff(50000.0);
        filter.set_cutoff(f64::NAN);
        for _ in 0..1000 {
            assert!(filter.tick(osc.next_sample()).is_finite());
        }
        // The requested value is kept as-is
        assert!(filter.cutoff().is_nan());
    }

    #[test]
    fn test_zero_q_is_clamped() {
        let mut filter = BiquadFilter::<44100>::lowpass(400.0, 0.0);
        for _ in 0..10 {
            assert!(filter.tick(1.0).is_finite());
        }
    }

    #[test]
    fn test_reset_clears_history() {
        let mut filter = BiquadFilter::<44100>::lowpass(400.0, 1.0);
        for _ in 0..100 {
            filter.tick(1.0);
        }
        filter.reset();
        let fresh = BiquadFilter::<44100>::lowpass(400.0, 1.0).tick(0.5);
        assert_eq!(filter.tick(0.5), fresh);
    }
}
