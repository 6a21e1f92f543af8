//! Pre-rendered, seamlessly looping noise buffer.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{BrownNoise, PinkNoise, WhiteNoise};
use crate::{AudioSignal, Signal};

/// Length of the crossfade folded over the loop seam, in seconds.
const SEAM_SECONDS: f64 = 0.01;

/// Spectral color of the noise bed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseColor {
    White,
    #[default]
    Pink,
    Brown,
}

/// A noise source that plays a fixed buffer forever.
///
/// The buffer is rendered once at graph construction, so the audio thread
/// only ever reads and wraps an index. The tail of an extra-long render is
/// crossfaded into the head so the loop point carries no discontinuity.
///
/// # Examples
///
/// ```
/// use zendrone::{NoiseColor, NoiseLoop, Signal};
///
/// let mut noise = NoiseLoop::<48000>::render(NoiseColor::Pink, 2.0, 7);
/// assert_eq!(noise.len(), 96000);
/// let _ = noise.next_sample();
/// ```
pub struct NoiseLoop<const SAMPLE_RATE: u32> {
    buffer: Vec<f64>,
    position: usize,
    color: NoiseColor,
}

impl<const SAMPLE_RATE: u32> NoiseLoop<SAMPLE_RATE> {
    /// Renders `seconds` of seeded noise of the given color.
    ///
    /// The loop is always at least one sample long.
    pub fn render(color: NoiseColor, seconds: f64, seed: u64) -> Self {
        let rate = SAMPLE_RATE as f64;
        let len = ((seconds * rate).round() as usize).max(1);
        let seam = ((SEAM_SECONDS * rate) as usize).min(len / 2);

        let rng = StdRng::seed_from_u64(seed);
        let mut raw = vec![0.0; len + seam];
        match color {
            NoiseColor::White => WhiteNoise::<SAMPLE_RATE, _>::with_rng(rng).process(&mut raw),
            NoiseColor::Pink => PinkNoise::<SAMPLE_RATE, _>::with_rng(rng).process(&mut raw),
            NoiseColor::Brown => BrownNoise::<SAMPLE_RATE, _>::with_rng(rng).process(&mut raw),
        }

        // Fold the overrun into the head: sample len-1 is followed in the
        // original render by raw[len], which now dominates raw[0].
        for i in 0..seam {
            let fade_in = i as f64 / seam as f64;
            raw[i] = raw[i] * fade_in + raw[len + i] * (1.0 - fade_in);
        }
        raw.truncate(len);

        Self {
            buffer: raw,
            position: 0,
            color,
        }
    }

    /// Number of samples in one loop.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always false; a loop holds at least one sample.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn color(&self) -> NoiseColor {
        self.color
    }
}

impl<const SAMPLE_RATE: u32> Signal for NoiseLoop<SAMPLE_RATE> {
    #[inline]
    fn next_sample(&mut self) -> f64 {
        let sample = self.buffer[self.position];
        self.position += 1;
        if self.position == self.buffer.len() {
            self.position = 0;
        }
        sample
    }
}

impl<const SAMPLE_RATE: u32> AudioSignal<SAMPLE_RATE> for NoiseLoop<SAMPLE_RATE> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_repeats_exactly() {
        let mut noise = NoiseLoop::<8000>::render(NoiseColor::White, 0.5, 11);
        let first: Vec<f64> = (0..noise.len()).map(|_| noise.next_sample()).collect();
        let second: Vec<f64> = (0..noise.len()).map(|_| noise.next_sample()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_seed_same_buffer() {
        let a = NoiseLoop::<8000>::render(NoiseColor::Brown, 0.25, 99);
        let b = NoiseLoop::<8000>::render(NoiseColor::Brown, 0.25, 99);
        assert_eq!(a.buffer, b.buffer);
    }

    #[test]
    fn test_seam_is_continuous_for_brown() {
        let noise = NoiseLoop::<8000>::render(NoiseColor::Brown, 1.0, 5);
        let last = noise.buffer[noise.len() - 1];
        let first = noise.buffer[0];
        // Brown noise moves by well under 0.15 per sample
        assert!((first - last).abs() < 0.15);
    }

    #[test]
    fn test_degenerate_length() {
        let mut noise = NoiseLoop::<8000>::render(NoiseColor::Pink, 0.0, 1);
        assert_eq!(noise.len(), 1);
        let a = noise.next_sample();
        assert_eq!(noise.next_sample(), a);
    }
}
