//! Pink noise generator implementation.

use crate::{AudioSignal, Signal};
use rand::Rng;

/// Number of Voss-McCartney rows.
const ROWS: usize = 16;

/// A pink noise generator.
///
/// Pink noise (1/f noise) carries equal power per octave, which reads as a
/// soft "rain" or "surf" bed under the drones rather than the hiss of white
/// noise. This implementation uses the Voss-McCartney algorithm: row `k` is
/// re-rolled every `2^k` samples and the output is the mean of all rows.
pub struct PinkNoise<const SAMPLE_RATE: u32, R: Rng = rand::rngs::ThreadRng> {
    rng: R,
    /// Current value of each row
    generators: [f64; ROWS],
    /// Sample counter; its trailing zeros pick the rows to update
    counter: u32,
}

impl<const SAMPLE_RATE: u32> Default for PinkNoise<SAMPLE_RATE, rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SAMPLE_RATE: u32> PinkNoise<SAMPLE_RATE, rand::rngs::ThreadRng> {
    /// Creates a pink noise generator backed by the thread-local RNG.
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> PinkNoise<SAMPLE_RATE, R> {
    /// Creates a pink noise generator with a custom RNG.
    ///
    /// ```
    /// use zendrone::{PinkNoise, Signal};
    /// use rand::SeedableRng;
    ///
    /// let rng = rand::rngs::StdRng::seed_from_u64(42);
    /// let mut noise = PinkNoise::<48000, _>::with_rng(rng);
    /// assert!(noise.next_sample().abs() <= 1.0);
    /// ```
    pub fn with_rng(mut rng: R) -> Self {
        let generators = [0.0; ROWS].map(|_| rng.gen_range(-1.0..=1.0));

        Self {
            rng,
            generators,
            counter: 0,
        }
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> Signal for PinkNoise<SAMPLE_RATE, R> {
    fn next_sample(&mut self) -> f64 {
        let mut bit = 1;
        for row in self.generators.iter_mut() {
            if self.counter & bit != 0 {
                break;
            }
            *row = self.rng.gen_range(-1.0..=1.0);
            bit <<= 1;
        }

        self.counter = self.counter.wrapping_add(1);

        self.generators.iter().sum::<f64>() / ROWS as f64
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> AudioSignal<SAMPLE_RATE> for PinkNoise<SAMPLE_RATE, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sample_range() {
        let mut noise = PinkNoise::<44100>::new();
        for _ in 0..10000 {
            let sample = noise.next_sample();
            // Mean of sixteen uniform generators stays inside the unit range
            assert!((-1.0..=1.0).contains(&sample));
        }
    }

    #[test]
    fn test_more_low_frequency_energy_than_white() {
        // Successive pink samples share most generators, so they are far
        // more correlated than white noise.
        let mut noise = PinkNoise::<44100, _>::with_rng(StdRng::seed_from_u64(3));
        let samples: Vec<f64> = (0..4096).map(|_| noise.next_sample()).collect();
        let mean_step: f64 = samples
            .windows(2)
            .map(|w| (w[1] - w[0]).abs())
            .sum::<f64>()
            / 4095.0;
        let mean_level: f64 = samples.iter().map(|s| s.abs()).sum::<f64>() / 4096.0;
        assert!(mean_step < mean_level);
    }

    #[test]
    fn test_counter_wrapping() {
        let mut noise = PinkNoise::<44100>::new();
        noise.counter = u32::MAX - 10;

        for _ in 0..20 {
            let sample = noise.next_sample();
            assert!((-1.0..=1.0).contains(&sample));
        }
    }
}
