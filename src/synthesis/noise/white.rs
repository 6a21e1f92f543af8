//! White noise generator implementation.

use crate::{AudioSignal, Signal};
use rand::Rng;

/// A white noise generator.
///
/// White noise has equal power across all frequencies. Each sample is
/// a random value uniformly distributed between -1.0 and 1.0.
pub struct WhiteNoise<const SAMPLE_RATE: u32, R: Rng = rand::rngs::ThreadRng> {
    rng: R,
}

impl<const SAMPLE_RATE: u32> Default for WhiteNoise<SAMPLE_RATE, rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SAMPLE_RATE: u32> WhiteNoise<SAMPLE_RATE, rand::rngs::ThreadRng> {
    /// Creates a white noise generator backed by the thread-local RNG.
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> WhiteNoise<SAMPLE_RATE, R> {
    /// Creates a white noise generator with a custom RNG.
    ///
    /// ```
    /// use zendrone::{Signal, WhiteNoise};
    /// use rand::SeedableRng;
    ///
    /// let rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let mut noise = WhiteNoise::<48000, _>::with_rng(rng);
    /// assert!(noise.next_sample().abs() <= 1.0);
    /// ```
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> Signal for WhiteNoise<SAMPLE_RATE, R> {
    fn next_sample(&mut self) -> f64 {
        self.rng.gen_range(-1.0..=1.0)
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> AudioSignal<SAMPLE_RATE> for WhiteNoise<SAMPLE_RATE, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sample_range() {
        let mut noise = WhiteNoise::<44100>::new();
        for _ in 0..10000 {
            let sample = noise.next_sample();
            assert!((-1.0..=1.0).contains(&sample));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = WhiteNoise::<44100, _>::with_rng(StdRng::seed_from_u64(42));
        let mut b = WhiteNoise::<44100, _>::with_rng(StdRng::seed_from_u64(42));
        for _ in 0..64 {
            assert_eq!(a.next_sample(), b.next_sample());
        }
    }
}
