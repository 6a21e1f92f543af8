//! Brown (red) noise generator implementation.

use crate::{AudioSignal, Signal};
use rand::Rng;

/// Leak applied to the integrator each sample.
const LEAK: f64 = 1.02;
/// Weight of each new white sample.
const STEP: f64 = 0.02;
/// Make-up gain so the integrated walk sits near unit amplitude.
const MAKEUP: f64 = 3.5;

/// A brown noise generator.
///
/// Brown noise falls off at 6 dB per octave. It is produced by a leaky
/// integrator over white noise, which keeps the random walk bounded while
/// leaving a deep, ocean-like rumble.
pub struct BrownNoise<const SAMPLE_RATE: u32, R: Rng = rand::rngs::ThreadRng> {
    rng: R,
    last: f64,
}

impl<const SAMPLE_RATE: u32> Default for BrownNoise<SAMPLE_RATE, rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SAMPLE_RATE: u32> BrownNoise<SAMPLE_RATE, rand::rngs::ThreadRng> {
    /// Creates a brown noise generator backed by the thread-local RNG.
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> BrownNoise<SAMPLE_RATE, R> {
    /// Creates a brown noise generator with a custom RNG.
    pub fn with_rng(rng: R) -> Self {
        Self { rng, last: 0.0 }
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> Signal for BrownNoise<SAMPLE_RATE, R> {
    fn next_sample(&mut self) -> f64 {
        let white: f64 = self.rng.gen_range(-1.0..=1.0);
        self.last = (self.last + STEP * white) / LEAK;
        self.last * MAKEUP
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> AudioSignal<SAMPLE_RATE> for BrownNoise<SAMPLE_RATE, R> {}
