//! Core signal processing traits.
//!
//! This module provides the fundamental `Signal` trait that represents
//! any audio signal source or processor that can generate samples, as well
//! as the `Pitched` trait for sources with a fixed frequency.

/// Common interface for all signal sources and processors.
///
/// This trait defines the core functionality for anything that can generate
/// audio samples: drone oscillators, noise loops, and the soundscape graph
/// itself.
///
/// The trait provides two fundamental operations:
/// - Single sample generation via `next_sample()`
/// - Batch processing via `process()`
pub trait Signal {
    /// Generates the next sample from the signal.
    ///
    /// # Returns
    ///
    /// A sample value, typically between -1.0 and 1.0 for audio signals
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    /// Implementors may override this for more efficient batch processing.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// Minimal trait for anything with a pitch.
///
/// # Examples
///
/// ```
/// use zendrone::{Pitched, SineOscillator};
///
/// let osc = SineOscillator::<44100>::new(136.1);
/// assert_eq!(osc.frequency(), 136.1);
/// ```
pub trait Pitched {
    /// Gets the frequency of the signal in Hz.
    fn frequency(&self) -> f64;
}

/// Implementation of `Signal` for `f64` representing a constant signal value.
///
/// Handy as a DC source when probing processors in isolation.
///
/// ```
/// use zendrone::Signal;
///
/// let mut constant = 0.5_f64;
/// let mut buffer = vec![0.0; 4];
/// constant.process(&mut buffer);
/// assert_eq!(buffer, vec![0.5, 0.5, 0.5, 0.5]);
/// ```
impl Signal for f64 {
    fn next_sample(&mut self) -> f64 {
        *self
    }

    fn process(&mut self, buffer: &mut [f64]) {
        buffer.fill(*self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(f64);

    impl Signal for Counter {
        fn next_sample(&mut self) -> f64 {
            self.0 += 1.0;
            self.0
        }
    }

    #[test]
    fn test_default_process_calls_next_sample() {
        let mut counter = Counter(0.0);
        let mut buffer = [0.0; 4];
        counter.process(&mut buffer);
        assert_eq!(buffer, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_constant_signal() {
        let mut constant = 0.25_f64;
        assert_eq!(constant.next_sample(), 0.25);
        assert_eq!(constant.next_sample(), 0.25);
    }
}
