//! Sample-accurate clock shared between the render and control sides.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counts rendered frames and converts them to seconds.
///
/// The render side is the only writer. The control side reads it to decide
/// when scheduled automation should begin, so all trajectories are expressed
/// on the same timeline the audio thread renders against.
#[derive(Debug, Clone)]
pub struct SampleClock<const SAMPLE_RATE: u32> {
    frames: Arc<AtomicU64>,
}

impl<const SAMPLE_RATE: u32> Default for SampleClock<SAMPLE_RATE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SAMPLE_RATE: u32> SampleClock<SAMPLE_RATE> {
    /// Creates a clock at frame zero.
    pub fn new() -> Self {
        Self {
            frames: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Total frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Elapsed render time in seconds.
    pub fn seconds(&self) -> f64 {
        self.frames() as f64 / SAMPLE_RATE as f64
    }

    /// Converts a frame index to seconds on this clock.
    #[inline]
    pub fn frame_to_seconds(frame: u64) -> f64 {
        frame as f64 / SAMPLE_RATE as f64
    }

    /// Advances the clock after a block has been rendered.
    pub fn advance(&self, frames: u64) {
        self.frames.fetch_add(frames, Ordering::Release);
    }
}
