//! Audio hosts: where the soundscape graph actually runs.
//!
//! The engine never talks to an audio API directly. It asks an `AudioHost`
//! for a context, hands the built graph to that context, and from then on
//! only reads the context's clock and resumes it.
//!
//! - `OfflineHost` renders on demand in the calling thread (tests, bouncing
//!   to a file)
//! - `CpalHost` (feature `cpal`) plays through the default output device

#[cfg(feature = "cpal")]
mod device;
mod offline;

#[cfg(feature = "cpal")]
pub use device::{CpalContext, CpalHost};
pub use offline::{OfflineContext, OfflineHost};

use crate::error::EngineError;
use crate::{SampleClock, SoundscapeGraph};

/// Whether a context is currently consuming its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Created but not producing sound (e.g. waiting on an autoplay policy)
    Suspended,
    Running,
    /// Released; cannot be resumed
    Closed,
}

/// A live audio context owning the render side of one engine.
pub trait AudioContext<const SAMPLE_RATE: u32> {
    fn state(&self) -> ContextState;

    /// The render clock; shared with the graph, which advances it.
    fn clock(&self) -> &SampleClock<SAMPLE_RATE>;

    /// Render time in seconds.
    fn current_time(&self) -> f64 {
        self.clock().seconds()
    }

    /// Starts or restarts rendering.
    fn resume(&mut self) -> Result<(), EngineError>;

    /// Takes ownership of the graph to render.
    fn attach(&mut self, graph: SoundscapeGraph<SAMPLE_RATE>) -> Result<(), EngineError>;

    /// Stops rendering for good and drops the graph.
    fn close(&mut self);
}

/// Factory for audio contexts.
pub trait AudioHost<const SAMPLE_RATE: u32> {
    type Context: AudioContext<SAMPLE_RATE>;

    /// Acquires an audio context, or reports that this environment has no
    /// usable audio output.
    fn create_context(&mut self) -> Result<Self::Context, EngineError>;
}
