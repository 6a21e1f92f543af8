//! Deterministic, pull-based host.

use super::{AudioContext, AudioHost, ContextState};
use crate::error::EngineError;
use crate::{SampleClock, Signal, SoundscapeGraph};

/// A host that renders only when asked to.
///
/// Contexts start `Suspended`, as a browser-style autoplay policy would
/// leave them, so the engine's resume path is always exercised.
#[derive(Debug, Clone)]
pub struct OfflineHost {
    available: bool,
    contexts_created: usize,
}

impl Default for OfflineHost {
    fn default() -> Self {
        Self::new()
    }
}

impl OfflineHost {
    pub fn new() -> Self {
        Self {
            available: true,
            contexts_created: 0,
        }
    }

    /// A host that refuses to create contexts, like an environment with no
    /// audio output at all.
    pub fn unsupported() -> Self {
        Self {
            available: false,
            contexts_created: 0,
        }
    }

    pub fn contexts_created(&self) -> usize {
        self.contexts_created
    }
}

impl<const SAMPLE_RATE: u32> AudioHost<SAMPLE_RATE> for OfflineHost {
    type Context = OfflineContext<SAMPLE_RATE>;

    fn create_context(&mut self) -> Result<Self::Context, EngineError> {
        if !self.available {
            return Err(EngineError::UnsupportedEnvironment(
                "offline host configured without audio".into(),
            ));
        }
        self.contexts_created += 1;
        Ok(OfflineContext::new())
    }
}

/// Context whose clock only moves when `render` is called.
pub struct OfflineContext<const SAMPLE_RATE: u32> {
    state: ContextState,
    clock: SampleClock<SAMPLE_RATE>,
    graph: Option<SoundscapeGraph<SAMPLE_RATE>>,
}

impl<const SAMPLE_RATE: u32> OfflineContext<SAMPLE_RATE> {
    fn new() -> Self {
        Self {
            state: ContextState::Suspended,
            clock: SampleClock::new(),
            graph: None,
        }
    }

    /// Fills `buffer` with the next block of audio.
    ///
    /// While suspended or closed the block is silent and the clock stands
    /// still. While running without a graph the block is silent but time
    /// passes.
    pub fn render(&mut self, buffer: &mut [f64]) {
        if self.state != ContextState::Running {
            buffer.fill(0.0);
            return;
        }
        match self.graph.as_mut() {
            Some(graph) => graph.process(buffer),
            None => {
                buffer.fill(0.0);
                self.clock.advance(buffer.len() as u64);
            }
        }
    }

    /// Renders `seconds` of audio and returns it.
    pub fn render_seconds(&mut self, seconds: f64) -> Vec<f64> {
        let frames = (seconds * SAMPLE_RATE as f64).round().max(0.0) as usize;
        let mut buffer = vec![0.0; frames];
        self.render(&mut buffer);
        buffer
    }

    /// Advances time by rendering and discarding `seconds` of audio.
    pub fn advance(&mut self, seconds: f64) {
        self.render_seconds(seconds);
    }

    pub fn has_graph(&self) -> bool {
        self.graph.is_some()
    }
}

impl<const SAMPLE_RATE: u32> AudioContext<SAMPLE_RATE> for OfflineContext<SAMPLE_RATE> {
    fn state(&self) -> ContextState {
        self.state
    }

    fn clock(&self) -> &SampleClock<SAMPLE_RATE> {
        &self.clock
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        match self.state {
            ContextState::Closed => Err(EngineError::ContextClosed),
            _ => {
                self.state = ContextState::Running;
                Ok(())
            }
        }
    }

    fn attach(&mut self, graph: SoundscapeGraph<SAMPLE_RATE>) -> Result<(), EngineError> {
        if self.state == ContextState::Closed {
            return Err(EngineError::ContextClosed);
        }
        self.graph = Some(graph);
        Ok(())
    }

    fn close(&mut self) {
        self.state = ContextState::Closed;
        self.graph = None;
    }
}
