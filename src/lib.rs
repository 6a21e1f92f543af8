//! Zendrone - a breath-driven procedural ambient soundscape
//!
//! Four detuned drone voices and a looping noise bed run through a shared
//! low-pass filter into a master gain. A normalized breathing scale opens
//! and closes the filter and swells the volume.
//!
//! The control side (`AmbientEngine`) never touches samples. It schedules
//! parameter automations and posts the latest one per parameter to the
//! render side (`SoundscapeGraph`), which an `AudioHost` runs.

mod automation;
pub mod config;
mod core;
mod engine;
pub mod error;
pub mod graph;
pub mod host;
pub mod synthesis;

// Re-export commonly used types at the crate root
pub use automation::{Automation, Curve, Transition};
pub use config::EngineConfig;
pub use crate::core::{AudioSignal, Pitched, SampleClock, Signal};
pub use engine::{AmbientEngine, EngineState};
pub use error::{ConfigError, EngineError};
pub use graph::{GraphTopology, NodeId, ParamId, SoundscapeGraph};
#[cfg(feature = "cpal")]
pub use host::{CpalContext, CpalHost};
pub use host::{AudioContext, AudioHost, ContextState, OfflineContext, OfflineHost};
pub use synthesis::{
    BiquadFilter, BrownNoise, DroneOscillator, FilterType, NoiseColor, NoiseLoop, Oscillator,
    PinkNoise, SineOscillator, TriangleOscillator, Waveform, WhiteNoise,
};
