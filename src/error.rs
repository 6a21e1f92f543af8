//! Error types.
//!
//! None of these ever escape a control operation on `AmbientEngine`; they
//! travel between the engine and its host, and out of configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Failures acquiring or driving the audio context.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The host has no usable audio output.
    #[error("audio output unavailable: {0}")]
    UnsupportedEnvironment(String),

    /// The context was closed and can no longer be resumed.
    #[error("audio context already closed")]
    ContextClosed,
}

/// Failures loading an `EngineConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
