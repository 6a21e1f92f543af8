//! The control side: `AmbientEngine` and its lifecycle.

mod ambient;
mod state;

pub use ambient::AmbientEngine;
pub use state::EngineState;
