//! Core signal processing types and traits.
//!
//! This module provides the fundamental abstractions used throughout the
//! crate:
//! - `Signal` trait for all signal sources and processors
//! - `AudioSignal` trait for sample-rate-aware signals
//! - `Pitched` trait for sources with a fixed frequency
//! - `SampleClock` for the render timeline shared across threads

mod audio;
mod clock;
mod signal;

pub use audio::AudioSignal;
pub use clock::SampleClock;
pub use signal::{Pitched, Signal};
