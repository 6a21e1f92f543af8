//! Noise generators for the ambient bed.
//!
//! The streaming generators (`WhiteNoise`, `PinkNoise`, `BrownNoise`) are
//! used once, at build time, to fill a `NoiseLoop` that the audio thread
//! plays back indefinitely.

mod brown;
mod looped;
mod pink;
mod white;

pub use brown::BrownNoise;
pub use looped::{NoiseColor, NoiseLoop};
pub use pink::PinkNoise;
pub use white::WhiteNoise;
