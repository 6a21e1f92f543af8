//! Filter stage shared by the drone and noise buses.

mod biquad;

pub use self::biquad::{BiquadFilter, FilterType};
