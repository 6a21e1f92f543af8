//! Parameter automation: the scheduling layer between control calls and the
//! audio thread.
//!
//! - `Curve` shapes timed ramps
//! - `Automation` is one parameter's trajectory (anchor plus `Transition`)

mod curve;
mod trajectory;

pub use trajectory::{Automation, Transition};
pub use curve::Curve;
