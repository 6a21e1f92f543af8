//! The soundscape graph and the plumbing that drives it.
//!
//! - `SoundscapeGraph` renders samples on the audio side
//! - `ParamSet` holds the four automatable trajectories
//! - `command_channel` hands the latest trajectory per parameter from the
//!   engine to the graph without ever blocking the audio side
//! - `GraphTopology` records the identity of every node

mod command;
mod node;
mod soundscape;

pub use command::{
    CommandReceiver, CommandSender, ParamCommand, ParamId, ParamSet, command_channel,
};
pub use node::{GraphTopology, NodeId};
pub use soundscape::SoundscapeGraph;
