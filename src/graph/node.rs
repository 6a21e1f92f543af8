//! Node identities and the fixed topology of a built graph.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identity of one graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ids of every node in a soundscape graph.
///
/// Signal flow:
///
/// ```text
/// drone voices ──> drone bus ──┐
///                              ├──> filter ──> master ──> output
/// noise source ──> noise bus ──┘
/// ```
///
/// A topology is allocated once, when the graph is built, and is immutable
/// afterwards. Two snapshots comparing equal means no node was recreated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphTopology {
    pub drone_voices: Vec<NodeId>,
    pub noise_source: NodeId,
    pub drone_bus: NodeId,
    pub noise_bus: NodeId,
    pub filter: NodeId,
    pub master: NodeId,
}

impl GraphTopology {
    /// Allocates fresh ids for a graph with `voice_count` drone voices.
    pub(crate) fn allocate(voice_count: usize) -> Self {
        Self {
            drone_voices: (0..voice_count).map(|_| NodeId::next()).collect(),
            noise_source: NodeId::next(),
            drone_bus: NodeId::next(),
            noise_bus: NodeId::next(),
            filter: NodeId::next(),
            master: NodeId::next(),
        }
    }

    /// Number of sound sources: every drone voice plus the noise source.
    pub fn source_count(&self) -> usize {
        self.drone_voices.len() + 1
    }
}
