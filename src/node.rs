/*!
 * Arena storage for timing nodes.
 *
 * A timeline owns every node in a single `Vec`; parents, children and leaf
 * slots are indices into it. Handles handed to callers carry the identity of
 * the timeline that issued them, so a handle can never address a node of a
 * different (or already dropped) timeline.
 */

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::document::MediaRef;

static NEXT_TIMELINE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one timeline arena
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub(crate) struct TimelineId(u64);

impl TimelineId {
    pub(crate) fn next() -> Self {
        Self(NEXT_TIMELINE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Kind tag of a timing node
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum NodeKind {
    /// `seq` container
    Sequence,
    /// `par` container
    Parallel,
    /// Audio clip leaf
    Audio,
    /// Text fragment leaf
    Text,
}

impl NodeKind {
    /// Element-style name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequence => "seq",
            Self::Parallel => "par",
            Self::Audio => "audio",
            Self::Text => "text",
        }
    }

    /// Whether the kind is a container (sequence or parallel)
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Sequence | Self::Parallel)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Handle of any node in a timeline
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct NodeId {
    pub(crate) owner: TimelineId,
    pub(crate) index: u32,
}

impl NodeId {
    /// Position of the node in its timeline's arena (document order of creation)
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

macro_rules! typed_node_id {
    ($(#[$meta:meta])* $T:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
        pub struct $T(pub(crate) NodeId);

        impl $T {
            /// The untyped handle
            pub fn node(&self) -> NodeId {
                self.0
            }
        }

        impl From<$T> for NodeId {
            fn from(id: $T) -> Self {
                id.0
            }
        }
    };
}

typed_node_id!(
    /// Handle of a sequence container
    SequenceId
);
typed_node_id!(
    /// Handle of a parallel container
    ParallelId
);
typed_node_id!(
    /// Handle of an audio leaf
    AudioId
);
typed_node_id!(
    /// Handle of a text leaf
    TextId
);

/// Effective duration of a clip window.
///
/// Zero when the window is empty, inverted, or ends at zero.
pub fn clip_duration_ms(clip_begin_ms: u32, clip_end_ms: u32) -> u32 {
    if clip_end_ms == 0 || clip_end_ms <= clip_begin_ms {
        return 0;
    }
    clip_end_ms - clip_begin_ms
}

#[derive(Debug, Clone)]
pub(crate) struct SequenceData {
    pub type_attr: String,
    pub text_ref: Option<MediaRef>,
    pub children: Vec<u32>,
}

#[derive(Debug, Clone)]
pub(crate) struct ParallelData {
    pub type_attr: String,
    pub audio: Option<u32>,
    pub text: Option<u32>,
}

#[derive(Debug, Clone)]
pub(crate) struct AudioData {
    pub media: MediaRef,
    pub clip_begin_ms: u32,
    pub clip_end_ms: u32,
}

#[derive(Debug, Clone)]
pub(crate) struct TextData {
    pub media: MediaRef,
}

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Sequence(SequenceData),
    Parallel(ParallelData),
    Audio(AudioData),
    Text(TextData),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Sequence(_) => NodeKind::Sequence,
            NodeData::Parallel(_) => NodeKind::Parallel,
            NodeData::Audio(_) => NodeKind::Audio,
            NodeData::Text(_) => NodeKind::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeEntry {
    pub parent: Option<u32>,
    pub depth: usize,
    pub data: NodeData,
}

/// Node storage for one timeline
#[derive(Debug)]
pub(crate) struct Arena {
    pub owner: TimelineId,
    pub nodes: Vec<NodeEntry>,
    pub root: Option<u32>,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            owner: TimelineId::next(),
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn id_of(&self, index: u32) -> NodeId {
        NodeId {
            owner: self.owner,
            index,
        }
    }

    /// Index of a handle issued by this arena, `None` for foreign handles
    pub fn index_of(&self, id: NodeId) -> Option<u32> {
        (id.owner == self.owner && (id.index as usize) < self.nodes.len()).then_some(id.index)
    }

    pub fn entry(&self, index: u32) -> &NodeEntry {
        &self.nodes[index as usize]
    }

    pub fn entry_mut(&mut self, index: u32) -> &mut NodeEntry {
        &mut self.nodes[index as usize]
    }

    pub fn push(&mut self, parent: Option<u32>, depth: usize, data: NodeData) -> u32 {
        let index = self.nodes.len() as u32;
        self.nodes.push(NodeEntry { parent, depth, data });
        index
    }

    pub fn sequence(&self, index: u32) -> Option<&SequenceData> {
        match &self.entry(index).data {
            NodeData::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn parallel(&self, index: u32) -> Option<&ParallelData> {
        match &self.entry(index).data {
            NodeData::Parallel(par) => Some(par),
            _ => None,
        }
    }

    pub fn audio(&self, index: u32) -> Option<&AudioData> {
        match &self.entry(index).data {
            NodeData::Audio(audio) => Some(audio),
            _ => None,
        }
    }

    pub fn text(&self, index: u32) -> Option<&TextData> {
        match &self.entry(index).data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }
}
