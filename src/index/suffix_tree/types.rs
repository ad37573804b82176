//! Types for suffix tree construction
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Parent and
//! suffix links are plain ids, so none of the relations between nodes is an
//! ownership relation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Identifier of a node, assigned in creation order
pub type NodeId = usize;

/// Position in the shared text buffer
pub type TextPosition = usize;

/// Handle of an end counter; equals the index of the text it belongs to
pub type CounterHandle = usize;

/// The root node is always created first
pub const ROOT: NodeId = 0;

/// End of an edge label during construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    /// Closed interval end
    Fixed(TextPosition),
    /// Tracks the end counter of a text that is still growing
    Open(CounterHandle),
}

/// Shared end of all leaf edges of one text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCounter {
    /// Advanced on every character of the text
    Open(TextPosition),
    /// Fixed once the text's terminator has been processed
    Frozen(TextPosition),
}

impl EndCounter {
    #[inline]
    pub fn value(self) -> TextPosition {
        match self {
            EndCounter::Open(v) | EndCounter::Frozen(v) => v,
        }
    }

    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, EndCounter::Open(_))
    }
}

/// Where the next extension starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivePoint {
    pub node: NodeId,
    /// Buffer position of the first character of the active edge
    pub edge: TextPosition,
    /// Number of characters matched along the active edge
    pub length: usize,
}

/// Extent of one input text in the shared buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    /// First character (inclusive)
    pub begin: TextPosition,
    /// One past the terminator (exclusive)
    pub end: TextPosition,
}

impl TextSpan {
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// A suffix of an input text ending at a leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePosition {
    pub text_index: usize,
    /// First character of the suffix (inclusive)
    pub start: TextPosition,
    /// One past the text's terminator (exclusive)
    pub end: TextPosition,
}

impl NodePosition {
    /// Length of the suffix, terminator included
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Child table keyed by the first character of each child's edge, kept sorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Children(SmallVec<[(char, NodeId); 4]>);

impl Children {
    pub fn get(&self, ch: char) -> Option<NodeId> {
        self.0
            .binary_search_by(|(c, _)| c.cmp(&ch))
            .ok()
            .map(|i| self.0[i].1)
    }

    /// Insert a child, replacing any existing child for the same character
    pub fn insert(&mut self, ch: char, node: NodeId) {
        match self.0.binary_search_by(|(c, _)| c.cmp(&ch)) {
            Ok(i) => self.0[i].1 = node,
            Err(i) => self.0.insert(i, (ch, node)),
        }
    }

    /// Children in ascending character order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (char, NodeId)> + ExactSizeIterator + '_ {
        self.0.iter().copied()
    }

    pub fn nth(&self, i: usize) -> Option<(char, NodeId)> {
        self.0.get(i).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A node of a finished suffix tree
///
/// The edge leading into the node is stored on the node itself as the
/// interval `start..end` of the shared text buffer. The root's interval is
/// empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) suffix_link: Option<NodeId>,
    pub(crate) start: TextPosition,
    pub(crate) end: TextPosition,
    pub(crate) children: Children,
    pub(crate) positions: Vec<NodePosition>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn suffix_link(&self) -> Option<NodeId> {
        self.suffix_link
    }

    /// Start of the incoming edge label (inclusive)
    pub fn start(&self) -> TextPosition {
        self.start
    }

    /// End of the incoming edge label (exclusive)
    pub fn end(&self) -> TextPosition {
        self.end
    }

    pub fn edge_len(&self) -> usize {
        self.end - self.start
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    /// Suffixes ending at this node; empty unless the node is a leaf
    pub fn positions(&self) -> &[NodePosition] {
        &self.positions
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT
    }

    /// Leaves are terminal; the root never is
    pub fn is_terminal(&self) -> bool {
        !self.is_root() && self.children.is_empty()
    }
}
