//! Generalized suffix tree
//!
//! This module builds a suffix tree over several texts in linear time and
//! gives read access to the finished tree.
//!
//! ## Architecture
//!
//! - `builder`: Ukkonen construction, one character at a time
//! - `reader`: The finished, immutable tree and pattern queries
//! - `types`: Nodes, edge ends, end counters and positions
//!
//! ## Text Buffer
//!
//! All texts are appended to one buffer, each followed by the terminator.
//! Edge labels are intervals of that buffer. Leaf edges of the text being
//! read end at the text's open end counter until its terminator freezes it.

pub mod builder;
pub mod reader;
pub mod types;

// Re-exports for convenience
pub use builder::SuffixTreeBuilder;
pub use reader::SuffixTree;
pub use types::{ActivePoint, Children, Node, NodeId, NodePosition, TextPosition, TextSpan, ROOT};
