pub mod stats;
pub mod suffix_tree;
pub mod walker;

pub use stats::TreeStats;
pub use suffix_tree::{SuffixTree, SuffixTreeBuilder};
pub use walker::{walk, TreeListener, TreeWalker};
