use crate::error::Result;
use crate::index::suffix_tree::{NodeId, SuffixTree};
use crate::index::walker::{walk, TreeListener};
use serde::Serialize;

/// Summary figures of a finished suffix tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub text_count: usize,
    /// Buffer length, terminators included
    pub text_len: usize,
    pub node_count: usize,
    pub internal_count: usize,
    pub leaf_count: usize,
    /// Leaves where suffixes of more than one text coincide
    pub shared_leaf_count: usize,
    /// Edges on the longest root-to-leaf path
    pub max_depth: usize,
    /// Characters on the longest root-to-leaf path
    pub max_path_len: usize,
}

impl TreeStats {
    pub fn collect(tree: &SuffixTree) -> Result<Self> {
        let mut stats = TreeStats {
            text_count: tree.text_count(),
            text_len: tree.text_len(),
            node_count: tree.node_count(),
            ..Default::default()
        };

        for leaf in tree.leaves() {
            stats.leaf_count += 1;
            let first = leaf.positions().first().map(|p| p.text_index);
            if leaf.positions().iter().any(|p| Some(p.text_index) != first) {
                stats.shared_leaf_count += 1;
            }
        }
        // Everything else but the root is internal.
        stats.internal_count = stats.node_count - stats.leaf_count - 1;

        let mut depths = DepthListener::default();
        walk(tree, &mut depths)?;
        stats.max_depth = depths.max_depth;
        stats.max_path_len = depths.max_path_len;

        Ok(stats)
    }
}

#[derive(Default)]
struct DepthListener {
    max_depth: usize,
    max_path_len: usize,
}

impl TreeListener for DepthListener {
    fn enter(&mut self, _node: NodeId, depth: usize, path_len: usize) -> Result<()> {
        self.max_depth = self.max_depth.max(depth);
        self.max_path_len = self.max_path_len.max(path_len);
        Ok(())
    }

    fn exit(&mut self, _node: NodeId, _depth: usize, _path_len: usize) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::suffix_tree::SuffixTreeBuilder;

    #[test]
    fn test_stats_abab() {
        let mut builder = SuffixTreeBuilder::with_defaults();
        builder.append_text("abab").unwrap();
        let tree = builder.finish().unwrap();

        let stats = TreeStats::collect(&tree).unwrap();
        assert_eq!(
            stats,
            TreeStats {
                text_count: 1,
                text_len: 5,
                node_count: 8,
                internal_count: 2,
                leaf_count: 5,
                shared_leaf_count: 0,
                max_depth: 2,
                max_path_len: 5,
            }
        );
    }

    #[test]
    fn test_stats_shared_leaves() {
        let mut builder = SuffixTreeBuilder::with_defaults();
        builder.append_text("xab").unwrap();
        builder.append_text("yab").unwrap();
        let tree = builder.finish().unwrap();

        let stats = TreeStats::collect(&tree).unwrap();
        // "ab$", "b$" and "$" are suffixes of both texts
        assert_eq!(stats.shared_leaf_count, 3);
        assert_eq!(stats.text_count, 2);
    }

    #[test]
    fn test_stats_empty_tree() {
        let tree = SuffixTreeBuilder::with_defaults().finish().unwrap();
        let stats = TreeStats::collect(&tree).unwrap();

        assert_eq!(stats.node_count, 1);
        assert_eq!(stats.leaf_count, 0);
        assert_eq!(stats.internal_count, 0);
    }
}
