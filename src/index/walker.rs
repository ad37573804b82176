//! Depth-first traversal of a finished suffix tree
//!
//! The walker keeps its own stack instead of recursing, so tree depth is
//! bounded only by memory. Children are visited in ascending order of their
//! first edge character, which makes every walk over the same tree produce
//! the same sequence of callbacks.

use crate::error::{Error, Result};
use crate::index::suffix_tree::{NodeId, SuffixTree, ROOT};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Callbacks invoked while walking a tree
///
/// `depth` counts edges from the root; `path_len` is the number of
/// characters on the path from the root to the node (0 for the root).
pub trait TreeListener {
    fn enter(&mut self, node: NodeId, depth: usize, path_len: usize) -> Result<()>;

    fn exit(&mut self, node: NodeId, depth: usize, path_len: usize) -> Result<()>;
}

/// One node on the walk stack
struct Frame {
    node: NodeId,
    depth: usize,
    path_len: usize,
    /// Index of the next child to descend into
    next_child: usize,
}

/// Iterative depth-first walker with optional cancellation
#[derive(Debug, Clone, Default)]
pub struct TreeWalker {
    cancel: Option<Arc<AtomicBool>>,
}

impl TreeWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the walk with [`Error::Cancelled`] once `flag` is set
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Walk `tree` from the root, calling `listener` on entry and exit of every node
    pub fn walk<L: TreeListener + ?Sized>(&self, tree: &SuffixTree, listener: &mut L) -> Result<()> {
        debug!(nodes = tree.node_count(), "walk started");

        let mut visited = 0usize;
        let mut stack = vec![Frame {
            node: ROOT,
            depth: 0,
            path_len: 0,
            next_child: 0,
        }];
        listener.enter(ROOT, 0, 0)?;

        while let Some(frame) = stack.last_mut() {
            let node = tree.get_node(frame.node)?;

            match node.children().nth(frame.next_child) {
                Some((_, child)) => {
                    frame.next_child += 1;
                    let depth = frame.depth + 1;
                    let path_len = frame.path_len + tree.get_node(child)?.edge_len();

                    self.check_cancelled()?;
                    stack.push(Frame {
                        node: child,
                        depth,
                        path_len,
                        next_child: 0,
                    });
                    listener.enter(child, depth, path_len)?;
                }
                None => {
                    let Frame {
                        node,
                        depth,
                        path_len,
                        ..
                    } = *frame;
                    stack.pop();
                    visited += 1;
                    listener.exit(node, depth, path_len)?;
                }
            }
        }

        debug!(visited, "walk finished");
        Ok(())
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Walk `tree` with a default [`TreeWalker`]
pub fn walk<L: TreeListener + ?Sized>(tree: &SuffixTree, listener: &mut L) -> Result<()> {
    TreeWalker::new().walk(tree, listener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::suffix_tree::SuffixTreeBuilder;

    #[derive(Default)]
    struct Recorder {
        events: Vec<(char, NodeId, usize, usize)>,
    }

    impl TreeListener for Recorder {
        fn enter(&mut self, node: NodeId, depth: usize, path_len: usize) -> Result<()> {
            self.events.push(('>', node, depth, path_len));
            Ok(())
        }

        fn exit(&mut self, node: NodeId, depth: usize, path_len: usize) -> Result<()> {
            self.events.push(('<', node, depth, path_len));
            Ok(())
        }
    }

    fn build(texts: &[&str]) -> SuffixTree {
        let mut builder = SuffixTreeBuilder::with_defaults();
        for text in texts {
            builder.append_text(text).unwrap();
        }
        builder.finish().unwrap()
    }

    #[derive(Default)]
    struct DepthTracker {
        open: usize,
        max_depth: usize,
        max_path_len: usize,
    }

    impl TreeListener for DepthTracker {
        fn enter(&mut self, _node: NodeId, depth: usize, path_len: usize) -> Result<()> {
            self.open += 1;
            self.max_depth = self.max_depth.max(depth);
            self.max_path_len = self.max_path_len.max(path_len);
            Ok(())
        }

        fn exit(&mut self, _node: NodeId, _depth: usize, _path_len: usize) -> Result<()> {
            self.open -= 1;
            Ok(())
        }
    }

    #[test]
    fn test_deep_tree_walks_without_recursion() {
        let n = 100_000;
        let tree = build(&["a".repeat(n).as_str()]);

        // One inner node per proper prefix of a^n, the last leaf below them all.
        let mut tracker = DepthTracker::default();
        walk(&tree, &mut tracker).unwrap();

        assert_eq!(tracker.open, 0);
        assert_eq!(tracker.max_depth, n);
        assert_eq!(tracker.max_path_len, n + 1);
    }

    #[test]
    fn test_every_node_entered_and_exited_once() {
        let tree = build(&["abab"]);
        let mut recorder = Recorder::default();
        walk(&tree, &mut recorder).unwrap();

        assert_eq!(recorder.events.len(), 2 * tree.node_count());
        assert_eq!(recorder.events.first(), Some(&('>', ROOT, 0, 0)));
        assert_eq!(recorder.events.last(), Some(&('<', ROOT, 0, 0)));
    }

    #[test]
    fn test_path_len_matches_label() {
        let tree = build(&["mississippi"]);
        let mut recorder = Recorder::default();
        walk(&tree, &mut recorder).unwrap();

        for &(_, node, _, path_len) in &recorder.events {
            assert_eq!(tree.path_label(node).chars().count(), path_len);
        }
    }

    #[test]
    fn test_children_in_character_order() {
        let tree = build(&["abab"]);
        let mut recorder = Recorder::default();
        walk(&tree, &mut recorder).unwrap();

        let labels: Vec<String> = recorder
            .events
            .iter()
            .filter(|e| e.0 == '>' && e.2 == 1)
            .map(|e| tree.path_label(e.1))
            .collect();
        assert_eq!(labels, vec!["$", "ab", "b"]);
    }

    #[test]
    fn test_listener_error_aborts_walk() {
        struct FailOnLeaf;
        impl TreeListener for FailOnLeaf {
            fn enter(&mut self, _: NodeId, _: usize, _: usize) -> Result<()> {
                Ok(())
            }
            fn exit(&mut self, node: NodeId, _: usize, _: usize) -> Result<()> {
                Err(Error::inconsistent_path(format!("stop at {}", node)))
            }
        }

        let tree = build(&["ab"]);
        let err = walk(&tree, &mut FailOnLeaf).unwrap_err();
        assert!(matches!(err, Error::InconsistentPath(_)));
    }

    #[test]
    fn test_cancellation() {
        let tree = build(&["abcabc"]);
        let flag = Arc::new(AtomicBool::new(true));
        let walker = TreeWalker::new().with_cancellation(flag.clone());

        let mut recorder = Recorder::default();
        let err = walker.walk(&tree, &mut recorder).unwrap_err();
        assert!(matches!(err, Error::Cancelled));

        flag.store(false, Ordering::Relaxed);
        let mut recorder = Recorder::default();
        assert!(walker.walk(&tree, &mut recorder).is_ok());
    }
}
