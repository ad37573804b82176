//! Conversion of a suffix tree into a transition network
//!
//! [`AutomatonBuilder`] listens to a depth-first walk and emits the path to
//! every leaf that ends a whole input text. Two stacks are kept in step:
//! the path currently being visited and the last path emitted. When the
//! next whole-text leaf is reached, only the part of its path below the
//! last shared node is emitted, so common prefixes become shared states.

use super::network::{SuffixElement, Transition, TransitionNetwork};
use crate::config::Direction;
use crate::error::{Error, Result};
use crate::index::suffix_tree::{NodeId, SuffixTree};
use crate::index::walker::{TreeListener, TreeWalker};
use tracing::{debug, trace};

/// Tree listener that builds a [`TransitionNetwork`]
pub struct AutomatonBuilder<'t> {
    tree: &'t SuffixTree,
    network: TransitionNetwork,
    current_path: Vec<NodeId>,
    last_emitted: Vec<NodeId>,
    emitted_paths: usize,
}

impl<'t> AutomatonBuilder<'t> {
    pub fn new(tree: &'t SuffixTree, direction: Direction) -> Self {
        Self {
            tree,
            network: TransitionNetwork::new(tree.text_buffer().clone(), direction),
            current_path: Vec::new(),
            last_emitted: Vec::new(),
            emitted_paths: 0,
        }
    }

    /// The network built so far; complete once the walk has returned
    pub fn into_network(self) -> TransitionNetwork {
        self.network
    }

    /// Number of whole-text paths emitted so far
    pub fn emitted_paths(&self) -> usize {
        self.emitted_paths
    }

    /// Whether `node` is a leaf whose path spells a whole input text
    fn ends_whole_text(&self, node: NodeId, path_len: usize) -> Result<bool> {
        let node = self.tree.get_node(node)?;
        if !node.is_terminal() {
            return Ok(false);
        }

        for position in node.positions() {
            if position.end - self.tree.text_begin(position.text_index)? == path_len {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Emit the part of `current_path` not shared with the last emitted path
    fn emit_current_path(&mut self) -> Result<()> {
        if self.current_path.is_empty() {
            return Err(Error::inconsistent_path("emission with an empty node path"));
        }

        let shared = self.last_emitted.len();
        if shared > self.current_path.len() || self.current_path[..shared] != self.last_emitted[..] {
            return Err(Error::inconsistent_path(format!(
                "last emitted path {:?} is not a prefix of {:?}",
                self.last_emitted, self.current_path
            )));
        }

        // Re-enter at the last shared node so its new outgoing edge is emitted.
        let from = shared.saturating_sub(1);
        for pair in self.current_path[from..].windows(2) {
            let (parent, child) = (pair[0], pair[1]);
            let parent_state = self.network.add_state(parent);
            let child_state = self.network.add_state(child);

            let node = self.tree.get_node(child)?;
            let suffix = self.network.add_suffix_element(SuffixElement {
                start: node.start(),
                end: node.end(),
            });
            self.network.add_transition(
                parent_state,
                Transition {
                    to_state: child_state,
                    to_suffix: suffix,
                },
            )?;
            trace!(parent, child, parent_state, child_state, "transition emitted");
        }

        self.emitted_paths += 1;
        Ok(())
    }
}

impl TreeListener for AutomatonBuilder<'_> {
    fn enter(&mut self, node: NodeId, _depth: usize, _path_len: usize) -> Result<()> {
        self.current_path.push(node);
        Ok(())
    }

    fn exit(&mut self, node: NodeId, _depth: usize, path_len: usize) -> Result<()> {
        if self.ends_whole_text(node, path_len)? {
            self.emit_current_path()?;
            self.last_emitted.clone_from(&self.current_path);
        }

        if self.current_path.pop() != Some(node) {
            return Err(Error::inconsistent_path(format!(
                "exit from node {} which is not on top of the path",
                node
            )));
        }
        if self.last_emitted.last() == Some(&node) {
            self.last_emitted.pop();
        }
        Ok(())
    }
}

/// Walk `tree` and build its transition network
///
/// Either the whole network is returned or an error; a failed walk never
/// yields a partial network.
pub fn build_network(tree: &SuffixTree, direction: Direction) -> Result<TransitionNetwork> {
    build_network_with(&TreeWalker::new(), tree, direction)
}

/// Like [`build_network`] with a caller-supplied walker, e.g. one that can be cancelled
pub fn build_network_with(
    walker: &TreeWalker,
    tree: &SuffixTree,
    direction: Direction,
) -> Result<TransitionNetwork> {
    let mut builder = AutomatonBuilder::new(tree, direction);
    walker.walk(tree, &mut builder)?;

    debug!(
        paths = builder.emitted_paths(),
        states = builder.network.states().len(),
        suffixes = builder.network.suffix_elements().len(),
        "transition network built"
    );
    Ok(builder.into_network())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::suffix_tree::{SuffixTreeBuilder, ROOT};

    fn build(texts: &[&str]) -> SuffixTree {
        let mut builder = SuffixTreeBuilder::with_defaults();
        for text in texts {
            builder.append_text(text).unwrap();
        }
        builder.finish().unwrap()
    }

    #[test]
    fn test_single_text_is_one_path() {
        let tree = build(&["abab"]);
        let tn = build_network(&tree, Direction::Forward).unwrap();

        // root --"ab"--> "ab" --"ab$"--> leaf
        assert_eq!(tn.states().len(), 3);
        assert_eq!(tn.suffix_elements().len(), 2);
        assert_eq!(tn.states()[0].origin_node, ROOT);
        assert_eq!(tn.recognized_texts(), vec!["abab$"]);
    }

    #[test]
    fn test_shared_prefix_branches_once() {
        let tree = build(&["xabxac", "xabxaa"]);
        let tn = build_network(&tree, Direction::Forward).unwrap();

        let branch = tree.find_node("xabxa").unwrap();
        let state = tn.state_of(branch).unwrap();
        let labels: Vec<String> = tn
            .transitions_of(state)
            .unwrap()
            .iter()
            .map(|t| tn.label(t.to_suffix).unwrap())
            .collect();
        assert_eq!(labels, vec!["a$", "c$"]);

        // root, "xa", "xabxa" and two leaves
        assert_eq!(tn.states().len(), 5);
        assert_eq!(tn.transition_count(), 4);
    }

    #[test]
    fn test_only_whole_texts_are_emitted() {
        let tree = build(&["banana"]);
        let tn = build_network(&tree, Direction::Forward).unwrap();

        assert_eq!(tn.recognized_texts(), vec!["banana$"]);
        assert!(tn.recognizes("banana$"));
        assert!(!tn.recognizes("ana$"));
    }

    #[test]
    fn test_reversed_direction() {
        let tree = build(&["cba"]);
        let tn = build_network(&tree, Direction::Reversed).unwrap();

        assert_eq!(tn.direction(), Direction::Reversed);
        assert_eq!(tn.recognized_texts(), vec!["$abc"]);
        assert!(tn.recognizes("$abc"));
        assert!(!tn.recognizes("cba$"));
        assert!(tn.matches_prefix("$ab"));
        assert!(!tn.matches_prefix("cb"));
    }

    #[test]
    fn test_empty_tree_gives_empty_network() {
        let tree = SuffixTreeBuilder::with_defaults().finish().unwrap();
        let tn = build_network(&tree, Direction::Forward).unwrap();
        assert!(tn.is_empty());
    }

    #[test]
    fn test_emit_with_empty_path_fails() {
        let tree = build(&["ab"]);
        let mut builder = AutomatonBuilder::new(&tree, Direction::Forward);

        let err = builder.emit_current_path().unwrap_err();
        assert!(matches!(err, Error::InconsistentPath(_)));
    }

    #[test]
    fn test_diverging_last_path_fails() {
        let tree = build(&["ab"]);
        let mut builder = AutomatonBuilder::new(&tree, Direction::Forward);
        builder.current_path = vec![ROOT, 1];
        builder.last_emitted = vec![ROOT, 2];

        let err = builder.emit_current_path().unwrap_err();
        assert!(matches!(err, Error::InconsistentPath(_)));
    }

    #[test]
    fn test_cancelled_walk_yields_no_network() {
        use std::sync::Arc;
        use std::sync::atomic::AtomicBool;

        let tree = build(&["abc"]);
        let walker = TreeWalker::new().with_cancellation(Arc::new(AtomicBool::new(true)));
        let result = build_network_with(&walker, &tree, Direction::Forward);
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
