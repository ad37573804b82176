//! Read access to a finished suffix tree
//!
//! A [`SuffixTree`] is immutable. Its text buffer is an `Arc<[char]>` so that
//! transition networks built from the tree can keep reading edge labels
//! after the tree itself is dropped.

use super::types::*;
use crate::config::IndexConfig;
use crate::error::{Error, Result};
use std::sync::Arc;

/// A generalized suffix tree over one or more terminated texts
#[derive(Debug, Clone)]
pub struct SuffixTree {
    config: IndexConfig,
    text: Arc<[char]>,
    nodes: Vec<Node>,
    spans: Vec<TextSpan>,
}

/// Where a pattern ended while following it from the root
struct Locus {
    /// Node whose incoming edge holds the last matched character
    node: NodeId,
    /// Characters of that edge matched; equals the edge length at a node
    matched: usize,
}

impl SuffixTree {
    pub(crate) fn new(
        config: IndexConfig,
        text: Arc<[char]>,
        nodes: Vec<Node>,
        spans: Vec<TextSpan>,
    ) -> Self {
        Self {
            config,
            text,
            nodes,
            spans,
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn terminator(&self) -> char {
        self.config.terminator
    }

    /// The shared text buffer
    pub fn text_buffer(&self) -> &Arc<[char]> {
        &self.text
    }

    /// Total number of characters, terminators included
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    pub fn text_count(&self) -> usize {
        self.spans.len()
    }

    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    /// Characters of text `text_index`, terminator included
    pub fn text(&self, text_index: usize) -> Result<&[char]> {
        let span = self
            .spans
            .get(text_index)
            .ok_or_else(|| Error::out_of_range("texts", text_index, self.spans.len()))?;
        Ok(&self.text[span.begin..span.end])
    }

    /// Buffer position of the first character of text `text_index`
    pub fn text_begin(&self, text_index: usize) -> Result<TextPosition> {
        self.spans
            .get(text_index)
            .map(|span| span.begin)
            .ok_or_else(|| Error::out_of_range("texts", text_index, self.spans.len()))
    }

    /// Characters of the buffer in `start..end`
    pub fn slice(&self, start: TextPosition, end: TextPosition) -> Result<&[char]> {
        if end > self.text.len() {
            return Err(Error::out_of_range("text positions", end, self.text.len()));
        }
        if start > end {
            return Err(Error::out_of_range("text positions", start, end));
        }
        Ok(&self.text[start..end])
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    pub fn get_node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| Error::out_of_range("nodes", id, self.nodes.len()))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Terminal nodes in id order
    pub fn leaves(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|n| n.is_terminal())
    }

    /// Child of `id` whose edge starts with `ch`
    pub fn child_of(&self, id: NodeId, ch: char) -> Option<NodeId> {
        self.nodes.get(id)?.children.get(ch)
    }

    pub fn suffix_link_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.suffix_link
    }

    /// Label of the edge leading into `id`
    pub fn edge_label(&self, id: NodeId) -> Result<&[char]> {
        let node = self.get_node(id)?;
        Ok(&self.text[node.start..node.end])
    }

    /// Concatenated edge labels from the root down to `id`
    pub fn path_label(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut current = self.nodes.get(id);
        while let Some(node) = current {
            parts.push(&self.text[node.start..node.end]);
            current = node.parent.and_then(|p| self.nodes.get(p));
        }
        parts.iter().rev().flat_map(|part| part.iter()).collect()
    }

    /// Length of the longest prefix of `pattern` spelled by a path from the root
    pub fn longest_path(&self, pattern: &str) -> usize {
        let pattern = self.fold(pattern);
        self.locate(&pattern).0
    }

    /// Whether `pattern` occurs in any text
    pub fn contains(&self, pattern: &str) -> bool {
        let pattern = self.fold(pattern);
        let (matched, _) = self.locate(&pattern);
        matched == pattern.len()
    }

    /// Whether `pattern` is a suffix of some text (terminator not included)
    pub fn is_suffix(&self, pattern: &str) -> bool {
        let mut pattern = self.fold(pattern);
        pattern.push(self.config.terminator);
        let (matched, _) = self.locate(&pattern);
        matched == pattern.len()
    }

    /// Explicit node whose path label is exactly `pattern`
    pub fn find_node(&self, pattern: &str) -> Option<NodeId> {
        let pattern = self.fold(pattern);
        match self.locate(&pattern) {
            (matched, Some(locus))
                if matched == pattern.len() && locus.matched == self.nodes[locus.node].edge_len() =>
            {
                Some(locus.node)
            }
            (0, None) if pattern.is_empty() => Some(ROOT),
            _ => None,
        }
    }

    /// Every suffix starting with `pattern`, i.e. every occurrence of it
    ///
    /// Positions come out in depth-first order below the match point.
    pub fn occurrences(&self, pattern: &str) -> Vec<NodePosition> {
        let pattern = self.fold(pattern);
        let below = match self.locate(&pattern) {
            (matched, Some(locus)) if matched == pattern.len() => locus.node,
            (_, None) if pattern.is_empty() => ROOT,
            _ => return Vec::new(),
        };

        let mut found = Vec::new();
        let mut stack = vec![below];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            found.extend_from_slice(&node.positions);
            // Reverse so that the smallest character is visited first.
            stack.extend(node.children.iter().rev().map(|(_, child)| child));
        }
        found
    }

    /// Follow `pattern` from the root as far as the tree allows
    fn locate(&self, pattern: &[char]) -> (usize, Option<Locus>) {
        let mut matched = 0;
        let mut locus = None;
        let mut node = ROOT;

        while matched < pattern.len() {
            let Some(child) = self.nodes[node].children.get(pattern[matched]) else {
                break;
            };
            let label = &self.text[self.nodes[child].start..self.nodes[child].end];
            let common = label
                .iter()
                .zip(&pattern[matched..])
                .take_while(|(a, b)| a == b)
                .count();

            matched += common;
            locus = Some(Locus {
                node: child,
                matched: common,
            });
            if common < label.len() {
                break;
            }
            node = child;
        }

        (matched, locus)
    }

    fn fold(&self, pattern: &str) -> Vec<char> {
        pattern.chars().map(|c| self.config.fold(c)).collect()
    }
}
