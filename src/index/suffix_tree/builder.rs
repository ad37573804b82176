//! Online generalized suffix tree builder
//!
//! Builds a suffix tree over several terminator-delimited texts with
//! Ukkonen's algorithm, one character at a time:
//! 1. Every leaf edge of the text being read ends at that text's open
//!    [`EndCounter`], so advancing the counter extends all of them at once
//! 2. Missing suffixes are inserted as new leaves, splitting an edge first
//!    when the active point lies inside it
//! 3. A suffix that is already present ends the phase early
//!
//! All texts share one terminator. A suffix that already ends at a leaf of
//! an earlier text is recorded on that leaf instead of creating a new node,
//! and a prefix the next text shares with earlier texts is absorbed by rule 3
//! without creating nodes.

use super::reader::SuffixTree;
use super::types::*;
use crate::config::IndexConfig;
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::{debug, trace};

/// A node while the tree is still growing
#[derive(Debug)]
struct BuildNode {
    parent: Option<NodeId>,
    suffix_link: Option<NodeId>,
    start: TextPosition,
    end: End,
    children: Children,
    /// `(text_index, suffix_start)` of every suffix ending here
    positions: Vec<(usize, TextPosition)>,
}

/// Builder for constructing a generalized suffix tree character by character
pub struct SuffixTreeBuilder {
    config: IndexConfig,
    /// Shared text buffer, all texts concatenated with their terminators
    text: Vec<char>,
    nodes: Vec<BuildNode>,
    /// One end counter per text, indexed by text index
    counters: Vec<EndCounter>,
    spans: Vec<TextSpan>,
    /// Text currently being read, if any
    open_text: Option<usize>,
    active: ActivePoint,
    /// Suffixes of the current phase still waiting for insertion
    remainder: usize,
}

impl SuffixTreeBuilder {
    /// Create a new builder with the given configuration
    ///
    /// The configuration is validated first. A terminator that folding would
    /// change could never close a text.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Create a builder with default configuration
    pub fn with_defaults() -> Self {
        Self::with_config(IndexConfig::default())
    }

    fn with_config(config: IndexConfig) -> Self {
        let root = BuildNode {
            parent: None,
            suffix_link: None,
            start: 0,
            end: End::Fixed(0),
            children: Children::default(),
            positions: Vec::new(),
        };

        Self {
            config,
            text: Vec::new(),
            nodes: vec![root],
            counters: Vec::new(),
            spans: Vec::new(),
            open_text: None,
            active: ActivePoint::default(),
            remainder: 0,
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Extend the tree by one character of text `text_index`
    ///
    /// Texts are numbered from zero in the order they are appended. A text
    /// opens with its first character and closes with the terminator. The
    /// call is validated before anything is modified, so a rejected
    /// character leaves the builder as it was.
    pub fn append_character(&mut self, ch: char, text_index: usize) -> Result<()> {
        let ch = self.config.fold(ch);
        self.check_text_index(text_index)?;

        let pos = self.text.len();
        if self.open_text.is_none() {
            self.open_text(text_index, pos);
        }

        self.text.push(ch);
        self.extend(pos, text_index);

        if self.config.is_terminator(ch) {
            self.close_text(text_index, pos);
        }

        Ok(())
    }

    /// Append a whole text followed by the terminator
    ///
    /// Returns the index assigned to the text. Text containing the
    /// terminator is rejected before any character is appended.
    pub fn append_text(&mut self, text: &str) -> Result<usize> {
        if let Some(open) = self.open_text {
            return Err(Error::invalid_input(format!(
                "text {} is still open; terminate it before appending another text",
                open
            )));
        }

        let text_index = self.spans.len();
        if let Some(offset) = text
            .chars()
            .position(|c| self.config.is_terminator(self.config.fold(c)))
        {
            return Err(Error::invalid_input(format!(
                "terminator {:?} inside text {} at offset {}",
                self.config.terminator, text_index, offset
            )));
        }

        for ch in text.chars() {
            self.append_character(ch, text_index)?;
        }
        self.append_character(self.config.terminator, text_index)?;

        Ok(text_index)
    }

    /// Close construction and hand out the finished tree
    ///
    /// Fails if a text was started but never terminated.
    pub fn finish(self) -> Result<SuffixTree> {
        if let Some(open) = self.open_text {
            return Err(Error::invalid_input(format!(
                "text {} was not terminated before finish",
                open
            )));
        }

        let counters = self.counters;
        let spans = self.spans;
        let nodes = self
            .nodes
            .into_iter()
            .enumerate()
            .map(|(id, node)| {
                let end = match node.end {
                    End::Fixed(e) => e,
                    End::Open(handle) => counters[handle].value(),
                };
                let positions = node
                    .positions
                    .into_iter()
                    .map(|(text_index, start)| NodePosition {
                        text_index,
                        start,
                        end: spans[text_index].end,
                    })
                    .collect();
                Node {
                    id,
                    parent: node.parent,
                    suffix_link: node.suffix_link,
                    start: node.start,
                    end,
                    children: node.children,
                    positions,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            texts = spans.len(),
            chars = self.text.len(),
            nodes = nodes.len(),
            "suffix tree finished"
        );

        Ok(SuffixTree::new(self.config, Arc::from(self.text), nodes, spans))
    }

    /// Number of characters appended so far, terminators included
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// Number of texts started so far
    pub fn text_count(&self) -> usize {
        self.spans.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn remainder(&self) -> usize {
        self.remainder
    }

    pub fn active_point(&self) -> ActivePoint {
        self.active
    }

    pub fn is_text_open(&self) -> bool {
        self.open_text.is_some()
    }

    fn check_text_index(&self, text_index: usize) -> Result<()> {
        match self.open_text {
            Some(open) if open == text_index => Ok(()),
            Some(open) => Err(Error::invalid_input(format!(
                "character for text {} while text {} is still open",
                text_index, open
            ))),
            None => {
                let expected = self.spans.len();
                if text_index < expected {
                    Err(Error::invalid_input(format!(
                        "character for text {} after its terminator",
                        text_index
                    )))
                } else if text_index > expected {
                    Err(Error::invalid_input(format!(
                        "expected text {}, got text {}",
                        expected, text_index
                    )))
                } else {
                    Ok(())
                }
            }
        }
    }

    fn open_text(&mut self, text_index: usize, pos: TextPosition) {
        debug_assert_eq!(self.remainder, 0);
        self.counters.push(EndCounter::Open(pos));
        self.spans.push(TextSpan {
            begin: pos,
            end: pos,
        });
        self.open_text = Some(text_index);
        debug!(text_index, begin = pos, "text opened");
    }

    fn close_text(&mut self, text_index: usize, pos: TextPosition) {
        // Every suffix of the text now ends at a leaf.
        debug_assert_eq!(self.remainder, 0);
        debug_assert!(self.counters[text_index].is_open());
        self.counters[text_index] = EndCounter::Frozen(pos + 1);
        self.spans[text_index].end = pos + 1;
        self.open_text = None;
        self.active = ActivePoint::default();
        self.remainder = 0;
        debug!(
            text_index,
            end = pos + 1,
            nodes = self.nodes.len(),
            "text closed"
        );
    }

    /// Run one phase of Ukkonen's algorithm for the character at `pos`
    fn extend(&mut self, pos: TextPosition, text_index: usize) {
        let ch = self.text[pos];
        let is_terminator = self.config.is_terminator(ch);

        // Rule 1: every open leaf of this text grows by one.
        self.counters[text_index] = EndCounter::Open(pos + 1);
        self.remainder += 1;
        let mut pending_link: Option<NodeId> = None;

        while self.remainder > 0 {
            if self.active.length == 0 {
                self.active.edge = pos;
            }
            let suffix_start = pos + 1 - self.remainder;
            let edge_char = self.text[self.active.edge];

            match self.nodes[self.active.node].children.get(edge_char) {
                None => {
                    // Rule 2 at a node.
                    let leaf = self.new_leaf(self.active.node, pos, text_index, suffix_start);
                    self.nodes[self.active.node].children.insert(edge_char, leaf);
                    if let Some(node) = pending_link.take() {
                        self.nodes[node].suffix_link = Some(self.active.node);
                    }
                    trace!(pos, leaf, parent = self.active.node, "leaf added");
                }
                Some(next) => {
                    let edge_len = self.edge_len(next);
                    if self.active.length >= edge_len {
                        // Walk down and retry from the child.
                        self.active.edge += edge_len;
                        self.active.length -= edge_len;
                        self.active.node = next;
                        continue;
                    }

                    let probe = self.nodes[next].start + self.active.length;
                    if self.text[probe] == ch {
                        if let Some(node) = pending_link.take() {
                            self.nodes[node].suffix_link = Some(self.active.node);
                        }

                        if !is_terminator {
                            // Rule 3: already present, phase ends.
                            self.active.length += 1;
                            trace!(pos, remainder = self.remainder, "showstopper");
                            break;
                        }

                        // The terminator only ever closes a leaf edge, so this
                        // suffix ends at a leaf of an earlier text.
                        debug_assert!(self.nodes[next].children.is_empty());
                        self.nodes[next].positions.push((text_index, suffix_start));
                        trace!(pos, leaf = next, "suffix shared with earlier text");
                    } else {
                        // Rule 2 inside an edge: split it first.
                        let split = self.split_edge(self.active.node, edge_char, next, probe);
                        let leaf = self.new_leaf(split, pos, text_index, suffix_start);
                        self.nodes[split].children.insert(ch, leaf);
                        if let Some(node) = pending_link.replace(split) {
                            self.nodes[node].suffix_link = Some(split);
                        }
                        trace!(pos, split, leaf, "edge split");
                    }
                }
            }

            self.remainder -= 1;
            if self.active.node == ROOT && self.active.length > 0 {
                self.active.length -= 1;
                self.active.edge = pos + 1 - self.remainder;
            } else if self.active.node != ROOT {
                self.active.node = self.nodes[self.active.node].suffix_link.unwrap_or(ROOT);
            }
        }
    }

    /// Current length of the edge leading into `node`
    fn edge_len(&self, node: NodeId) -> usize {
        let n = &self.nodes[node];
        let end = match n.end {
            End::Fixed(e) => e,
            End::Open(handle) => self.counters[handle].value(),
        };
        end - n.start
    }

    fn new_leaf(
        &mut self,
        parent: NodeId,
        pos: TextPosition,
        text_index: usize,
        suffix_start: TextPosition,
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(BuildNode {
            parent: Some(parent),
            suffix_link: None,
            start: pos,
            end: End::Open(text_index),
            children: Children::default(),
            positions: vec![(text_index, suffix_start)],
        });
        id
    }

    /// Insert an internal node on the edge `parent -> child` ending at `at`
    fn split_edge(
        &mut self,
        parent: NodeId,
        edge_char: char,
        child: NodeId,
        at: TextPosition,
    ) -> NodeId {
        let id = self.nodes.len();
        let start = self.nodes[child].start;

        let mut children = Children::default();
        children.insert(self.text[at], child);
        self.nodes.push(BuildNode {
            parent: Some(parent),
            // Overwritten before the phase ends.
            suffix_link: Some(ROOT),
            start,
            end: End::Fixed(at),
            children,
            positions: Vec::new(),
        });

        self.nodes[parent].children.insert(edge_char, id);
        self.nodes[child].start = at;
        self.nodes[child].parent = Some(id);
        id
    }
}
