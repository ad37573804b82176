//! Transition network data model
//!
//! States, suffix elements and transitions are append-only tables; an index
//! handed out once stays valid for the lifetime of the network.

use crate::config::Direction;
use crate::error::{Error, Result};
use crate::index::suffix_tree::NodeId;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;

/// A state, keyed by the tree node it was created from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct State {
    pub origin_node: NodeId,
    pub transitions: Vec<Transition>,
}

/// Interval of the text buffer labelling a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuffixElement {
    pub start: usize,
    pub end: usize,
}

impl SuffixElement {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Outgoing transition of a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub to_state: usize,
    pub to_suffix: usize,
}

/// Finite-state network derived from a suffix tree
#[derive(Debug, Clone, Serialize)]
pub struct TransitionNetwork {
    #[serde(skip)]
    text: Arc<[char]>,
    direction: Direction,
    states: Vec<State>,
    suffixes: Vec<SuffixElement>,
    #[serde(skip)]
    state_index: FxHashMap<NodeId, usize>,
}

impl TransitionNetwork {
    /// Create an empty network reading labels from `text`
    pub fn new(text: Arc<[char]>, direction: Direction) -> Self {
        Self {
            text,
            direction,
            states: Vec::new(),
            suffixes: Vec::new(),
            state_index: FxHashMap::default(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Index of the state for `node`, appending a new state if there is none
    pub fn add_state(&mut self, node: NodeId) -> usize {
        if let Some(&index) = self.state_index.get(&node) {
            return index;
        }
        let index = self.states.len();
        self.states.push(State {
            origin_node: node,
            transitions: Vec::new(),
        });
        self.state_index.insert(node, index);
        index
    }

    pub fn add_suffix_element(&mut self, element: SuffixElement) -> usize {
        self.suffixes.push(element);
        self.suffixes.len() - 1
    }

    /// Append a transition to the outgoing list of state `from`
    pub fn add_transition(&mut self, from: usize, transition: Transition) -> Result<()> {
        if transition.to_state >= self.states.len() {
            return Err(Error::out_of_range("states", transition.to_state, self.states.len()));
        }
        if transition.to_suffix >= self.suffixes.len() {
            return Err(Error::out_of_range(
                "suffix elements",
                transition.to_suffix,
                self.suffixes.len(),
            ));
        }
        let len = self.states.len();
        let state = self
            .states
            .get_mut(from)
            .ok_or_else(|| Error::out_of_range("states", from, len))?;
        state.transitions.push(transition);
        Ok(())
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn suffix_elements(&self) -> &[SuffixElement] {
        &self.suffixes
    }

    pub fn state(&self, index: usize) -> Result<&State> {
        self.states
            .get(index)
            .ok_or_else(|| Error::out_of_range("states", index, self.states.len()))
    }

    pub fn suffix_element(&self, index: usize) -> Result<&SuffixElement> {
        self.suffixes
            .get(index)
            .ok_or_else(|| Error::out_of_range("suffix elements", index, self.suffixes.len()))
    }

    pub fn transitions_of(&self, state: usize) -> Result<&[Transition]> {
        Ok(&self.state(state)?.transitions)
    }

    /// State created for tree node `node`, if any
    pub fn state_of(&self, node: NodeId) -> Option<usize> {
        self.state_index.get(&node).copied()
    }

    /// The state of the tree root; `None` for an empty network
    pub fn initial_state(&self) -> Option<usize> {
        if self.states.is_empty() { None } else { Some(0) }
    }

    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Label of a suffix element, read in the network's direction
    pub fn label(&self, suffix: usize) -> Result<String> {
        let chars = self.raw_label(suffix)?;
        Ok(match self.direction {
            Direction::Forward => chars.iter().collect(),
            Direction::Reversed => chars.iter().rev().collect(),
        })
    }

    /// Every text spelled by a path from the initial state to a final state
    ///
    /// Paths come out in transition order. With [`Direction::Reversed`] each
    /// path is read back to front, which turns a network over reversed texts
    /// into one yielding the original texts.
    pub fn recognized_texts(&self) -> Vec<String> {
        let Some(initial) = self.initial_state() else {
            return Vec::new();
        };

        let mut texts = Vec::new();
        let mut path: Vec<char> = Vec::new();
        // (state, next transition, path length on entry)
        let mut stack = vec![(initial, 0usize, 0usize)];

        while let Some((state, next, base)) = stack.last_mut() {
            let transitions = &self.states[*state].transitions;
            if transitions.is_empty() && *next == 0 {
                let text: String = match self.direction {
                    Direction::Forward => path.iter().collect(),
                    Direction::Reversed => path.iter().rev().collect(),
                };
                texts.push(text);
            }

            match transitions.get(*next) {
                Some(transition) => {
                    *next += 1;
                    path.truncate(*base);
                    let element = self.suffixes[transition.to_suffix];
                    let base = path.len();
                    path.extend_from_slice(&self.text[element.start..element.end]);
                    stack.push((transition.to_state, 0, base + element.len()));
                }
                None => {
                    stack.pop();
                }
            }
        }

        texts
    }

    /// Whether `text` is one of the [`recognized_texts`](Self::recognized_texts)
    ///
    /// With [`Direction::Reversed`] the input is reversed before it is
    /// matched against the stored labels.
    pub fn recognizes(&self, text: &str) -> bool {
        let mut chars: Vec<char> = text.chars().collect();
        if self.direction == Direction::Reversed {
            chars.reverse();
        }
        matches!(self.follow(&chars), Some((state, true)) if self.states[state].transitions.is_empty())
    }

    /// Whether `pattern` is a prefix of some recognized text
    pub fn matches_prefix(&self, pattern: &str) -> bool {
        match self.direction {
            Direction::Forward => {
                let chars: Vec<char> = pattern.chars().collect();
                self.follow(&chars).is_some()
            }
            // A prefix of a reversed path ends at a leaf, so no walk from the
            // initial state can anchor it.
            Direction::Reversed => self
                .recognized_texts()
                .iter()
                .any(|text| text.starts_with(pattern)),
        }
    }

    /// Follow `input` from the initial state
    ///
    /// Returns the state reached and whether the input ended exactly on it,
    /// or `None` if the network cannot spell `input`.
    fn follow(&self, input: &[char]) -> Option<(usize, bool)> {
        let mut state = self.initial_state()?;
        let mut consumed = 0;

        while consumed < input.len() {
            let rest = &input[consumed..];
            let (transition, label) = self.states[state].transitions.iter().find_map(|t| {
                let element = self.suffixes[t.to_suffix];
                let label = &self.text[element.start..element.end];
                (label.first() == rest.first()).then_some((t, label))
            })?;

            let common = label.iter().zip(rest).take_while(|(a, b)| a == b).count();
            if common < label.len() {
                // Input ends or diverges inside the label.
                return (common == rest.len()).then_some((transition.to_state, false));
            }
            consumed += common;
            state = transition.to_state;
        }

        Some((state, true))
    }

    fn raw_label(&self, suffix: usize) -> Result<&[char]> {
        let element = self.suffix_element(suffix)?;
        Ok(&self.text[element.start..element.end])
    }
}
