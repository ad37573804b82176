//! Transition networks derived from suffix trees
//!
//! ## Architecture
//!
//! - `builder`: Tree listener emitting the paths of whole input texts
//! - `network`: States, suffix elements and transitions
//!
//! ```no_run
//! use suffixnet::automaton::build_network;
//! use suffixnet::config::Direction;
//! use suffixnet::index::SuffixTreeBuilder;
//!
//! let mut builder = SuffixTreeBuilder::with_defaults();
//! builder.append_text("xabxac")?;
//! builder.append_text("xabxaa")?;
//! let tree = builder.finish()?;
//!
//! let network = build_network(&tree, Direction::Forward)?;
//! assert!(network.recognizes("xabxaa$"));
//! # Ok::<(), suffixnet::Error>(())
//! ```

pub mod builder;
pub mod network;

pub use builder::{build_network, build_network_with, AutomatonBuilder};
pub use network::{State, SuffixElement, Transition, TransitionNetwork};
