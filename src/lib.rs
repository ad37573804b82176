//! # suffixnet - Suffix Trees to Transition Networks
//!
//! suffixnet builds a generalized suffix tree over one or more
//! terminator-delimited texts in linear time, then turns the finished tree
//! into a compact transition network for suffix and substring lookup.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Suffix tree construction, read access and depth-first walks
//! - [`automaton`] - Transition networks built from a walk over the tree
//! - [`config`] - Terminator, case folding and label direction
//! - [`output`] - Terminal rendering of trees, networks and statistics
//! - [`error`] - Error type shared by all of the above
//!
//! ## Quick Start
//!
//! ```ignore
//! use suffixnet::automaton::build_network;
//! use suffixnet::config::Direction;
//! use suffixnet::index::SuffixTreeBuilder;
//!
//! let mut builder = SuffixTreeBuilder::with_defaults();
//! builder.append_text("xabxac").unwrap();
//! builder.append_text("xabxaa").unwrap();
//! let tree = builder.finish().unwrap();
//!
//! assert!(tree.contains("bxa"));
//!
//! let network = build_network(&tree, Direction::Forward).unwrap();
//! for text in network.recognized_texts() {
//!     println!("{}", text);
//! }
//! ```
//!
//! ## Construction
//!
//! Characters are fed one at a time with
//! [`SuffixTreeBuilder::append_character`](index::SuffixTreeBuilder::append_character).
//! Leaf edges of the text being read share one open end counter, so each
//! character costs amortized constant time. Construction and walks are
//! single-threaded and deterministic.

pub mod automaton;
pub mod config;
pub mod error;
pub mod index;
pub mod output;

pub use config::{Direction, IndexConfig};
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the given default level
///
/// `RUST_LOG` takes precedence when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
