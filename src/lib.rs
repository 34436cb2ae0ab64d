//! # wildtree - Suffix tree index for wildcard pattern search
//!
//! wildtree answers "where does this pattern occur" over a fixed text, where
//! the pattern may contain up to `k` single-symbol wildcards. The bound `k`
//! is chosen when the index is built.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`text`] - Symbols, terminated texts and wildcard patterns
//! - [`index`] - Suffix tree, LCA, ladders and wildcard copies
//! - [`predecessor`] - X-fast / Y-fast predecessor structures
//! - [`query`] - Query planning and execution
//! - [`output`] - Result formatting (text or JSON)
//!
//! ## Quick Start
//!
//! ```
//! use wildtree::{IndexConfig, WildcardIndex};
//!
//! let index = WildcardIndex::from_text("BANANA", IndexConfig::with_budget(1)).unwrap();
//! assert_eq!(index.query_str("ANA").unwrap(), vec![1, 3]);
//! assert_eq!(index.query_str("A*A").unwrap(), vec![1, 3]);
//! ```
//!
//! ## How queries run
//!
//! 1. **Segments** - The pattern is cut at its wildcards into literal runs
//! 2. **Rooted placement** - A run starting at a tree root is placed with a
//!    rank lookup, one LCA query and one measured-ancestor query
//! 3. **Wildcard steps** - Between runs, a wildcard either follows the
//!    centroid edge in place or enters the wildcard copy of the current node
//!
//! Wildcard copies exclude the heaviest child, which keeps the index at
//! O(n log^k n) nodes instead of copying whole subtrees.

pub mod config;
pub mod error;
pub mod index;
pub mod output;
pub mod predecessor;
pub mod query;
pub mod text;

pub use config::IndexConfig;
pub use error::{Error, Result};
pub use index::{IndexStats, SuffixTree, WildcardIndex};
pub use predecessor::PredecessorIndex;
pub use query::QueryExecutor;
pub use text::{Pattern, Symbol, Text};
