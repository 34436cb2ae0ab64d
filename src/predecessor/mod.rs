//! Static integer predecessor/successor structures
//!
//! - `xfast`: X-fast trie, one hash table per bit level
//! - `yfast`: Y-fast trie built on top of it ([`PredecessorIndex`])
//!
//! Both are batch-built once and answer `has_key`, `predecessor` and
//! `successor` in O(log log U). The suffix tree uses them for leaf-rank
//! neighbours and for height lookups along ladders.

pub mod xfast;
pub mod yfast;

pub use xfast::XFastTrie;
pub use yfast::PredecessorIndex;
