//! Error types for index construction and queries.

use thiserror::Error;

/// Errors surfaced to callers of the index.
///
/// "No match" is never an error: queries return an empty offset list and
/// neighbour lookups return `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// The predecessor index was handed the same key twice
    #[error("duplicate key in predecessor index input: {0}")]
    DuplicateKey(u64),

    /// The predecessor index was handed no keys at all
    #[error("predecessor index needs at least one key")]
    EmptyKeySet,

    /// The pattern has more wildcards than the index was built for
    #[error("pattern has {wildcards} wildcards but the index was built for at most {budget}")]
    WildcardBudgetExceeded { wildcards: usize, budget: u32 },

    /// The pattern contains the terminator symbol
    #[error("pattern contains the end-of-text symbol")]
    EndInPattern,

    /// The pattern has no symbols
    #[error("pattern is empty")]
    EmptyPattern,

    /// The text contains the terminator before its last position
    #[error("text contains the end-of-text symbol before its end")]
    EndInText,

    /// The text contains a wildcard symbol
    #[error("text contains a wildcard symbol")]
    WildcardInText,

    /// Text positions are stored as `u32`
    #[error("text of {len} symbols is too long to index (limit is {max})", max = u32::MAX)]
    TextTooLong { len: usize },

    /// An unrooted match was started from a point that is not on the edge
    #[error("malformed unrooted match start: {above} symbols above a node whose edge has {edge_len}")]
    MalformedLocus { above: usize, edge_len: usize },

    /// Invalid index configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

/// A specialized Result type for index operations.
pub type Result<T> = std::result::Result<T, Error>;
