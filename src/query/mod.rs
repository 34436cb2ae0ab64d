pub mod executor;
pub mod naive;
pub mod planner;

pub use executor::{Match, QueryExecutor};
pub use naive::{naive_offsets, scan_offsets};
pub use planner::{QueryPlan, SegmentProbe};

use crate::error::Result;
use crate::index::WildcardIndex;
use crate::text::Pattern;

impl WildcardIndex {
    /// Sorted start offsets of every occurrence of `pattern`
    pub fn query(&self, pattern: &Pattern) -> Result<Vec<usize>> {
        let offsets = QueryExecutor::new(self).execute(pattern)?;
        tracing::debug!(%pattern, matches = offsets.len(), "query");
        Ok(offsets)
    }

    /// Parse with the configured wildcard character, then [`query`](Self::query)
    pub fn query_str(&self, pattern: &str) -> Result<Vec<usize>> {
        self.query(&Pattern::parse(pattern, self.config.wildcard_char))
    }

    /// Reference path: same segment threading, plain descents instead of
    /// rank lookups
    pub fn slow_query(&self, pattern: &Pattern) -> Result<Vec<usize>> {
        QueryExecutor::new(self).execute_slow(pattern)
    }

    /// Exhaustive walk of the root tree. Ignores the wildcard budget.
    pub fn naive_query(&self, pattern: &Pattern) -> Result<Vec<usize>> {
        if pattern.is_empty() {
            return Err(crate::Error::EmptyPattern);
        }
        Ok(naive_offsets(&self.tree, pattern.symbols()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, IndexConfig, Pattern, WildcardIndex};

    #[test]
    fn test_query_surfaces_agree() {
        let index = WildcardIndex::from_text("BANANA", IndexConfig::default()).unwrap();
        let pattern = Pattern::parse("A*A", '*');
        assert_eq!(index.query(&pattern).unwrap(), vec![1, 3]);
        assert_eq!(index.slow_query(&pattern).unwrap(), vec![1, 3]);
        assert_eq!(index.naive_query(&pattern).unwrap(), vec![1, 3]);
        assert_eq!(index.query_str("ANA").unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_custom_wildcard_char() {
        let config = IndexConfig {
            wildcard_char: '?',
            ..IndexConfig::default()
        };
        let index = WildcardIndex::from_text("A*B", config).unwrap();
        assert_eq!(index.query_str("?*").unwrap(), vec![0]);
        assert_eq!(index.query_str("*?").unwrap(), vec![1]);
    }

    #[test]
    fn test_budget_is_enforced() {
        let index = WildcardIndex::from_text("BANANA", IndexConfig::with_budget(1)).unwrap();
        assert!(matches!(
            index.query_str("A*A*"),
            Err(Error::WildcardBudgetExceeded { wildcards: 2, budget: 1 })
        ));
        // The oracle has no budget
        let pattern = Pattern::parse("A*A*", '*');
        assert_eq!(index.naive_query(&pattern).unwrap(), vec![1]);
        assert!(matches!(index.query_str(""), Err(Error::EmptyPattern)));
    }
}
