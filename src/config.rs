//! Index build configuration.

use crate::error::{Error, Result};
use crate::text::DEFAULT_WILDCARD_CHAR;
use serde::{Deserialize, Serialize};

/// Configuration for building a [`WildcardIndex`](crate::WildcardIndex)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Maximum number of wildcards a query may contain (default: 1)
    ///
    /// Space grows by roughly a `log n` factor per unit of budget.
    pub wildcard_budget: u32,
    /// Character that denotes a wildcard in pattern strings (default: `*`)
    pub wildcard_char: char,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            wildcard_budget: 1,
            wildcard_char: DEFAULT_WILDCARD_CHAR,
        }
    }
}

impl IndexConfig {
    pub fn with_budget(wildcard_budget: u32) -> Self {
        Self {
            wildcard_budget,
            ..Default::default()
        }
    }

    /// Parse a JSON configuration document; missing fields take defaults
    pub fn from_json(input: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.wildcard_char == '$' {
            return Err(Error::Config(
                "'$' is reserved for the end-of-text symbol".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IndexConfig::default();
        assert_eq!(config.wildcard_budget, 1);
        assert_eq!(config.wildcard_char, '*');
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = IndexConfig::from_json(r#"{"wildcard_budget": 3}"#).unwrap();
        assert_eq!(config.wildcard_budget, 3);
        assert_eq!(config.wildcard_char, '*');
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            IndexConfig::from_json("{not json"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            IndexConfig::from_json(r#"{"wildcard_char": "$"}"#),
            Err(Error::Config(_))
        ));
    }
}
