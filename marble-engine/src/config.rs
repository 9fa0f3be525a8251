//! Evaluator configuration types
//!
//! The defaults reproduce the illustrated operator behavior exactly, including
//! three known quirks. Each quirk can be switched off explicitly; a caller that
//! does so gets the textbook semantics instead of the diagrammed ones.

use serde::{Deserialize, Serialize};

/// Configuration shared by all operator evaluators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// How `zip` bounds the number of pairs it emits
    #[serde(default)]
    pub zip_bound: ZipBound,

    /// Whether `withLatestFrom` ignores the primary input's first event
    #[serde(default = "default_true")]
    pub with_latest_from_skip_first: bool,

    /// Whether `merge` sorts its output by time
    #[serde(default)]
    pub merge_sorted: bool,
}

fn default_true() -> bool {
    true
}

/// Length bound used by `zip`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZipBound {
    /// Shortest of inputs 1..n; input 0's length is not considered
    #[default]
    NonPrimary,
    /// Shortest of all inputs
    AllInputs,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            zip_bound: ZipBound::NonPrimary,
            with_latest_from_skip_first: true,
            merge_sorted: false,
        }
    }
}

impl EvaluatorConfig {
    /// Create a configuration with the reference behavior
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the zip bound
    pub fn with_zip_bound(mut self, bound: ZipBound) -> Self {
        self.zip_bound = bound;
        self
    }

    /// Builder method: skip (or keep) the first primary event in withLatestFrom
    pub fn with_skip_first(mut self, skip: bool) -> Self {
        self.with_latest_from_skip_first = skip;
        self
    }

    /// Builder method: time-sort merge output
    pub fn with_sorted_merge(mut self, sorted: bool) -> Self {
        self.merge_sorted = sorted;
        self
    }

    /// Configuration with every quirk switched off
    pub fn corrected() -> Self {
        Self::new()
            .with_zip_bound(ZipBound::AllInputs)
            .with_skip_first(false)
            .with_sorted_merge(true)
    }

    /// True if this configuration matches the illustrated behavior
    pub fn is_reference(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference() {
        let config = EvaluatorConfig::new();
        assert_eq!(config.zip_bound, ZipBound::NonPrimary);
        assert!(config.with_latest_from_skip_first);
        assert!(!config.merge_sorted);
        assert!(config.is_reference());
    }

    #[test]
    fn test_builder() {
        let config = EvaluatorConfig::new()
            .with_zip_bound(ZipBound::AllInputs)
            .with_skip_first(false);

        assert_eq!(config.zip_bound, ZipBound::AllInputs);
        assert!(!config.with_latest_from_skip_first);
        assert!(!config.merge_sorted);
        assert!(!config.is_reference());
        assert_eq!(EvaluatorConfig::corrected(), config.with_sorted_merge(true));
    }

    #[test]
    fn test_empty_json_gives_reference() {
        let config: EvaluatorConfig = serde_json::from_str("{}").unwrap();
        assert!(config.is_reference());

        let config: EvaluatorConfig =
            serde_json::from_str(r#"{"zip_bound": "all_inputs"}"#).unwrap();
        assert_eq!(config.zip_bound, ZipBound::AllInputs);
        assert!(config.with_latest_from_skip_first);
    }
}
