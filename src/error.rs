//! Error types.
//!
//! Matching itself never fails from a caller's point of view: every problem
//! while evaluating a rule collapses into "no match" and the engine falls
//! through to the next tier. The only caller-visible failures come from
//! loading a rule catalog.

use std::path::PathBuf;
use thiserror::Error;

/// Raised while loading or validating a rule catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("rule #{index} ({pattern:?}) is invalid: {reason}")]
    InvalidRule { index: usize, pattern: String, reason: String },
}

/// Raised by the matcher when a single attempt exceeds its search budget.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    #[error("pattern search exceeded {limit} steps")]
    BudgetExhausted { limit: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let invalid = CatalogError::InvalidRule {
            index: 3,
            pattern: "(* ?->a *)".into(),
            reason: "template placeholder {b} is not captured by the pattern".into(),
        };
        assert_eq!(
            invalid.to_string(),
            "rule #3 (\"(* ?->a *)\") is invalid: template placeholder {b} is not captured by the pattern"
        );

        let exhausted = MatchError::BudgetExhausted { limit: 64 };
        assert_eq!(exhausted.to_string(), "pattern search exceeded 64 steps");
    }
}
