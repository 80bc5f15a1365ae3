//! Error types for pinrank.
//!
//! Only control-plane operations (rule CRUD) surface errors. Data-plane
//! anomalies - a promotion referencing a deleted document, two promotions
//! fighting over one position - are absorbed by the splicer, which always
//! returns a valid list.

use thiserror::Error;

/// Errors that can occur during rule store operations.
///
/// All variants are control-plane failures surfaced to the caller. The store
/// is never mutated when an operation returns an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A rule with this id already exists in the store
    #[error("Duplicate rule id: {0}")]
    DuplicateRuleId(String),
    /// No rule with this id exists in the store
    #[error("Rule not found: {0}")]
    RuleNotFound(String),
    /// The rule failed structural validation
    #[error("Invalid rule '{id}': {reason}")]
    InvalidRule {
        /// Id of the offending rule
        id: String,
        /// Which field failed validation and why
        reason: String,
    },
}
