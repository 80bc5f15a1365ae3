//! Shared builders for unit tests. Only compiled when running tests.

use crate::pinning::types::{Anchoring, Condition, Consequence, PinRule, Promotion};

/// Builds a condition with the given anchoring mode.
pub fn condition(anchoring: Anchoring, pattern: &str) -> Condition {
    Condition {
        anchoring,
        pattern: pattern.to_string(),
    }
}

/// Builds a `contains` condition, the most common anchoring in tests.
pub fn contains(pattern: &str) -> Condition {
    condition(Anchoring::Contains, pattern)
}

/// Builds a promotion of `doc_id` to `position`.
pub fn promo(doc_id: &str, position: usize) -> Promotion {
    Promotion {
        doc_id: doc_id.to_string(),
        position,
    }
}

/// Builds a full rule from parts.
pub fn rule(id: &str, conditions: Vec<Condition>, promote: Vec<Promotion>) -> PinRule {
    PinRule {
        id: id.to_string(),
        conditions,
        consequence: Consequence { promote },
    }
}
