use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Internal document identifier assigned by the search engine.
///
/// Distinct from the external, user-supplied id that pinning rules reference.
/// The engine's document index owns the mapping between the two; see
/// [`DocumentIndex`](crate::storage::DocumentIndex).
///
/// IDs are generated atomically to ensure uniqueness across threads. Use
/// `DocId::new()` to generate a new unique ID, or `from_u64` when rebuilding
/// state loaded from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocId(u64);

impl DocId {
    /// Generates a new unique document ID.
    ///
    /// Note: Default is intentionally NOT implemented - calling default()
    /// repeatedly would yield different values, which violates the semantic
    /// expectation that default() is a fixed value.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    /// Creates a DocId from a raw u64 value.
    ///
    /// Useful for deserialization or testing. Be careful not to create
    /// duplicate IDs when using this method.
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw u64 value of this ID.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// String-match mode a [`Condition`] applies to the query text.
///
/// Matching is case-insensitive and runs against the raw query string - no
/// stemming, no tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchoring {
    /// Query equals the pattern exactly
    Is,
    /// Query begins with the pattern
    StartsWith,
    /// Query ends with the pattern
    EndsWith,
    /// Pattern appears anywhere in the query
    Contains,
}

impl Anchoring {
    /// Evaluates this anchoring mode against pre-lowercased inputs.
    pub(crate) fn matches(&self, query: &str, pattern: &str) -> bool {
        match self {
            Anchoring::Is => query == pattern,
            Anchoring::StartsWith => query.starts_with(pattern),
            Anchoring::EndsWith => query.ends_with(pattern),
            Anchoring::Contains => query.contains(pattern),
        }
    }
}

/// A single query condition; all conditions of a rule must hold for it to fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// String-match mode
    pub anchoring: Anchoring,
    /// Pattern compared against the query (must be non-empty after trimming)
    pub pattern: String,
}

impl Condition {
    /// Evaluates this condition against an already-lowercased query.
    pub(crate) fn matches(&self, normalized_query: &str) -> bool {
        self.anchoring
            .matches(normalized_query, &self.pattern.to_lowercase())
    }
}

/// Directive to place one document at one position in the final result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    /// External document identifier, as supplied at insertion time
    pub doc_id: String,
    /// Zero-indexed slot in the final result list
    pub position: usize,
}

/// What a matching rule does: promote documents to fixed positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consequence {
    /// Promotions in declaration order (earlier promotions win conflicts)
    pub promote: Vec<Promotion>,
}

/// User-visible pinning rule: a conjunction of conditions plus the
/// promotions to apply when they all match.
///
/// # JSON shape
///
/// ```json
/// { "id": "summer-sale",
///   "conditions": [ { "anchoring": "contains", "pattern": "sandals" } ],
///   "consequence": { "promote": [ { "doc_id": "sku-123", "position": 0 } ] } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRule {
    /// Globally unique rule id within a store
    pub id: String,
    /// Non-empty conjunction of conditions
    pub conditions: Vec<Condition>,
    /// Non-empty promotion list
    pub consequence: Consequence,
}

impl PinRule {
    /// Validates the structural invariants of this rule.
    ///
    /// Checked on insert and update; the store is never mutated when
    /// validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidRule`] with field detail when:
    /// - the rule id is empty,
    /// - `conditions` is empty, or a pattern is empty after trimming,
    /// - `consequence.promote` is empty, or a promotion's `doc_id` is empty,
    /// - two promotions within this rule claim the same position.
    pub fn validate(&self) -> Result<(), RuleError> {
        let invalid = |reason: String| RuleError::InvalidRule {
            id: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(RuleError::InvalidRule {
                id: self.id.clone(),
                reason: "rule id must not be empty".to_string(),
            });
        }

        if self.conditions.is_empty() {
            return Err(invalid("conditions must not be empty".to_string()));
        }
        for (i, condition) in self.conditions.iter().enumerate() {
            if condition.pattern.trim().is_empty() {
                return Err(invalid(format!("conditions[{i}].pattern must not be empty")));
            }
        }

        if self.consequence.promote.is_empty() {
            return Err(invalid("consequence.promote must not be empty".to_string()));
        }

        let mut positions = std::collections::HashSet::new();
        for (i, promotion) in self.consequence.promote.iter().enumerate() {
            if promotion.doc_id.is_empty() {
                return Err(invalid(format!(
                    "consequence.promote[{i}].doc_id must not be empty"
                )));
            }
            if !positions.insert(promotion.position) {
                return Err(invalid(format!(
                    "consequence.promote[{i}] reuses position {}",
                    promotion.position
                )));
            }
        }

        Ok(())
    }
}
