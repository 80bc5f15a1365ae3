//! Rule-to-query matching.
//!
//! The matcher is a pure function from (store, query) to the rules whose
//! conditions all hold for that query. Matching runs on the raw query text
//! with Unicode lowercasing only - no stemming, no tokenization - so rule
//! authors can reason about it as plain string comparison.
//!
//! Output order follows store iteration order (stable, by rule id). The
//! splicer imposes its own ordering on promotions; matcher order acts as the
//! tie-breaker between rules that fight over the same position.

use tracing::trace;

use super::store::PinningStore;
use super::types::PinRule;

/// Returns the rules whose conditions all match `query`, in store order.
///
/// An empty or whitespace-only query matches nothing: pinning only applies
/// to explicit queries.
///
/// This function never mutates the store.
pub fn matching_rules<'a>(store: &'a PinningStore, query: &str) -> Vec<&'a PinRule> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    // Lowercasing is the only normalization; anchored comparisons run
    // against the raw query, surrounding whitespace included.
    let normalized = query.to_lowercase();
    store
        .iter()
        .filter(|rule| {
            let matched = rule_matches(rule, &normalized);
            trace!(rule_id = %rule.id, matched, "Evaluated pinning rule");
            matched
        })
        .collect()
}

/// A rule matches iff every condition holds (conjunction).
fn rule_matches(rule: &PinRule, normalized_query: &str) -> bool {
    rule.conditions
        .iter()
        .all(|condition| condition.matches(normalized_query))
}
