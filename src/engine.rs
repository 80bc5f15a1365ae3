//! Engine facade: the record carrying the pinning capability.
//!
//! [`PinningEngine`] owns the rule store behind a read-write lock and a
//! [`DocumentIndex`] oracle, exposing the control-plane CRUD and the
//! data-plane [`apply_pinning_rules`](PinningEngine::apply_pinning_rules)
//! hook the search pipeline calls after scoring and deduplication, before
//! pagination (so pinned documents count toward the first page).
//!
//! # Sharing discipline
//!
//! The store has a single writer (the control plane) and many readers (the
//! search path). Control-plane operations take the write lock briefly around
//! the map mutation; the data plane takes the read lock only long enough to
//! clone the matched rule set - one logical snapshot per query - and splices
//! outside the lock. A concurrent writer can therefore never tear a rule
//! mid-query.

use std::sync::RwLock;

use tracing::instrument;

use crate::error::RuleError;
use crate::pinning::splice::splice_pinned_results;
use crate::pinning::store::{PinningStore, RuleIndex};
use crate::pinning::types::{DocId, PinRule};
use crate::storage::DocumentIndex;

/// Search engine facade owning the pinning store and the document oracle.
///
/// Generic over the oracle so a real engine can plug in its own id mapper
/// and document store; tests and examples use
/// [`InMemoryDocumentIndex`](crate::storage::InMemoryDocumentIndex).
///
/// # Example
///
/// ```
/// use pinrank::engine::PinningEngine;
/// use pinrank::storage::InMemoryDocumentIndex;
///
/// let engine = PinningEngine::new(InMemoryDocumentIndex::new());
/// assert!(engine.get_all_pins().is_empty());
/// ```
pub struct PinningEngine<I: DocumentIndex> {
    /// Pinning rules, guarded for single-writer/many-reader access
    rules: RwLock<PinningStore>,
    /// Document oracle (id translation + existence)
    documents: I,
}

impl<I: DocumentIndex> PinningEngine<I> {
    /// Creates an engine with an empty rule store.
    pub fn new(documents: I) -> Self {
        Self {
            rules: RwLock::new(PinningStore::new()),
            documents,
        }
    }

    /// Creates an engine from a store rebuilt out of external storage.
    pub fn with_rules(documents: I, rules: PinningStore) -> Self {
        Self {
            rules: RwLock::new(rules),
            documents,
        }
    }

    /// Get a reference to the document oracle.
    pub fn documents(&self) -> &I {
        &self.documents
    }

    /// Get a mutable reference to the document oracle.
    ///
    /// The oracle is not guarded by the rule lock; callers that mutate it
    /// concurrently with searches need their own synchronization. Host
    /// engines already serialize document writes on their indexing path.
    pub fn documents_mut(&mut self) -> &mut I {
        &mut self.documents
    }

    /// Inserts a new pinning rule.
    ///
    /// # Errors
    ///
    /// [`RuleError::DuplicateRuleId`] if a rule with this id exists;
    /// [`RuleError::InvalidRule`] on structural validation failure. The
    /// store is untouched on error.
    pub fn insert_pin(&self, rule: PinRule) -> Result<(), RuleError> {
        self.write_rules().add_rule(rule)
    }

    /// Replaces an existing rule wholesale, by id.
    ///
    /// # Errors
    ///
    /// [`RuleError::RuleNotFound`] if the id is absent; same validation as
    /// [`insert_pin`](Self::insert_pin).
    pub fn update_pin(&self, rule: PinRule) -> Result<(), RuleError> {
        self.write_rules().update_rule(rule)
    }

    /// Deletes a rule by id, returning whether it existed. Never fails.
    pub fn delete_pin(&self, rule_id: &str) -> bool {
        self.write_rules().remove_rule(rule_id)
    }

    /// Looks up a rule by id, returning a clone of the stored rule.
    pub fn get_pin(&self, rule_id: &str) -> Option<PinRule> {
        self.read_rules().get_rule(rule_id).cloned()
    }

    /// Returns all rules in stable (id) order.
    pub fn get_all_pins(&self) -> Vec<PinRule> {
        self.read_rules().all_rules().into_iter().cloned().collect()
    }

    /// Splices pinned documents into `organic` for `query`.
    ///
    /// Called by the search pipeline AFTER scoring and deduplication but
    /// BEFORE pagination. Takes one snapshot of the matched rule set under
    /// the read lock, releases it, and runs the splice on the snapshot; the
    /// matcher and store are consulted exactly once per query.
    ///
    /// With no matching rules (or an empty/whitespace query) the organic
    /// list is returned unchanged.
    #[instrument(skip_all, fields(organic_len = organic.len(), query_len = query.len()))]
    pub fn apply_pinning_rules(
        &self,
        organic: Vec<(DocId, f32)>,
        query: &str,
    ) -> Vec<(DocId, f32)> {
        // Snapshot under the read lock, splice outside it.
        let matched: Vec<PinRule> = {
            let rules = self.read_rules();
            rules
                .matching_rules(query)
                .into_iter()
                .cloned()
                .collect()
        };

        if matched.is_empty() {
            return organic;
        }

        let matched_refs: Vec<&PinRule> = matched.iter().collect();
        splice_pinned_results(&organic, &matched_refs, &self.documents)
    }

    fn read_rules(&self) -> std::sync::RwLockReadGuard<'_, PinningStore> {
        // A poisoned lock cannot leave the map logically torn: validation
        // precedes every mutation.
        self.rules.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_rules(&self) -> std::sync::RwLockWriteGuard<'_, PinningStore> {
        self.rules.write().unwrap_or_else(|e| e.into_inner())
    }
}
