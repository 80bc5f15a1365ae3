//! In-memory pinning rule store.
//!
//! The store is a plain single-threaded container keyed by rule id. It lives
//! for the engine process and is rebuilt from external storage on load via
//! [`PinningStore::from_rules`]; no on-disk format is defined here.
//!
//! Rules are kept in a `BTreeMap` so iteration order - which feeds the
//! matcher and therefore first-wins conflict resolution - is reproducible
//! across processes, not merely within one.
//!
//! # Thread Safety
//!
//! This type is **not thread-safe**. The engine facade wraps it in a
//! read-write lock so control-plane writes never tear a rule under a
//! concurrent search; see [`PinningEngine`](crate::engine::PinningEngine).

use std::collections::BTreeMap;

use tracing::debug;

use super::matcher;
use super::types::PinRule;
use crate::error::RuleError;

/// The pinning capability an embedding search engine carries as a fixed
/// field.
///
/// Implemented by [`PinningStore`]; an engine that wants to swap in its own
/// rule container (copy-on-write snapshots, for instance) implements this
/// trait instead of relying on runtime capability lookup.
pub trait RuleIndex {
    /// Adds a new rule. Fails on id collision or structural invalidity.
    fn add_rule(&mut self, rule: PinRule) -> Result<(), RuleError>;
    /// Replaces an existing rule wholesale. Fails if the id is absent.
    fn update_rule(&mut self, rule: PinRule) -> Result<(), RuleError>;
    /// Removes a rule by id, returning whether it existed.
    fn remove_rule(&mut self, rule_id: &str) -> bool;
    /// Looks up a rule by id.
    fn get_rule(&self, rule_id: &str) -> Option<&PinRule>;
    /// All rules in stable (id) order.
    fn all_rules(&self) -> Vec<&PinRule>;
    /// Rules whose conditions all match the query, in stable order.
    fn matching_rules(&self, query: &str) -> Vec<&PinRule>;
}

/// In-memory container of pinning rules keyed by rule id.
#[derive(Debug, Clone, Default)]
pub struct PinningStore {
    rules: BTreeMap<String, PinRule>,
}

impl PinningStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Rebuilds a store from rules loaded out of external storage.
    ///
    /// Every rule is validated; the load fails atomically on the first
    /// invalid or duplicate rule so a half-loaded store can never serve
    /// queries.
    pub fn from_rules<I>(rules: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = PinRule>,
    {
        let mut store = Self::new();
        for rule in rules {
            store.add_rule(rule)?;
        }
        debug!(rule_count = store.len(), "Rebuilt pinning store");
        Ok(store)
    }

    /// Returns the number of stored rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are stored.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Removes every rule.
    pub fn clear(&mut self) {
        self.rules.clear();
        debug!("Cleared pinning store");
    }

    /// Iterates rules in stable (id) order.
    pub fn iter(&self) -> impl Iterator<Item = &PinRule> {
        self.rules.values()
    }
}

impl RuleIndex for PinningStore {
    fn add_rule(&mut self, rule: PinRule) -> Result<(), RuleError> {
        rule.validate()?;
        if self.rules.contains_key(&rule.id) {
            return Err(RuleError::DuplicateRuleId(rule.id));
        }
        debug!(rule_id = %rule.id, "Added pinning rule");
        self.rules.insert(rule.id.clone(), rule);
        Ok(())
    }

    fn update_rule(&mut self, rule: PinRule) -> Result<(), RuleError> {
        rule.validate()?;
        if !self.rules.contains_key(&rule.id) {
            return Err(RuleError::RuleNotFound(rule.id));
        }
        debug!(rule_id = %rule.id, "Updated pinning rule");
        self.rules.insert(rule.id.clone(), rule);
        Ok(())
    }

    fn remove_rule(&mut self, rule_id: &str) -> bool {
        let removed = self.rules.remove(rule_id).is_some();
        if removed {
            debug!(rule_id, "Removed pinning rule");
        }
        removed
    }

    fn get_rule(&self, rule_id: &str) -> Option<&PinRule> {
        self.rules.get(rule_id)
    }

    fn all_rules(&self) -> Vec<&PinRule> {
        self.rules.values().collect()
    }

    fn matching_rules(&self, query: &str) -> Vec<&PinRule> {
        matcher::matching_rules(self, query)
    }
}
