//! Rule-based pinning: data model, store, matcher, and result splicer.
//!
//! This module implements the pinning pipeline:
//! - **Rules** ([`types`]): a [`PinRule`] fires when *all* of its conditions
//!   match the query, promoting documents to fixed result positions.
//! - **Store** ([`store`]): in-memory rule container with uniqueness and
//!   validation invariants, rebuilt from external storage on load.
//! - **Matcher** ([`matcher`]): pure rule-to-query matching over the raw
//!   query text (case-insensitive, no tokenization).
//! - **Splicer** ([`splice`]): fuses matched promotions with the organic
//!   ranked list, resolving conflicts first-wins and preserving the relative
//!   order of everything that was not pinned.
//!
//! # Pipeline position
//!
//! The engine invokes the splicer once per query, after scoring and
//! deduplication but before pagination, so pinned documents count toward the
//! first page. Matcher and store are consulted exactly once per query.
//!
//! # Conflict resolution
//!
//! Earlier rules and earlier promotions win position ownership; a later
//! promotion of an already-placed document may still rescue it to a better
//! (smaller) slot. The outcome is deterministic for a given store snapshot.

pub mod matcher;
pub mod splice;
pub mod store;
pub mod types;

pub use matcher::matching_rules;
pub use splice::splice_pinned_results;
pub use store::{PinningStore, RuleIndex};
pub use types::{Anchoring, Condition, Consequence, DocId, PinRule, Promotion};
