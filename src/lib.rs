//! # Pinrank
//!
//! Rule-based result pinning for full-text search engines.
//!
//! Pinning promotes specific documents to specific positions in a ranked
//! result list whenever a query matches configured conditions. The organic
//! (score-ordered) ranking is never re-scored: pinned documents are spliced
//! into their promised slots and everything else keeps its relative order.
//!
//! This crate is the pinning subsystem only. The surrounding engine
//! (tokenization, inverted index, scoring, document storage) is an external
//! collaborator reached through the narrow [`storage::DocumentIndex`]
//! oracle.
//!
//! ## Modules
//!
//! - [`pinning`] - Rule data model, rule store, matcher, and result splicer
//! - [`storage`] - Document oracle trait plus an in-memory reference index
//! - [`engine`] - Engine facade guarding the store for concurrent access
//! - [`config`] - Compile-time score sentinels
//! - [`error`] - Control-plane error types
//!
//! ## Usage
//!
//! ```
//! use pinrank::engine::PinningEngine;
//! use pinrank::pinning::{Anchoring, Condition, Consequence, PinRule, Promotion};
//! use pinrank::storage::InMemoryDocumentIndex;
//!
//! let mut index = InMemoryDocumentIndex::new();
//! let apple = index.insert("doc-apple");
//! let pear = index.insert("doc-pear");
//!
//! let engine = PinningEngine::new(index);
//! engine.insert_pin(PinRule {
//!     id: "fruit-promo".to_string(),
//!     conditions: vec![Condition {
//!         anchoring: Anchoring::Contains,
//!         pattern: "fruit".to_string(),
//!     }],
//!     consequence: Consequence {
//!         promote: vec![Promotion { doc_id: "doc-pear".to_string(), position: 0 }],
//!     },
//! }).unwrap();
//!
//! let organic = vec![(apple, 9.0), (pear, 8.0)];
//! let fused = engine.apply_pinning_rules(organic, "fresh fruit");
//! assert_eq!(fused[0].0, pear);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod pinning;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_utils;

pub use engine::PinningEngine;
pub use error::RuleError;
pub use pinning::{
    matching_rules, splice_pinned_results, Anchoring, Condition, Consequence, DocId, PinRule,
    PinningStore, Promotion, RuleIndex,
};
pub use storage::{DocumentIndex, InMemoryDocumentIndex};
