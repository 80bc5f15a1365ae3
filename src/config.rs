//! Compile-time score sentinels for pinned results.
//!
//! These constants define the scores assigned to spliced-in documents. They
//! are not tuning knobs: downstream consumers (pagination, highlighting) may
//! rely on pinned entries sorting above every organic score.
//!
//! # Usage
//!
//! ```
//! use pinrank::config::{BASE_PIN_SCORE, FOREIGN_PIN_SCORE};
//!
//! // A pin at position 3 that was already in the organic results
//! let score = BASE_PIN_SCORE - 3.0;
//! assert!(score > 0.0 && FOREIGN_PIN_SCORE == 0.0);
//! ```

/// Score assigned to a pinned document that appeared in the organic results,
/// minus its claimed position.
///
/// The value must be strictly greater than any score the ranker can produce.
/// BM25 and RRF scores sit far below this for realistic corpora; if a ranker
/// ever approaches it, the sentinel must move to a higher range.
pub const BASE_PIN_SCORE: f32 = 1_000_000.0;

/// Score assigned to a document promoted from outside the organic result set.
///
/// Such a document matched no query term; it carries no meaningful relevance
/// signal, only its claimed position.
pub const FOREIGN_PIN_SCORE: f32 = 0.0;
