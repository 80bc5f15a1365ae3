//! Document oracle abstraction consumed by the splicer.
//!
//! The pinning core never talks to the document store directly; it only
//! needs two capabilities: translating an external document id to the
//! engine's internal id, and checking whether a document still exists. This
//! module provides that narrow trait plus an in-memory reference
//! implementation.
//!
//! # Implementations
//!
//! - [`InMemoryDocumentIndex`] - HashMap-backed registry (included in core)
//! - Real engines implement [`DocumentIndex`] over their own id mapper and
//!   document store.

mod document_index;
mod memory_index;

pub use document_index::DocumentIndex;
pub use memory_index::InMemoryDocumentIndex;
