use crate::pinning::types::DocId;

/// The document oracle the splicer consults.
///
/// Both operations are plain map reads in practice and stay synchronous and
/// non-blocking: they sit on the search hot path, inside a splicer that
/// never suspends.
///
/// # Design Notes
///
/// Implementations are free to answer `internal_id` for documents that have
/// since been deleted (a tombstoned id mapper, for instance); the splicer
/// follows up with [`contains`](DocumentIndex::contains) before promoting a
/// document from outside the organic result set.
pub trait DocumentIndex {
    /// Translates an external document identifier into the engine's internal
    /// id.
    ///
    /// Returns `None` if the document was never inserted or the mapping has
    /// been dropped.
    fn internal_id(&self, external_id: &str) -> Option<DocId>;

    /// Whether a document with this internal id currently exists in the
    /// document store.
    fn contains(&self, id: DocId) -> bool;
}
