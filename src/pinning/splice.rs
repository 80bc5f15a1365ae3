//! Result splicer: fuses pinned documents into the organic ranked list.
//!
//! This is the data-plane hot path, invoked once per query after scoring and
//! deduplication but before pagination. It is a pure synchronous
//! transformation bounded by `O(|organic| + |promotions|)` and it always
//! returns a valid list: stale promotions and position conflicts are
//! absorbed, never surfaced.
//!
//! # Algorithm
//!
//! 1. Flatten promotions from the matched rules, preserving matcher order
//!    and intra-rule declaration order.
//! 2. Resolve conflicts first-wins: earlier promotions own positions; a
//!    later promotion of an already-placed document may move it to a free,
//!    strictly smaller position.
//! 3. Partition the organic list, keeping unpinned entries in relative order.
//! 4. Score pins: `BASE_PIN_SCORE - position` for documents that were in the
//!    organic results, [`FOREIGN_PIN_SCORE`] for documents promoted from
//!    outside the result set (dropped if they no longer exist).
//! 5. Interleave: walk positions from zero, emitting the pin that claims
//!    each slot or the next unpinned entry; pins whose claimed position lies
//!    beyond the built list are appended in ascending position order.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, trace};

use super::types::{DocId, PinRule};
use crate::config::{BASE_PIN_SCORE, FOREIGN_PIN_SCORE};
use crate::storage::DocumentIndex;

/// Splices promotions from `matched` rules into the `organic` ranked list.
///
/// `organic` must already be sorted by the ranker (highest score first);
/// the splicer preserves the relative order of every entry it does not pin.
/// If `matched` is empty the organic list is returned unchanged.
///
/// Promotions referencing documents that cannot be resolved - or that
/// resolved but have since been deleted - are dropped silently; rules
/// outlive documents and a stale rule must not break search.
pub fn splice_pinned_results<I: DocumentIndex>(
    organic: &[(DocId, f32)],
    matched: &[&PinRule],
    index: &I,
) -> Vec<(DocId, f32)> {
    if matched.is_empty() {
        return organic.to_vec();
    }

    let placed = resolve_placements(matched, index);
    if placed.is_empty() {
        return organic.to_vec();
    }

    // Partition organic, preserving relative order of the unpinned entries.
    let organic_ids: HashSet<DocId> = organic.iter().map(|(doc, _)| *doc).collect();
    let unpinned: Vec<(DocId, f32)> = organic
        .iter()
        .filter(|(doc, _)| !placed.contains_key(doc))
        .copied()
        .collect();

    // Score each pin, keyed by claimed position so emission and overflow
    // append both run in ascending position order.
    let mut pins: BTreeMap<usize, (DocId, f32)> = BTreeMap::new();
    for (doc, position) in placed {
        if organic_ids.contains(&doc) {
            pins.insert(position, (doc, BASE_PIN_SCORE - position as f32));
        } else if index.contains(doc) {
            pins.insert(position, (doc, FOREIGN_PIN_SCORE));
        } else {
            debug!(
                doc_id = doc.as_u64(),
                position, "Pinned document no longer exists, dropping pin"
            );
        }
    }

    // Interleave: pins claim their exact slots, organic fills the gaps.
    let mut fused = Vec::with_capacity(unpinned.len() + pins.len());
    let mut organic_iter = unpinned.into_iter();
    loop {
        let slot = fused.len();
        if let Some(&pin) = pins.get(&slot) {
            fused.push(pin);
        } else if let Some(hit) = organic_iter.next() {
            fused.push(hit);
        } else {
            break;
        }
    }

    // Pins whose claimed position exceeds the built length (sparse position
    // assignments) are appended in ascending position order.
    let built = fused.len();
    for (&position, &pin) in pins.range(built..) {
        trace!(
            doc_id = pin.0.as_u64(),
            position,
            "Appending pin past end of result list"
        );
        fused.push(pin);
    }

    fused
}

/// Flattens promotions and resolves position conflicts (steps 1 and 2).
///
/// Returns the final `internal id -> claimed position` map. First-wins:
/// the first promotion to claim a position owns it; the first promotion to
/// name a document places it, except that a later promotion may move an
/// already-placed document to a free, strictly smaller position.
fn resolve_placements<I: DocumentIndex>(
    matched: &[&PinRule],
    index: &I,
) -> HashMap<DocId, usize> {
    let mut placed: HashMap<DocId, usize> = HashMap::new();
    let mut taken: HashSet<usize> = HashSet::new();

    for rule in matched {
        for promotion in &rule.consequence.promote {
            let Some(doc) = index.internal_id(&promotion.doc_id) else {
                debug!(
                    rule_id = %rule.id,
                    doc_id = %promotion.doc_id,
                    "Promotion references an unknown document, skipping"
                );
                continue;
            };
            let position = promotion.position;

            if let Some(&current) = placed.get(&doc) {
                // Already pinned: a later promotion can only rescue the
                // document to a better (smaller) slot, and only if that
                // slot is still free.
                if position < current && !taken.contains(&position) {
                    taken.remove(&current);
                    taken.insert(position);
                    placed.insert(doc, position);
                    trace!(
                        doc_id = doc.as_u64(),
                        from = current,
                        to = position,
                        "Moved pin to smaller position"
                    );
                }
                continue;
            }

            if taken.contains(&position) {
                trace!(
                    rule_id = %rule.id,
                    doc_id = doc.as_u64(),
                    position,
                    "Position already claimed, dropping promotion"
                );
                continue;
            }

            placed.insert(doc, position);
            taken.insert(position);
        }
    }

    placed
}
