//! Property tests for the splice contract.
//!
//! Verifies the universal invariants:
//! 1. Output ids are a subset of organic ids plus valid promoted ids, with
//!    no duplicates
//! 2. Relative order of unpinned documents matches the organic list
//! 3. No matching rule means identity
//! 4. Determinism: identical inputs produce identical outputs
//! 5. The full output equals an independently written reference model of the
//!    positional contract (flatten, first-wins, partition, score, interleave)

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use pinrank::config::{BASE_PIN_SCORE, FOREIGN_PIN_SCORE};
use pinrank::pinning::{
    matching_rules, splice_pinned_results, Anchoring, Condition, Consequence, DocId, PinRule,
    PinningStore, Promotion,
};
use pinrank::storage::{DocumentIndex, InMemoryDocumentIndex};

// ============================================================================
// STRATEGIES
// ============================================================================

/// External ids "doc-0".."doc-19" are registered; promotions may also name
/// ids beyond the pool to exercise the unknown-document path.
const POOL: usize = 20;

fn external_id(i: usize) -> String {
    format!("doc-{i}")
}

/// A promotion naming a pool document (or, past POOL, an unknown one).
fn promotion_strategy() -> impl Strategy<Value = Promotion> {
    (0..POOL + 5, 0usize..15).prop_map(|(doc, position)| Promotion {
        doc_id: external_id(doc),
        position,
    })
}

/// Rules carry zero-padded ids so store order equals generation order.
/// Promotions within one rule must carry distinct positions; dedup after
/// generation rather than fighting the generator.
fn rules_strategy() -> impl Strategy<Value = Vec<PinRule>> {
    prop::collection::vec(prop::collection::vec(promotion_strategy(), 1..4), 0..5).prop_map(
        |rules| {
            rules
                .into_iter()
                .enumerate()
                .map(|(tag, promotions)| {
                    let mut seen = HashSet::new();
                    let promote: Vec<Promotion> = promotions
                        .into_iter()
                        .filter(|p| seen.insert(p.position))
                        .collect();
                    PinRule {
                        id: format!("rule-{tag:02}"),
                        conditions: vec![Condition {
                            anchoring: Anchoring::Contains,
                            pattern: "q".to_string(),
                        }],
                        consequence: Consequence { promote },
                    }
                })
                .collect()
        },
    )
}

/// An organic result list: a subsequence of the pool with strictly
/// descending scores.
fn organic_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::sample::subsequence((0..POOL).collect::<Vec<usize>>(), 0..POOL)
}

/// Shared fixture: every pool document registered, none deleted.
fn build_world(
    rules: &[PinRule],
    organic_docs: &[usize],
) -> (
    InMemoryDocumentIndex,
    PinningStore,
    Vec<(DocId, f32)>,
) {
    let mut index = InMemoryDocumentIndex::new();
    for i in 0..POOL {
        index.insert(&external_id(i));
    }
    let store = PinningStore::from_rules(rules.to_vec()).unwrap();
    let organic: Vec<(DocId, f32)> = organic_docs
        .iter()
        .enumerate()
        .map(|(rank, &doc)| {
            (
                index.internal_id(&external_id(doc)).unwrap(),
                100.0 - rank as f32,
            )
        })
        .collect();
    (index, store, organic)
}

// ============================================================================
// REFERENCE MODEL
// ============================================================================
//
// An independent, line-by-line transcription of the positional contract.
// Deliberately naive: correctness over structure, so a structural bug in the
// crate cannot hide in a shared helper.

fn reference_splice(
    organic: &[(DocId, f32)],
    matched: &[&PinRule],
    index: &InMemoryDocumentIndex,
) -> Vec<(DocId, f32)> {
    if matched.is_empty() {
        return organic.to_vec();
    }

    // Step 1: flatten.
    let flat: Vec<&Promotion> = matched
        .iter()
        .flat_map(|r| r.consequence.promote.iter())
        .collect();

    // Step 2: first-wins.
    let mut placed: HashMap<DocId, usize> = HashMap::new();
    let mut taken: HashSet<usize> = HashSet::new();
    for p in flat {
        let Some(doc) = index.internal_id(&p.doc_id) else {
            continue;
        };
        if let Some(&current) = placed.get(&doc) {
            if p.position < current && !taken.contains(&p.position) {
                taken.remove(&current);
                taken.insert(p.position);
                placed.insert(doc, p.position);
            }
            continue;
        }
        if taken.contains(&p.position) {
            continue;
        }
        placed.insert(doc, p.position);
        taken.insert(p.position);
    }

    // Step 3: partition.
    let organic_ids: HashSet<DocId> = organic.iter().map(|(d, _)| *d).collect();
    let unpinned: Vec<(DocId, f32)> = organic
        .iter()
        .filter(|(d, _)| !placed.contains_key(d))
        .copied()
        .collect();

    // Step 4: score, dropping pins for documents that no longer exist.
    let mut pins: Vec<(usize, DocId, f32)> = Vec::new();
    for (doc, position) in placed {
        if organic_ids.contains(&doc) {
            pins.push((position, doc, BASE_PIN_SCORE - position as f32));
        } else if index.contains(doc) {
            pins.push((position, doc, FOREIGN_PIN_SCORE));
        }
    }
    pins.sort_by_key(|(position, _, _)| *position);

    // Step 5: interleave, then append overflow pins ascending.
    let by_position: HashMap<usize, (DocId, f32)> = pins
        .iter()
        .map(|&(position, doc, score)| (position, (doc, score)))
        .collect();
    let mut out: Vec<(DocId, f32)> = Vec::new();
    let mut organic_iter = unpinned.into_iter();
    loop {
        if let Some(&(doc, score)) = by_position.get(&out.len()) {
            out.push((doc, score));
        } else if let Some(hit) = organic_iter.next() {
            out.push(hit);
        } else {
            break;
        }
    }
    for &(position, doc, score) in &pins {
        if position >= out.len() {
            out.push((doc, score));
        }
    }
    out
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: output ids come from organic or valid promotions, without
    /// duplicates.
    #[test]
    fn prop_output_is_duplicate_free_subset(
        rules in rules_strategy(),
        organic_docs in organic_strategy(),
    ) {
        let (index, store, organic) = build_world(&rules, &organic_docs);
        let matched = matching_rules(&store, "q");
        let out = splice_pinned_results(&organic, &matched, &index);

        let mut seen: HashSet<DocId> = HashSet::new();
        let allowed: HashSet<DocId> = organic
            .iter()
            .map(|(d, _)| *d)
            .chain(rules.iter().flat_map(|r| {
                r.consequence
                    .promote
                    .iter()
                    .filter_map(|p| index.internal_id(&p.doc_id))
            }))
            .collect();

        for (doc, _) in &out {
            prop_assert!(seen.insert(*doc), "Duplicate document {:?} in output", doc);
            prop_assert!(allowed.contains(doc), "Document {:?} appeared from nowhere", doc);
        }
    }

    /// Property: unpinned documents keep their organic relative order.
    #[test]
    fn prop_unpinned_relative_order_preserved(
        rules in rules_strategy(),
        organic_docs in organic_strategy(),
    ) {
        let (index, store, organic) = build_world(&rules, &organic_docs);
        let matched = matching_rules(&store, "q");
        let out = splice_pinned_results(&organic, &matched, &index);

        let pinned: HashSet<DocId> = out
            .iter()
            .filter(|(_, score)| *score >= BASE_PIN_SCORE - 15.0 || *score == FOREIGN_PIN_SCORE)
            .map(|(d, _)| *d)
            .collect();

        let organic_order: Vec<DocId> = organic
            .iter()
            .map(|(d, _)| *d)
            .filter(|d| !pinned.contains(d))
            .collect();
        let output_order: Vec<DocId> = out
            .iter()
            .map(|(d, _)| *d)
            .filter(|d| !pinned.contains(d))
            .collect();

        prop_assert_eq!(organic_order, output_order);
    }

    /// Property: a query matching no rule returns the organic list unchanged.
    #[test]
    fn prop_no_match_is_identity(
        rules in rules_strategy(),
        organic_docs in organic_strategy(),
    ) {
        let (index, store, organic) = build_world(&rules, &organic_docs);
        // Every generated condition is `contains "q"`; this query avoids it.
        let matched = matching_rules(&store, "zzz");
        prop_assert!(matched.is_empty());

        let out = splice_pinned_results(&organic, &matched, &index);
        prop_assert_eq!(out, organic);
    }

    /// Property: identical inputs produce identical outputs.
    #[test]
    fn prop_deterministic(
        rules in rules_strategy(),
        organic_docs in organic_strategy(),
    ) {
        let (index, store, organic) = build_world(&rules, &organic_docs);
        let matched = matching_rules(&store, "q");

        let first = splice_pinned_results(&organic, &matched, &index);
        let second = splice_pinned_results(&organic, &matched, &index);
        prop_assert_eq!(first, second);
    }

    /// Property: the implementation agrees with the reference model of the
    /// positional contract, pin placement and scores included.
    #[test]
    fn prop_matches_reference_model(
        rules in rules_strategy(),
        organic_docs in organic_strategy(),
    ) {
        let (index, store, organic) = build_world(&rules, &organic_docs);
        let matched = matching_rules(&store, "q");

        let actual = splice_pinned_results(&organic, &matched, &index);
        let expected = reference_splice(&organic, &matched, &index);
        prop_assert_eq!(actual, expected);
    }
}
