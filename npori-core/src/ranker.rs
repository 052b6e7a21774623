//! Representative selection: the best consequence term within a
//! transcript, and the best transcript among a variant's gene models.
//!
//! Transcript selection is deliberately a left-to-right greedy scan, not a
//! comparator-based sort; the order-dependence (canonical status trumping
//! rank once encountered) is pinned by the tests below.

use crate::models::Transcript;

/// Position in `terms` of the term with the lowest priority-list index,
/// or `None` when nothing matched. Earlier occurrences win ties.
pub fn best_consequence(terms: &[String], priority: &[&str]) -> Option<usize> {
    let mut best_rank = priority.len();
    let mut best = None;
    for (index, term) in terms.iter().enumerate() {
        if let Some(rank) = priority.iter().position(|p| p == term) {
            if rank < best_rank {
                best_rank = rank;
                best = Some(index);
            }
        }
    }
    best
}

/// Priority-list index of the best consequence among `terms`, or the
/// sentinel `priority.len()` when the list is empty or nothing matched.
pub fn consequence_rank(terms: &[String], priority: &[&str]) -> usize {
    terms
        .iter()
        .filter_map(|term| priority.iter().position(|p| p == term))
        .min()
        .unwrap_or(priority.len())
}

/// Greedy scan for the best transcript. For each candidate in order:
/// canonical displaces a non-canonical best unconditionally; else a
/// strictly better consequence rank wins; else a rank tie combined with
/// the preferred source wins. A non-empty list always selects something:
/// when no arm ever fires the last candidate is returned.
pub fn best_transcript<'a>(
    transcripts: &'a [Transcript],
    priority: &[&str],
    preferred_source: &str,
) -> Option<&'a Transcript> {
    let mut best_rank = priority.len();
    let mut best: Option<usize> = None;
    for (i, transcript) in transcripts.iter().enumerate() {
        let rank = consequence_rank(&transcript.consequences, priority);
        let best_canonical = best.map(|b| transcripts[b].is_canonical).unwrap_or(false);
        if transcript.is_canonical && !best_canonical {
            best_rank = rank;
            best = Some(i);
        } else if rank < best_rank {
            best_rank = rank;
            best = Some(i);
        } else if rank == best_rank && transcript.source.as_deref() == Some(preferred_source) {
            best_rank = rank;
            best = Some(i);
        }
    }
    best.map(|i| &transcripts[i]).or_else(|| transcripts.last())
}
