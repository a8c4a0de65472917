//! Filtering, merging, and ranking of candidate slots.
//!
//! Fine-grained sampling over a long free block produces a run of
//! near-identical qualifying candidates shifted by one granularity step each.
//! Presenting all of them is useless to a caller showing a short list, so
//! runs of adjacent candidates with the same available-member count collapse
//! to the earliest start. The merge policy lives entirely in this module so
//! it can be swapped without touching sampling or the service.

use crate::sampler::CandidateSlot;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default cap on the number of suggestions returned for one request.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 20;

/// A candidate slot that passed the coverage filter and survived merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub coverage_ratio: f64,
    pub available_members: usize,
    pub total_members: usize,
    /// 1-based position in the ranked result.
    pub rank: usize,
}

/// Turn the raw candidate sequence into the ranked response set.
///
/// - Candidates below `min_coverage` are dropped.
/// - Runs of adjacent qualifying candidates (next start == previous start +
///   `granularity`, identical `available_members`) collapse to the run's
///   earliest start.
/// - Survivors sort by coverage ratio descending, then start ascending, and
///   the list is truncated to `max_suggestions`. Truncation drops the tail,
///   it never reorders.
///
/// An empty result is a normal outcome: it means no window met the
/// threshold, and the caller is expected to relax the request and retry.
pub fn rank_candidates<I>(
    candidates: I,
    min_coverage: f64,
    granularity: Duration,
    max_suggestions: usize,
) -> Vec<Suggestion>
where
    I: IntoIterator<Item = CandidateSlot>,
{
    let mut kept: Vec<CandidateSlot> = Vec::new();
    // Most recent candidate of the current run; the run's head is what
    // `kept` holds, and only the head survives.
    let mut run_tail: Option<CandidateSlot> = None;

    for slot in candidates {
        if slot.coverage_ratio() < min_coverage {
            continue;
        }
        let continues_run = run_tail.is_some_and(|tail| {
            // A non-qualifying candidate in between leaves a gap wider than
            // one granularity step, which breaks the run as intended.
            slot.start == tail.start + granularity
                && slot.available_members == tail.available_members
        });
        if !continues_run {
            kept.push(slot);
        }
        run_tail = Some(slot);
    }

    kept.sort_by(|a, b| {
        compare_coverage(b, a).then_with(|| a.start.cmp(&b.start))
    });
    kept.truncate(max_suggestions);

    kept.into_iter()
        .enumerate()
        .map(|(i, slot)| Suggestion {
            start: slot.start,
            end: slot.end,
            coverage_ratio: slot.coverage_ratio(),
            available_members: slot.available_members,
            total_members: slot.total_members,
            rank: i + 1,
        })
        .collect()
}

/// Coverage comparison on the integer counts: within one request every
/// candidate shares `total_members`, so comparing `available_members`
/// sidesteps float ordering entirely.
fn compare_coverage(a: &CandidateSlot, b: &CandidateSlot) -> Ordering {
    a.available_members.cmp(&b.available_members)
}
