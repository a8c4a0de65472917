//! Property-based tests for the suggestion pipeline using proptest.
//!
//! These verify invariants that must hold for *any* calendar layout and any
//! valid request, not just the handpicked examples in the other test files.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use timealign_engine::{
    rank_candidates, AvailabilityIndex, BusyInterval, CandidateSlot, IntervalSet,
    MemberAvailability, SlotSampler,
};

// ---------------------------------------------------------------------------
// Strategies — generate members, busy layouts, and request shapes
// ---------------------------------------------------------------------------

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap()
}

/// A busy interval as minute offsets from the base day, up to 48h out.
fn arb_interval() -> impl Strategy<Value = BusyInterval> {
    (0i64..2820, 5i64..240).prop_map(|(offset, len)| {
        BusyInterval::new(
            base() + Duration::minutes(offset),
            base() + Duration::minutes(offset + len),
        )
        .unwrap()
    })
}

fn arb_member(idx: usize) -> impl Strategy<Value = MemberAvailability> {
    prop::collection::vec(arb_interval(), 0..8).prop_map(move |intervals| MemberAvailability {
        member_id: format!("m{idx}"),
        busy: IntervalSet::from_intervals(intervals).unwrap(),
    })
}

fn arb_index() -> impl Strategy<Value = AvailabilityIndex> {
    (1usize..6)
        .prop_flat_map(|n| {
            (0..n)
                .map(arb_member)
                .collect::<Vec<_>>()
        })
        .prop_map(AvailabilityIndex::new)
}

/// (range_start_offset, range_minutes, duration, granularity) with every
/// request invariant satisfied by construction.
fn arb_request_shape() -> impl Strategy<Value = (i64, i64, u32, u32)> {
    (0i64..720, 60i64..1440, 15u32..120, 5u32..60).prop_map(
        |(start, span, duration, granularity)| {
            let duration = duration.min(span as u32);
            let granularity = granularity.min(duration);
            (start, span, duration, granularity)
        },
    )
}

fn arb_min_coverage() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.25), Just(0.5), Just(0.75), Just(1.0)]
}

fn run_pipeline(
    index: &AvailabilityIndex,
    shape: (i64, i64, u32, u32),
    min_coverage: f64,
) -> Vec<timealign_engine::Suggestion> {
    let (start, span, duration, granularity) = shape;
    let range_start = base() + Duration::minutes(start);
    let range_end = range_start + Duration::minutes(span);
    let sampler = SlotSampler::new(index, range_start, range_end, duration, granularity).unwrap();
    rank_candidates(
        sampler,
        min_coverage,
        Duration::minutes(i64::from(granularity)),
        20,
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Every returned suggestion meets the coverage threshold and has the
    /// exact requested duration.
    #[test]
    fn suggestions_meet_coverage_and_duration(
        index in arb_index(),
        shape in arb_request_shape(),
        min_coverage in arb_min_coverage(),
    ) {
        let suggestions = run_pipeline(&index, shape, min_coverage);
        let duration = Duration::minutes(i64::from(shape.2));
        for s in &suggestions {
            prop_assert!(s.coverage_ratio >= min_coverage);
            prop_assert_eq!(s.end - s.start, duration);
            prop_assert!(s.available_members <= s.total_members);
            prop_assert_eq!(s.total_members, index.total_members());
        }
    }

    /// Suggestions are strictly ordered by coverage descending, start
    /// ascending; ranks are sequential from 1.
    #[test]
    fn suggestions_are_strictly_ordered(
        index in arb_index(),
        shape in arb_request_shape(),
        min_coverage in arb_min_coverage(),
    ) {
        let suggestions = run_pipeline(&index, shape, min_coverage);
        for (i, pair) in suggestions.windows(2).enumerate() {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.available_members > b.available_members
                    || (a.available_members == b.available_members && a.start < b.start),
                "order violated between positions {} and {}", i, i + 1
            );
        }
        for (i, s) in suggestions.iter().enumerate() {
            prop_assert_eq!(s.rank, i + 1);
        }
    }

    /// Running the same request twice over unchanged data gives an
    /// identical ordered result.
    #[test]
    fn pipeline_is_idempotent(
        index in arb_index(),
        shape in arb_request_shape(),
        min_coverage in arb_min_coverage(),
    ) {
        let first = run_pipeline(&index, shape, min_coverage);
        let second = run_pipeline(&index, shape, min_coverage);
        prop_assert_eq!(first, second);
    }

    /// No two suggestions overlap in their merged-run sense: consecutive
    /// qualifying candidates with the same count never both survive.
    #[test]
    fn no_adjacent_same_count_survivors(
        index in arb_index(),
        shape in arb_request_shape(),
        min_coverage in arb_min_coverage(),
    ) {
        let granularity = Duration::minutes(i64::from(shape.3));
        let mut suggestions = run_pipeline(&index, shape, min_coverage);
        suggestions.sort_by_key(|s| s.start);
        for pair in suggestions.windows(2) {
            let adjacent = pair[1].start == pair[0].start + granularity;
            let same_count = pair[1].available_members == pair[0].available_members;
            prop_assert!(!(adjacent && same_count));
        }
    }

    /// With an all-free group, the whole range is one contiguous free block
    /// and must collapse to exactly one suggestion at range start.
    #[test]
    fn all_free_block_merges_to_single_suggestion(
        members in 1usize..6,
        shape in arb_request_shape(),
    ) {
        let index = AvailabilityIndex::new(
            (0..members)
                .map(|i| MemberAvailability {
                    member_id: format!("m{i}"),
                    busy: IntervalSet::new(),
                })
                .collect(),
        );
        let suggestions = run_pipeline(&index, shape, 1.0);
        prop_assert_eq!(suggestions.len(), 1);
        prop_assert_eq!(
            suggestions[0].start,
            base() + Duration::minutes(shape.0)
        );
        prop_assert_eq!(suggestions[0].available_members, members);
    }

    /// A range exactly one duration long yields at most one candidate, so
    /// at most one suggestion.
    #[test]
    fn duration_equal_to_span_yields_at_most_one(
        index in arb_index(),
        start in 0i64..720,
        duration in 15u32..240,
        granularity in 5u32..60,
    ) {
        let granularity = granularity.min(duration);
        let range_start = base() + Duration::minutes(start);
        let range_end = range_start + Duration::minutes(i64::from(duration));
        let sampler = SlotSampler::new(&index, range_start, range_end, duration, granularity)
            .unwrap();
        let candidates: Vec<CandidateSlot> = sampler.collect();
        prop_assert_eq!(candidates.len(), 1);
        prop_assert_eq!(candidates[0].start, range_start);
        prop_assert_eq!(candidates[0].end, range_end);
    }

    /// The sampler never emits a slot extending past the range end, and
    /// consecutive candidates are exactly one granularity step apart.
    #[test]
    fn sampler_respects_range_and_step(
        index in arb_index(),
        shape in arb_request_shape(),
    ) {
        let (start, span, duration, granularity) = shape;
        let range_start = base() + Duration::minutes(start);
        let range_end = range_start + Duration::minutes(span);
        let sampler =
            SlotSampler::new(&index, range_start, range_end, duration, granularity).unwrap();
        let candidates: Vec<CandidateSlot> = sampler.collect();
        let step = Duration::minutes(i64::from(granularity));
        for pair in candidates.windows(2) {
            prop_assert_eq!(pair[1].start - pair[0].start, step);
        }
        for c in &candidates {
            prop_assert!(c.end <= range_end);
            prop_assert!(c.start >= range_start);
        }
    }
}
