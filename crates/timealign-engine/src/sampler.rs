//! Candidate slot enumeration.
//!
//! Walks a date range at a fixed granularity and evaluates each candidate
//! `[start, start + duration)` window against the [`AvailabilityIndex`].
//! Candidates are offsets from `range_start`, not wall-clock-aligned; callers
//! wanting top-of-the-hour slots choose `range_start` accordingly.
//!
//! The sampler is a lazy iterator and each candidate is evaluated from
//! scratch, so it is cheap to clone and restart — nothing about one candidate
//! depends on a previous one.

use crate::error::{EngineError, Result};
use crate::index::AvailabilityIndex;
use chrono::{DateTime, Duration, Utc};

/// One evaluated candidate window, before filtering and ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub available_members: usize,
    pub total_members: usize,
}

impl CandidateSlot {
    /// Fraction of group members free for this slot, in `[0, 1]`.
    pub fn coverage_ratio(&self) -> f64 {
        self.available_members as f64 / self.total_members as f64
    }
}

/// Lazy iterator over candidate slots for one request.
#[derive(Debug, Clone)]
pub struct SlotSampler<'a> {
    index: &'a AvailabilityIndex,
    cursor: DateTime<Utc>,
    range_end: DateTime<Utc>,
    duration: Duration,
    granularity: Duration,
}

impl<'a> SlotSampler<'a> {
    /// Set up sampling of `[range_start, range_end)` with the given duration
    /// and step, both in whole minutes.
    ///
    /// A range too short to fit even one full-duration slot produces an
    /// empty sequence, which is not an error.
    ///
    /// # Errors
    /// Returns [`EngineError::EmptyGroup`] when the index has no members —
    /// coverage is undefined for an empty group, so the sampler refuses to
    /// produce candidates rather than emitting division-by-zero ratios.
    /// Returns [`EngineError::InvalidRequest`] when either duration or
    /// granularity is zero: a zero step would never advance the cursor and
    /// the iterator would never terminate.
    pub fn new(
        index: &'a AvailabilityIndex,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        duration_mins: u32,
        granularity_mins: u32,
    ) -> Result<Self> {
        if index.total_members() == 0 {
            return Err(EngineError::EmptyGroup);
        }
        if duration_mins == 0 {
            return Err(EngineError::InvalidRequest {
                field: "duration_mins",
                reason: "must be positive".to_string(),
            });
        }
        if granularity_mins == 0 {
            return Err(EngineError::InvalidRequest {
                field: "granularity_mins",
                reason: "must be positive".to_string(),
            });
        }
        Ok(SlotSampler {
            index,
            cursor: range_start,
            range_end,
            duration: Duration::minutes(i64::from(duration_mins)),
            granularity: Duration::minutes(i64::from(granularity_mins)),
        })
    }
}

impl Iterator for SlotSampler<'_> {
    type Item = CandidateSlot;

    fn next(&mut self) -> Option<CandidateSlot> {
        let start = self.cursor;
        let end = start + self.duration;
        if end > self.range_end {
            return None;
        }
        self.cursor = start + self.granularity;

        let total = self.index.total_members();
        let busy = self.index.busy_count_during(start, end);
        Some(CandidateSlot {
            start,
            end,
            available_members: total - busy,
            total_members: total,
        })
    }
}
