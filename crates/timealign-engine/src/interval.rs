//! Per-member busy intervals.
//!
//! An [`IntervalSet`] holds one member's busy periods as a sorted,
//! non-overlapping, non-touching sequence, maintained on insert. Containment
//! queries (`is_busy_at`, `is_busy_during`) are answered by binary search.

use crate::error::{EngineError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` period during which a member is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    /// Build an interval, rejecting the degenerate case.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInterval`] unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(EngineError::InvalidInterval { start, end });
        }
        Ok(BusyInterval { start, end })
    }

    /// True when this interval intersects `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }
}

/// All busy periods for one member: sorted ascending by start, with no two
/// intervals overlapping or touching (touching neighbors are merged).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntervalSet {
    intervals: Vec<BusyInterval>,
}

impl IntervalSet {
    /// An empty set; a member with no busy time is available everywhere.
    pub fn new() -> Self {
        IntervalSet::default()
    }

    /// Build a set from any interval sequence; order and overlap in the
    /// input don't matter, each interval is merged on insert.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInterval`] on the first interval whose
    /// start is not strictly before its end.
    pub fn from_intervals<I>(intervals: I) -> Result<Self>
    where
        I: IntoIterator<Item = BusyInterval>,
    {
        let mut set = IntervalSet::new();
        for interval in intervals {
            set.insert(interval)?;
        }
        Ok(set)
    }

    /// Insert a busy interval, merging it with every stored interval it
    /// touches or overlaps so the set stays sorted and non-overlapping.
    ///
    /// Binary search locates the insertion point; only the neighbors actually
    /// absorbed are touched, so this is O(log n + k) for k merged neighbors.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInterval`] unless `start < end`.
    pub fn insert(&mut self, interval: BusyInterval) -> Result<()> {
        if interval.start >= interval.end {
            return Err(EngineError::InvalidInterval {
                start: interval.start,
                end: interval.end,
            });
        }

        // First stored interval that could touch or overlap the new one:
        // everything before it ends strictly before `interval.start`.
        let lo = self.intervals.partition_point(|iv| iv.end < interval.start);
        // One past the last interval that could touch or overlap: everything
        // from here on starts strictly after `interval.end`.
        let hi = self.intervals.partition_point(|iv| iv.start <= interval.end);

        if lo == hi {
            // No neighbor touches the new interval.
            self.intervals.insert(lo, interval);
            return Ok(());
        }

        // Absorb [lo, hi) into a single merged interval.
        let merged = BusyInterval {
            start: interval.start.min(self.intervals[lo].start),
            end: interval.end.max(self.intervals[hi - 1].end),
        };
        self.intervals.splice(lo..hi, std::iter::once(merged));
        Ok(())
    }

    /// Whether the instant falls inside any stored interval.
    pub fn is_busy_at(&self, instant: DateTime<Utc>) -> bool {
        // First interval whose end exceeds `instant`; only it can contain
        // the point, since intervals are sorted and disjoint.
        let idx = self.intervals.partition_point(|iv| iv.end <= instant);
        self.intervals
            .get(idx)
            .is_some_and(|iv| iv.start <= instant)
    }

    /// Whether any stored interval intersects `[start, end)`.
    pub fn is_busy_during(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let idx = self.intervals.partition_point(|iv| iv.end <= start);
        self.intervals
            .get(idx)
            .is_some_and(|iv| iv.overlaps(start, end))
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BusyInterval> {
        self.intervals.iter()
    }
}
