//! Per-group availability aggregation.
//!
//! An [`AvailabilityIndex`] is built once per suggestion request from the
//! group members' interval sets and answers "how many members are busy during
//! this window" without re-deriving anything per query. Member identity is
//! kept — the sets are never merged across members, since the engine reports
//! per-slot available-member counts, not a blended busy timeline.

use crate::interval::IntervalSet;
use chrono::{DateTime, Utc};

/// One member's interval set, tagged with the member id it belongs to.
#[derive(Debug, Clone)]
pub struct MemberAvailability {
    pub member_id: String,
    pub busy: IntervalSet,
}

/// Aggregated busy data for every member of a group, scoped to one request.
#[derive(Debug, Clone)]
pub struct AvailabilityIndex {
    members: Vec<MemberAvailability>,
}

impl AvailabilityIndex {
    pub fn new(members: Vec<MemberAvailability>) -> Self {
        AvailabilityIndex { members }
    }

    pub fn total_members(&self) -> usize {
        self.members.len()
    }

    /// Number of members busy at any point during `[start, end)`.
    ///
    /// A member whose busy interval intersects any portion of the window
    /// counts as busy for the whole window — partial availability does not
    /// count as free. Each member's set answers in O(log n), so a query is
    /// O(m log n) over m members.
    pub fn busy_count_during(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> usize {
        self.members
            .iter()
            .filter(|m| m.busy.is_busy_during(start, end))
            .count()
    }

    /// Number of members free for the entire `[start, end)` window.
    pub fn available_count_during(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> usize {
        self.total_members() - self.busy_count_during(start, end)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberAvailability> {
        self.members.iter()
    }
}
