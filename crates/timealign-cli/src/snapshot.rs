//! Snapshot-backed collaborators.
//!
//! A [`Snapshot`] is the CLI's stand-in for the group store and calendar
//! provider a deployed service would talk to: one JSON document carrying the
//! group and every member's busy intervals. It implements both engine
//! collaborator traits directly, clipping intervals to the requested range
//! the way a real provider is contracted to.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use timealign_engine::{BusyInterval, CalendarProvider, EngineError, Group, GroupStore};

#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub group: Group,
    /// Busy intervals keyed by member id; members absent from the map have
    /// no calendar on record and count as fully available.
    #[serde(default)]
    pub busy: HashMap<String, Vec<BusyInterval>>,
}

impl Snapshot {
    /// Reject malformed snapshots before any computation starts: busy data
    /// for unknown members and backwards intervals both mean the file was
    /// produced wrong.
    pub fn check(&self) -> Result<()> {
        // The owner belongs to the group whether or not `members` lists them.
        let known = self.group.member_ids();
        for (member_id, intervals) in &self.busy {
            if !known.contains(&member_id.as_str()) {
                bail!("busy data for '{member_id}', which is not a member of the group");
            }
            for iv in intervals {
                if iv.start >= iv.end {
                    bail!(
                        "member '{member_id}' has an invalid busy interval: {} >= {}",
                        iv.start,
                        iv.end
                    );
                }
            }
        }
        Ok(())
    }

    pub fn busy_for(&self, member_id: &str) -> &[BusyInterval] {
        self.busy.get(member_id).map_or(&[], Vec::as_slice)
    }
}

impl GroupStore for Snapshot {
    fn get_group(&self, group_id: &str) -> timealign_engine::Result<Group> {
        if self.group.id == group_id {
            Ok(self.group.clone())
        } else {
            Err(EngineError::NotFound(group_id.to_string()))
        }
    }
}

impl CalendarProvider for Snapshot {
    fn busy_intervals(
        &self,
        member_id: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> timealign_engine::Result<Vec<BusyInterval>> {
        // Clip to the requested range, discarding intervals entirely outside.
        self.busy_for(member_id)
            .iter()
            .filter(|iv| iv.start < range_end && iv.end > range_start)
            .map(|iv| BusyInterval::new(iv.start.max(range_start), iv.end.min(range_end)))
            .collect()
    }
}
