//! Request orchestration: validation, calendar loading, and the suggestion
//! pipeline.
//!
//! A [`SuggestionService`] owns two collaborators — a [`GroupStore`] for
//! membership and a [`CalendarProvider`] for busy data — and runs one
//! computation per call: validate the request, load each member's intervals,
//! build the [`AvailabilityIndex`], drive the sampler, and rank. Everything
//! built along the way is scoped to the request, so one service value can
//! serve concurrent callers with no coordination.

use crate::error::{EngineError, Result};
use crate::index::{AvailabilityIndex, MemberAvailability};
use crate::interval::{BusyInterval, IntervalSet};
use crate::ranker::{self, Suggestion, DEFAULT_MAX_SUGGESTIONS};
use crate::sampler::{CandidateSlot, SlotSampler};
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// A group participant whose availability matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
}

/// The membership set for which suggestions are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub owner_id: String,
    pub members: Vec<Member>,
}

impl Group {
    /// Member ids with the owner unioned in, deduplicated, owner first then
    /// stored order. Stores are free to list the owner in `members` or not;
    /// either way the owner's availability participates and is counted
    /// exactly once. An empty `owner_id` means the group has no owner on
    /// record and contributes nothing.
    pub fn member_ids(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.members.len() + 1);
        if !self.owner_id.is_empty() {
            seen.push(&self.owner_id);
        }
        for m in &self.members {
            if !seen.contains(&m.id.as_str()) {
                seen.push(&m.id);
            }
        }
        seen
    }
}

/// Membership lookup, backed by whatever store the application uses.
pub trait GroupStore {
    /// # Errors
    /// Returns [`EngineError::NotFound`] when no group has this id.
    fn get_group(&self, group_id: &str) -> Result<Group>;
}

/// Source of already-normalized busy data.
///
/// Implementations return UTC intervals clipped to the requested range;
/// recurrence expansion and timezone conversion happen upstream. A member
/// with no calendar on record yields an empty sequence.
pub trait CalendarProvider {
    /// # Errors
    /// Returns [`EngineError::CalendarUnavailable`] when this member's data
    /// cannot be retrieved.
    fn busy_intervals(
        &self,
        member_id: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Vec<BusyInterval>>;
}

/// One suggestion computation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub group_id: String,
    pub range_start: DateTime<Utc>,
    pub range_end: DateTime<Utc>,
    pub duration_mins: u32,
    pub granularity_mins: u32,
    /// Minimum fraction of members that must be free, in `(0, 1]`.
    pub min_coverage: f64,
}

impl SuggestionRequest {
    /// Check every field invariant, naming the first violated field.
    pub fn validate(&self) -> Result<()> {
        if self.range_end <= self.range_start {
            return Err(invalid(
                "range_end",
                format!(
                    "must be after range_start ({} <= {})",
                    self.range_end, self.range_start
                ),
            ));
        }
        if self.duration_mins == 0 {
            return Err(invalid("duration_mins", "must be positive".into()));
        }
        if self.granularity_mins == 0 {
            return Err(invalid("granularity_mins", "must be positive".into()));
        }
        if self.granularity_mins > self.duration_mins {
            return Err(invalid(
                "granularity_mins",
                format!(
                    "must not exceed duration_mins ({} > {})",
                    self.granularity_mins, self.duration_mins
                ),
            ));
        }
        if !(self.min_coverage > 0.0 && self.min_coverage <= 1.0) {
            return Err(invalid(
                "min_coverage",
                format!("must be in (0, 1], got {}", self.min_coverage),
            ));
        }
        let span = self.range_end - self.range_start;
        if Duration::minutes(i64::from(self.duration_mins)) > span {
            return Err(invalid(
                "duration_mins",
                format!(
                    "duration of {} minutes does not fit the {}-minute range",
                    self.duration_mins,
                    span.num_minutes()
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> EngineError {
    EngineError::InvalidRequest { field, reason }
}

/// The ordered suggestion list for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<Suggestion>,
    /// Group size at computation time; constant across all suggestions in
    /// one response.
    pub total_members: usize,
}

/// Knobs that change service behavior per deployment, not per request.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// When true, a failed calendar load fails the whole request instead of
    /// degrading that member to fully available.
    pub strict_calendar: bool,
    /// Cap on the returned suggestion list.
    pub max_suggestions: usize,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        ServiceOptions {
            strict_calendar: false,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

/// Orchestrates one suggestion computation per call.
pub struct SuggestionService<G, C> {
    groups: G,
    calendars: C,
    options: ServiceOptions,
}

impl<G, C> SuggestionService<G, C>
where
    G: GroupStore,
    C: CalendarProvider,
{
    pub fn new(groups: G, calendars: C) -> Self {
        SuggestionService {
            groups,
            calendars,
            options: ServiceOptions::default(),
        }
    }

    pub fn with_options(groups: G, calendars: C, options: ServiceOptions) -> Self {
        SuggestionService {
            groups,
            calendars,
            options,
        }
    }

    /// Compute ranked suggestions for the request.
    ///
    /// # Errors
    /// [`EngineError::InvalidRequest`] on a parameter violation,
    /// [`EngineError::NotFound`] for an unknown group,
    /// [`EngineError::EmptyGroup`] when the group has no members, and
    /// [`EngineError::CalendarUnavailable`] in strict mode when a member's
    /// data cannot be loaded. A valid request with no qualifying window
    /// succeeds with an empty suggestion list.
    pub fn suggest(&self, request: &SuggestionRequest) -> Result<SuggestionResponse> {
        static NEVER: AtomicBool = AtomicBool::new(false);
        self.suggest_with_cancel(request, &NEVER)
    }

    /// Like [`suggest`](Self::suggest), but checks `cancel` between
    /// candidate evaluations and returns [`EngineError::Cancelled`] as soon
    /// as it is set. Evaluation is stateless per candidate, so aborting
    /// needs no rollback.
    pub fn suggest_with_cancel(
        &self,
        request: &SuggestionRequest,
        cancel: &AtomicBool,
    ) -> Result<SuggestionResponse> {
        request.validate()?;
        debug!(
            "suggest: group={} range=[{}, {}) duration={}m granularity={}m min_coverage={}",
            request.group_id,
            request.range_start,
            request.range_end,
            request.duration_mins,
            request.granularity_mins,
            request.min_coverage
        );

        let group = self.groups.get_group(&request.group_id)?;
        let member_ids = group.member_ids();
        if member_ids.is_empty() {
            return Err(EngineError::EmptyGroup);
        }

        let index = self.build_index(&member_ids, request)?;

        let sampler = SlotSampler::new(
            &index,
            request.range_start,
            request.range_end,
            request.duration_mins,
            request.granularity_mins,
        )?;

        let mut candidates: Vec<CandidateSlot> = Vec::new();
        for slot in sampler {
            if cancel.load(Ordering::Relaxed) {
                return Err(EngineError::Cancelled);
            }
            candidates.push(slot);
        }

        let suggestions = ranker::rank_candidates(
            candidates,
            request.min_coverage,
            Duration::minutes(i64::from(request.granularity_mins)),
            self.options.max_suggestions,
        );

        info!(
            "suggest: group={} returned {} suggestion(s) for {} member(s)",
            request.group_id,
            suggestions.len(),
            index.total_members()
        );
        Ok(SuggestionResponse {
            total_members: index.total_members(),
            suggestions,
        })
    }

    /// Load each member's interval set. A provider failure degrades the
    /// member to an empty set (fully available) unless strict mode is on —
    /// a policy that silently inflates coverage for unlinked members, which
    /// is why every degradation is logged.
    fn build_index(
        &self,
        member_ids: &[&str],
        request: &SuggestionRequest,
    ) -> Result<AvailabilityIndex> {
        let mut members = Vec::with_capacity(member_ids.len());
        for &member_id in member_ids {
            let busy = match self
                .calendars
                .busy_intervals(member_id, request.range_start, request.range_end)
            {
                Ok(intervals) => IntervalSet::from_intervals(intervals)?,
                Err(err) if self.options.strict_calendar => return Err(err),
                Err(err) => {
                    warn!("suggest: degrading member {member_id} to fully available: {err}");
                    IntervalSet::new()
                }
            };
            members.push(MemberAvailability {
                member_id: member_id.to_string(),
                busy,
            });
        }
        Ok(AvailabilityIndex::new(members))
    }
}
