//! # timealign-engine
//!
//! Availability aggregation and meeting-time suggestion for group scheduling.
//!
//! Given a group's members, each member's UTC-normalized busy intervals, a
//! candidate date range, a desired duration, a sampling granularity, and a
//! minimum-coverage threshold, the engine produces a ranked list of meeting
//! suggestions annotated with how many members are free for each slot.
//!
//! Calendar synchronization, recurrence expansion, and timezone conversion
//! all happen upstream; the engine consumes already-normalized busy data
//! through the [`service::CalendarProvider`] trait.
//!
//! ## Modules
//!
//! - [`interval`] — per-member sorted, non-overlapping busy intervals
//! - [`index`] — per-group "how many members are busy here" aggregation
//! - [`sampler`] — lazy candidate-slot enumeration over a date range
//! - [`ranker`] — coverage filtering, run merging, ordering, and capping
//! - [`service`] — request validation and orchestration over collaborators
//! - [`error`] — error types
//!
//! Each computation is a pure function of its inputs: the interval sets and
//! the index live only for the request that built them.

pub mod error;
pub mod index;
pub mod interval;
pub mod ranker;
pub mod sampler;
pub mod service;

pub use error::{EngineError, Result};
pub use index::{AvailabilityIndex, MemberAvailability};
pub use interval::{BusyInterval, IntervalSet};
pub use ranker::{rank_candidates, Suggestion, DEFAULT_MAX_SUGGESTIONS};
pub use sampler::{CandidateSlot, SlotSampler};
pub use service::{
    CalendarProvider, Group, GroupStore, Member, ServiceOptions, SuggestionRequest,
    SuggestionResponse, SuggestionService,
};
