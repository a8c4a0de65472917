//! Error types for suggestion computations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A request parameter failed validation. `field` names the offending
    /// parameter so callers can surface it to the user.
    #[error("invalid request: {field}: {reason}")]
    InvalidRequest { field: &'static str, reason: String },

    /// The group has no members; coverage is undefined for an empty group.
    /// Distinct from a valid request that simply finds no suggestions.
    #[error("group has no members")]
    EmptyGroup,

    /// No group exists with the requested id.
    #[error("group not found: {0}")]
    NotFound(String),

    /// A busy interval whose start is not strictly before its end. Intervals
    /// like this reaching the engine mean an upstream contract was broken.
    #[error("invalid busy interval: start {start} must precede end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Calendar data could not be loaded for a member. Fatal only in strict
    /// mode; otherwise the member is degraded to fully available.
    #[error("calendar data unavailable for member {member_id}: {reason}")]
    CalendarUnavailable { member_id: String, reason: String },

    /// The caller cancelled the computation between candidate evaluations.
    #[error("suggestion computation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, EngineError>;
