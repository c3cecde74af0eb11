//! Run-level scheduling errors
//!
//! Placement conflicts and optimizer-unserved visits are not errors; they
//! end up in `RunResult::unscheduled_services`. Everything here aborts a run.

use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    #[error("week start {0} is not a Monday")]
    WeekStartNotMonday(NaiveDate),

    #[error("failed to load open recurring jobs: {0:#}")]
    JobSource(anyhow::Error),

    #[error("route optimizer failed for weekday {weekday}: {cause:#}")]
    Optimizer { weekday: u8, cause: anyhow::Error },

    #[error("optimizer returned visit {visit_id} for weekday {weekday} that was not requested")]
    UnknownVisit { weekday: u8, visit_id: String },

    #[error("visit {visit_id} sent for weekday {weekday} is missing from the optimizer response")]
    MissingVisit { weekday: u8, visit_id: Uuid },

    #[error("optimizer returned visit {visit_id} for weekday {weekday} more than once")]
    DuplicateVisit { weekday: u8, visit_id: String },

    #[error("optimizer returned arrival time {value:?} for visit {visit_id}")]
    InvalidArrivalTime { visit_id: String, value: String },
}

impl SchedulingError {
    /// Error code reported to NATS callers
    pub const fn code(&self) -> &'static str {
        match self {
            SchedulingError::WeekStartNotMonday(_) => "INVALID_WEEK_START",
            SchedulingError::JobSource(_) => "JOB_SOURCE_ERROR",
            SchedulingError::Optimizer { .. } => "OPTIMIZER_ERROR",
            SchedulingError::UnknownVisit { .. }
            | SchedulingError::MissingVisit { .. }
            | SchedulingError::DuplicateVisit { .. }
            | SchedulingError::InvalidArrivalTime { .. } => "DATA_INTEGRITY_ERROR",
        }
    }
}
