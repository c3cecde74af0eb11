//! Weekly job-to-route scheduling
//!
//! Placement (conflict check, day table, planner) is synchronous and pure;
//! only the orchestrator talks to the job repository and the optimizer.

pub mod conflict;
pub mod day_options;
pub mod orchestrator;
pub mod planner;
pub mod route_request;

pub use orchestrator::ScheduleOrchestrator;
