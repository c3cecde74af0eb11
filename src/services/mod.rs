//! Business logic services

pub mod jobs;
pub mod optimizer;
pub mod scheduling;
