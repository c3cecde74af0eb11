//! Weekly scheduling run
//!
//! Loads eligible jobs, plans the week once, routes every weekday that has
//! candidates and folds everything into one `RunResult`. Weekdays are routed
//! concurrently; outcomes are merged in weekday order afterwards.

use std::sync::Arc;
use std::time::Instant;

use chrono::{Datelike, NaiveDate, Weekday};
use futures::future::try_join_all;
use tracing::{debug, info};

use super::planner::plan;
use super::route_request::{build_request, merge_result, DayOutcome};
use crate::error::SchedulingError;
use crate::services::jobs::JobRepository;
use crate::services::optimizer::RouteOptimizer;
use crate::types::{RunResult, ServiceCandidate, Truck, UnscheduledService, WEEKDAYS};

pub struct ScheduleOrchestrator {
    jobs: Arc<dyn JobRepository>,
    optimizer: Arc<dyn RouteOptimizer>,
    fleet: Vec<Truck>,
    depot_location_id: String,
}

impl ScheduleOrchestrator {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        optimizer: Arc<dyn RouteOptimizer>,
        fleet: Vec<Truck>,
        depot_location_id: impl Into<String>,
    ) -> Self {
        Self {
            jobs,
            optimizer,
            fleet,
            depot_location_id: depot_location_id.into(),
        }
    }

    /// Schedule the week beginning on `week_start` (must be a Monday).
    ///
    /// Placement conflicts and unserved visits are reported inside the result.
    /// Repository, optimizer and response-integrity failures abort the run.
    pub async fn create_schedule_services(
        &self,
        week_start: NaiveDate,
    ) -> Result<RunResult, SchedulingError> {
        if week_start.weekday() != Weekday::Mon {
            return Err(SchedulingError::WeekStartNotMonday(week_start));
        }

        let started_at = Instant::now();
        let jobs = self
            .jobs
            .open_recurring_jobs()
            .await
            .map_err(SchedulingError::JobSource)?;
        info!(
            "Scheduling week of {}: {} open recurring jobs from {}",
            week_start,
            jobs.len(),
            self.jobs.name()
        );

        let schedule = plan(jobs, week_start);

        let day_outcomes = try_join_all(
            WEEKDAYS
                .iter()
                .map(|&weekday| self.route_day(weekday, schedule.candidates_on(weekday))),
        )
        .await?;

        let mut scheduled = Vec::new();
        let mut unscheduled: Vec<UnscheduledService> = schedule
            .unscheduled
            .into_iter()
            .map(UnscheduledService::from)
            .collect();
        for outcome in day_outcomes {
            scheduled.extend(outcome.scheduled);
            unscheduled.extend(outcome.unscheduled);
        }

        let result = RunResult::new(scheduled, unscheduled);
        info!(
            "Week of {} scheduled in {} ms: {} services, {} unscheduled",
            week_start,
            started_at.elapsed().as_millis(),
            result.scheduled_services.len(),
            result.unscheduled_services.len()
        );

        Ok(result)
    }

    async fn route_day(
        &self,
        weekday: u8,
        candidates: &[ServiceCandidate],
    ) -> Result<DayOutcome, SchedulingError> {
        if candidates.is_empty() {
            debug!("Weekday {} has no candidates, skipping optimizer", weekday);
            return Ok(DayOutcome::default());
        }

        let request = build_request(candidates, &self.fleet, &self.depot_location_id);
        debug!(
            "Routing weekday {} with {} visits via {}",
            weekday,
            candidates.len(),
            self.optimizer.name()
        );

        let response = self
            .optimizer
            .optimize(&request)
            .await
            .map_err(|cause| SchedulingError::Optimizer { weekday, cause })?;

        merge_result(weekday, candidates, &response, &self.depot_location_id)
    }
}
