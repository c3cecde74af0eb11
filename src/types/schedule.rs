//! Weekly schedule types: candidates, planner output and the run result

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Contact, Job, ServiceLocation, TimeOfDay, FIRST_WEEKDAY, LAST_WEEKDAY};

/// Weekday indices the scheduler places jobs on, Monday first
pub const WEEKDAYS: [u8; 5] = [1, 2, 3, 4, 5];

/// One proposed placement of a job on a date of the target week
#[derive(Debug, Clone)]
pub struct ServiceCandidate {
    /// Fresh per placement; a job placed on three days has three ids
    pub id: Uuid,
    pub weekday: u8,
    pub date: NaiveDate,
    pub job: Job,
}

impl ServiceCandidate {
    pub fn new(job: &Job, week_start: NaiveDate, weekday: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            weekday,
            date: date_for_weekday(week_start, weekday),
            job: job.clone(),
        }
    }
}

/// Calendar date of `weekday` (1 = Monday) in the week starting at `week_start`
pub fn date_for_weekday(week_start: NaiveDate, weekday: u8) -> NaiveDate {
    let offset = u64::from(weekday.saturating_sub(FIRST_WEEKDAY));
    week_start
        .checked_add_days(Days::new(offset))
        .unwrap_or(week_start)
}

/// Job the planner could not place at all
#[derive(Debug, Clone)]
pub struct UnscheduledJob {
    pub job: Job,
    pub reason: String,
}

/// Planner output: candidates per weekday plus jobs left out
#[derive(Debug, Clone)]
pub struct WeeklySchedule {
    pub week_start: NaiveDate,
    days: BTreeMap<u8, Vec<ServiceCandidate>>,
    pub unscheduled: Vec<UnscheduledJob>,
}

impl WeeklySchedule {
    pub fn new(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            days: WEEKDAYS.iter().map(|&day| (day, Vec::new())).collect(),
            unscheduled: Vec::new(),
        }
    }

    /// Candidates on a weekday in placement order
    pub fn candidates_on(&self, weekday: u8) -> &[ServiceCandidate] {
        self.days.get(&weekday).map(Vec::as_slice).unwrap_or_default()
    }

    /// Place `job` on `weekday`, returning the new candidate id.
    /// Placing a job twice on the same day is a no-op returning the existing id.
    pub fn place(&mut self, job: &Job, weekday: u8) -> Uuid {
        debug_assert!((FIRST_WEEKDAY..=LAST_WEEKDAY).contains(&weekday));
        let week_start = self.week_start;
        let day = self.days.entry(weekday).or_default();
        if let Some(existing) = day.iter().find(|c| c.job.id == job.id) {
            return existing.id;
        }
        let candidate = ServiceCandidate::new(job, week_start, weekday);
        let id = candidate.id;
        day.push(candidate);
        id
    }

    pub fn mark_unscheduled(&mut self, job: Job, reason: impl Into<String>) {
        self.unscheduled.push(UnscheduledJob {
            job,
            reason: reason.into(),
        });
    }

    /// Weekdays a job has candidates on, ascending
    #[cfg(test)]
    pub fn days_for_job(&self, job_id: Uuid) -> Vec<u8> {
        self.days
            .iter()
            .filter(|(_, candidates)| candidates.iter().any(|c| c.job.id == job_id))
            .map(|(&day, _)| day)
            .collect()
    }

    #[cfg(test)]
    pub fn is_unscheduled(&self, job_id: Uuid) -> bool {
        self.unscheduled.iter().any(|u| u.job.id == job_id)
    }

    pub fn total_candidates(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

/// Status of a produced appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduledServiceStatus {
    Scheduled,
}

/// Truck-assigned, timestamped appointment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledService {
    /// Candidate id the optimizer routed
    pub id: Uuid,
    pub job_id: Uuid,
    pub truck_id: String,
    /// 1 = Monday … 5 = Friday
    pub weekday: u8,
    pub date: NaiveDate,
    pub scheduled_at: NaiveDateTime,
    pub arrival_time: TimeOfDay,
    pub finish_time: Option<TimeOfDay>,
    pub client_id: Uuid,
    pub client_name: String,
    pub summary: Option<String>,
    pub location: ServiceLocation,
    pub contact: Option<Contact>,
    pub duration_minutes: u32,
    pub status: ScheduledServiceStatus,
}

impl ScheduledService {
    pub fn from_candidate(
        candidate: &ServiceCandidate,
        truck_id: &str,
        arrival_time: TimeOfDay,
        finish_time: Option<TimeOfDay>,
    ) -> Self {
        let job = &candidate.job;
        Self {
            id: candidate.id,
            job_id: job.id,
            truck_id: truck_id.to_string(),
            weekday: candidate.weekday,
            date: candidate.date,
            scheduled_at: candidate.date.and_time(arrival_time.to_naive_time()),
            arrival_time,
            finish_time,
            client_id: job.client_id,
            client_name: job.client_name.clone(),
            summary: job.summary.clone(),
            location: job.location.clone(),
            contact: job.contact.clone(),
            duration_minutes: job.duration_minutes,
            status: ScheduledServiceStatus::Scheduled,
        }
    }
}

/// A job or candidate that did not make it into the week, with the reason.
/// `candidate_id`/`date` are set when the route optimizer declined the visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnscheduledService {
    pub job: Job,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub reason: String,
}

impl UnscheduledService {
    pub fn from_candidate(candidate: &ServiceCandidate, reason: impl Into<String>) -> Self {
        Self {
            job: candidate.job.clone(),
            candidate_id: Some(candidate.id),
            date: Some(candidate.date),
            reason: reason.into(),
        }
    }
}

impl From<UnscheduledJob> for UnscheduledService {
    fn from(value: UnscheduledJob) -> Self {
        Self {
            job: value.job,
            candidate_id: None,
            date: None,
            reason: value.reason,
        }
    }
}

/// Aggregate outcome of one weekly scheduling run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub success: bool,
    pub scheduled_services: Vec<ScheduledService>,
    pub unscheduled_services: Vec<UnscheduledService>,
}

impl RunResult {
    pub fn new(
        scheduled_services: Vec<ScheduledService>,
        unscheduled_services: Vec<UnscheduledService>,
    ) -> Self {
        Self {
            success: unscheduled_services.is_empty(),
            scheduled_services,
            unscheduled_services,
        }
    }
}
