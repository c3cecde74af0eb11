//! Recurring service job types
//!
//! Jobs are owned by the CRM side; the scheduler only reads them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TimeOfDay;

/// First and last schedulable weekday (Monday = 1 … Friday = 5)
pub const FIRST_WEEKDAY: u8 = 1;
pub const LAST_WEEKDAY: u8 = 5;

/// GPS coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    OnHold,
    Closed,
}

impl JobStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::OnHold => "on_hold",
            JobStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(JobStatus::Open),
            "on_hold" => Some(JobStatus::OnHold),
            "closed" => Some(JobStatus::Closed),
            _ => None,
        }
    }
}

/// Kind of service contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Recurring,
    OneTime,
}

impl ServiceType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ServiceType::Recurring => "recurring",
            ServiceType::OneTime => "one_time",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "recurring" => Some(ServiceType::Recurring),
            "one_time" => Some(ServiceType::OneTime),
            _ => None,
        }
    }
}

/// Daily window in which a job may be serviced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeWindow {
    #[cfg(test)]
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Build a window from optional bounds; a window needs both.
    pub fn from_bounds(start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(Self { start, end }),
            _ => None,
        }
    }

    pub fn length_minutes(&self) -> i64 {
        self.start.minutes_until(&self.end)
    }

    /// Strict overlap on `HH:mm` values; touching windows do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Where the service is performed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLocation {
    pub name: String,
    pub coordinates: Coordinates,
}

/// On-site contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A client's recurring service contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub client_id: Uuid,
    pub client_name: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub status: JobStatus,
    pub service_type: ServiceType,
    /// Desired visits per week (1-5); ignored when `service_days` is set
    #[serde(default)]
    pub services_per_week: Option<u8>,
    /// Explicit weekday indices (1 = Monday … 5 = Friday)
    #[serde(default)]
    pub service_days: Option<Vec<u8>>,
    #[serde(default)]
    pub time_window: Option<TimeWindow>,
    pub duration_minutes: u32,
    pub location: ServiceLocation,
    #[serde(default)]
    pub contact: Option<Contact>,
}

impl Job {
    pub fn is_open_recurring(&self) -> bool {
        self.status == JobStatus::Open && self.service_type == ServiceType::Recurring
    }

    /// Explicit weekdays with duplicates collapsed, first occurrence kept.
    /// An empty list counts as no explicit days.
    pub fn explicit_days(&self) -> Option<Vec<u8>> {
        let days = self.service_days.as_ref()?;
        let mut unique: Vec<u8> = Vec::with_capacity(days.len());
        for &day in days {
            if !unique.contains(&day) {
                unique.push(day);
            }
        }
        if unique.is_empty() {
            None
        } else {
            Some(unique)
        }
    }

    /// True when an explicit weekday falls outside Monday..Friday
    pub fn has_invalid_service_days(&self) -> bool {
        self.service_days
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|day| !(FIRST_WEEKDAY..=LAST_WEEKDAY).contains(day))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Minimal open recurring job for planner/merger tests
    pub fn job(name: &str) -> Job {
        Job {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            client_name: format!("{name} Ltd"),
            summary: Some(format!("{name} weekly service")),
            status: JobStatus::Open,
            service_type: ServiceType::Recurring,
            services_per_week: Some(1),
            service_days: None,
            time_window: None,
            duration_minutes: 30,
            location: ServiceLocation {
                name: format!("{name} site"),
                coordinates: Coordinates { lat: 50.0755, lng: 14.4378 },
            },
            contact: Some(Contact {
                name: "Site Manager".to_string(),
                phone: Some("+420 123 456 789".to_string()),
                email: None,
            }),
        }
    }

    pub fn window(start: &str, end: &str) -> Option<TimeWindow> {
        Some(TimeWindow::new(
            TimeOfDay::parse(start).unwrap(),
            TimeOfDay::parse(end).unwrap(),
        ))
    }
}
