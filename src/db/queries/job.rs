//! Job database queries

use anyhow::Result;
use chrono::NaiveTime;
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

use crate::types::{
    Contact, Coordinates, Job, JobStatus, ServiceLocation, ServiceType, TimeOfDay, TimeWindow,
};

/// Row shape of the eligible-jobs query
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub client_name: String,
    pub summary: Option<String>,
    pub status: String,
    pub service_type: String,
    pub services_per_week: Option<i16>,
    pub service_days: Option<Vec<i16>>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub duration_minutes: i32,
    pub location_name: String,
    pub lat: f64,
    pub lng: f64,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        let start = row.start_time.map(TimeOfDay::from_naive);
        let end = row.end_time.map(TimeOfDay::from_naive);
        if start.is_some() != end.is_some() {
            warn!("Job {} has only one time window bound, ignoring the window", row.id);
        }

        let contact = row.contact_name.map(|name| Contact {
            name,
            phone: row.contact_phone,
            email: row.contact_email,
        });

        let status = JobStatus::parse(&row.status).unwrap_or_else(|| {
            warn!("Job {} has unknown status {:?}, treating it as open", row.id, row.status);
            JobStatus::Open
        });
        let service_type = ServiceType::parse(&row.service_type).unwrap_or_else(|| {
            warn!(
                "Job {} has unknown service type {:?}, treating it as recurring",
                row.id, row.service_type
            );
            ServiceType::Recurring
        });
        let duration_minutes = u32::try_from(row.duration_minutes).unwrap_or_else(|_| {
            warn!("Job {} has negative duration {}, using 0", row.id, row.duration_minutes);
            0
        });

        Job {
            id: row.id,
            client_id: row.client_id,
            client_name: row.client_name,
            summary: row.summary,
            status,
            service_type,
            services_per_week: row.services_per_week.and_then(|n| u8::try_from(n).ok()),
            // Out-of-range values map to 0 so the planner reports them
            service_days: row
                .service_days
                .map(|days| days.into_iter().map(|d| u8::try_from(d).unwrap_or(0)).collect()),
            time_window: TimeWindow::from_bounds(start, end),
            duration_minutes,
            location: ServiceLocation {
                name: row.location_name,
                coordinates: Coordinates { lat: row.lat, lng: row.lng },
            },
            contact,
        }
    }
}

/// List all open recurring jobs with their service location and contact
pub async fn list_open_recurring_jobs(pool: &PgPool) -> Result<Vec<Job>> {
    let rows = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT j.id, j.client_id, c.name AS client_name, j.summary,
               j.status, j.service_type, j.services_per_week, j.service_days,
               j.start_time, j.end_time, j.duration_minutes,
               l.name AS location_name, l.lat, l.lng,
               ct.name AS contact_name, ct.phone AS contact_phone, ct.email AS contact_email
        FROM jobs j
        JOIN clients c ON c.id = j.client_id
        JOIN locations l ON l.id = j.location_id
        LEFT JOIN contacts ct ON ct.id = j.contact_id
        WHERE j.status = $1 AND j.service_type = $2
        ORDER BY j.created_at ASC, j.id ASC
        "#,
    )
    .bind(JobStatus::Open.as_str())
    .bind(ServiceType::Recurring.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Job::from).collect())
}
