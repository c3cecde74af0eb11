//! Sources of open recurring jobs
//!
//! `PgJobRepository` reads the CRM database; `InMemoryJobRepository` serves
//! a fixed list (tests and `schedule --jobs-file`).

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::queries;
use crate::types::Job;

/// Job repository trait - the scheduler only needs the eligible set
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// All jobs with status `open` and service type `recurring`
    async fn open_recurring_jobs(&self) -> Result<Vec<Job>>;

    /// Get the name of this repository implementation
    fn name(&self) -> &'static str;
}

/// PostgreSQL-backed repository
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn open_recurring_jobs(&self) -> Result<Vec<Job>> {
        queries::job::list_open_recurring_jobs(&self.pool).await
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

/// Fixed job list, filtered the same way the database query filters
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobRepository {
    jobs: Vec<Job>,
}

impl InMemoryJobRepository {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    /// Load a JSON array of jobs
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read jobs file {}", path.display()))?;
        let jobs: Vec<Job> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse jobs file {}", path.display()))?;

        Ok(Self::new(jobs))
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn open_recurring_jobs(&self) -> Result<Vec<Job>> {
        Ok(self
            .jobs
            .iter()
            .filter(|job| job.is_open_recurring())
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
