//! Weekplan Worker - weekly scheduling of recurring service jobs
//!
//! Places open recurring jobs onto the weekdays of a target week, routes each
//! day through the optimization service and returns truck-assigned
//! appointments. Runs as a NATS worker or as a one-shot CLI command.

mod cli;
mod config;
mod db;
mod defaults;
mod error;
mod handlers;
mod services;
mod types;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::services::jobs::{InMemoryJobRepository, JobRepository, PgJobRepository};
use crate::services::optimizer::{HttpRouteOptimizer, RouteOptimizer};
use crate::services::scheduling::ScheduleOrchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs directory - use LOGS_DIR env var or default to ../logs (relative to worker)
    let logs_dir = std::env::var("LOGS_DIR")
        .unwrap_or_else(|_| "../logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        &logs_dir,
        "weekplan-worker.log",
    );
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // stdout stays clean for `schedule` JSON output, so console logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,weekplan_worker=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    info!("Configuration loaded ({} trucks)", config.fleet.len());

    match cli.command {
        None | Some(Command::Serve) => serve(&config).await,
        Some(Command::Schedule { week_start, jobs_file }) => {
            schedule_once(&config, week_start, jobs_file.as_deref()).await
        }
    }
}

/// Build the orchestrator from configuration and a job source
fn build_orchestrator(config: &Config, jobs: Arc<dyn JobRepository>) -> Result<ScheduleOrchestrator> {
    let optimizer: Arc<dyn RouteOptimizer> = Arc::new(HttpRouteOptimizer::new(config.optimizer_config())?);
    info!(
        "Route optimizer initialized: {} at {}",
        optimizer.name(),
        config.optimizer_url
    );

    Ok(ScheduleOrchestrator::new(
        jobs,
        optimizer,
        config.fleet.clone(),
        config.depot_location_id.clone(),
    ))
}

async fn serve(config: &Config) -> Result<()> {
    info!("Starting Weekplan Worker...");

    let pool = db::create_pool(config.require_database_url()?).await?;
    info!("Connected to PostgreSQL");

    let orchestrator = Arc::new(build_orchestrator(config, Arc::new(PgJobRepository::new(pool)))?);

    // Connect to NATS (supports optional NATS_USER/NATS_PASSWORD auth).
    let nats_client = match (std::env::var("NATS_USER"), std::env::var("NATS_PASSWORD")) {
        (Ok(user), Ok(password)) if !user.is_empty() => {
            async_nats::ConnectOptions::new()
                .user_and_password(user, password)
                .connect(&config.nats_url)
                .await?
        }
        _ => async_nats::connect(&config.nats_url).await?,
    };
    info!("Connected to NATS at {}", config.nats_url);

    let handler_result = handlers::start_handlers(nats_client, orchestrator).await;

    if let Err(e) = handler_result {
        error!("Handler error: {}", e);
        return Err(e);
    }

    Ok(())
}

async fn schedule_once(config: &Config, week_start: NaiveDate, jobs_file: Option<&Path>) -> Result<()> {
    let jobs: Arc<dyn JobRepository> = match jobs_file {
        Some(path) => Arc::new(InMemoryJobRepository::from_json_file(path)?),
        None => {
            let pool = db::create_pool(config.require_database_url()?).await?;
            Arc::new(PgJobRepository::new(pool))
        }
    };

    let orchestrator = build_orchestrator(config, jobs)?;
    let result = orchestrator
        .create_schedule_services(week_start)
        .await
        .with_context(|| format!("Scheduling week of {} failed", week_start))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
