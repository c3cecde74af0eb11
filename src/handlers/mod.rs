//! NATS message handlers

pub mod ping;
pub mod schedule;

use std::sync::Arc;

use anyhow::Result;
use async_nats::Client;
use tokio::select;
use tracing::{error, info};

use crate::services::scheduling::ScheduleOrchestrator;

pub const SUBJECT_PING: &str = "weekplan.ping";
pub const SUBJECT_SCHEDULE_CREATE: &str = "weekplan.schedule.create";

/// Start all message handlers
pub async fn start_handlers(client: Client, orchestrator: Arc<ScheduleOrchestrator>) -> Result<()> {
    info!("Starting message handlers...");

    let ping_sub = client.subscribe(SUBJECT_PING).await?;
    let schedule_create_sub = client.subscribe(SUBJECT_SCHEDULE_CREATE).await?;

    info!("Subscribed to {} and {}", SUBJECT_PING, SUBJECT_SCHEDULE_CREATE);

    let ping_handle = tokio::spawn(ping::handle_ping(client.clone(), ping_sub));
    let schedule_create_handle = tokio::spawn(schedule::handle_create(
        client.clone(),
        schedule_create_sub,
        orchestrator,
    ));

    // Wait for any handler to finish (they shouldn't unless there's an error)
    select! {
        result = ping_handle => {
            error!("Ping handler finished: {:?}", result);
        }
        result = schedule_create_handle => {
            error!("Schedule create handler finished: {:?}", result);
        }
    }

    Ok(())
}
