//! Weekly schedule creation handler

use std::sync::Arc;

use anyhow::Result;
use async_nats::{Client, Subscriber};
use futures::StreamExt;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::services::scheduling::ScheduleOrchestrator;
use crate::types::{CreateScheduleRequest, ErrorResponse, Request, SuccessResponse};

/// Handle weekplan.schedule.create requests
pub async fn handle_create(
    client: Client,
    mut subscriber: Subscriber,
    orchestrator: Arc<ScheduleOrchestrator>,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        let reply = match msg.reply {
            Some(ref r) => r.clone(),
            None => continue,
        };

        let body = create_reply(&orchestrator, &msg.payload).await?;

        if let Err(e) = client.publish(reply, body.into()).await {
            error!("Failed to publish schedule create reply: {}", e);
        }
    }

    Ok(())
}

/// Run one schedule request and serialize the reply envelope
async fn create_reply(orchestrator: &ScheduleOrchestrator, payload: &[u8]) -> Result<Vec<u8>> {
    let request: Request<CreateScheduleRequest> = match serde_json::from_slice(payload) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse schedule create request: {}", e);
            let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
            return Ok(serde_json::to_vec(&error)?);
        }
    };

    let week_start = request.payload.beginning_of_week;
    info!("Schedule create request {} for week of {}", request.id, week_start);

    let body = match orchestrator.create_schedule_services(week_start).await {
        Ok(result) => {
            if !result.success {
                warn!(
                    "Week of {} left {} services unscheduled",
                    week_start,
                    result.unscheduled_services.len()
                );
            }
            serde_json::to_vec(&SuccessResponse::new(request.id, result))?
        }
        Err(e) => {
            error!("Scheduling week of {} failed: {}", week_start, e);
            serde_json::to_vec(&ErrorResponse::new(request.id, e.code(), e.to_string()))?
        }
    };

    Ok(body)
}
