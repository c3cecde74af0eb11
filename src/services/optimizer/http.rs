//! HTTP client for the route optimization service

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::RouteOptimizer;
use crate::defaults::DEFAULT_OPTIMIZER_TIMEOUT_SECONDS;
use crate::types::{OptimizationRequest, OptimizationResponse};

/// Optimizer client configuration
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Full endpoint URL the request body is POSTed to
    pub url: String,
    /// Static bearer token, if the service requires one
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl OptimizerConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            timeout_seconds: DEFAULT_OPTIMIZER_TIMEOUT_SECONDS,
        }
    }
}

/// Route optimizer reached over HTTP
pub struct HttpRouteOptimizer {
    client: Client,
    config: OptimizerConfig,
}

impl HttpRouteOptimizer {
    pub fn new(config: OptimizerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client for route optimizer")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl RouteOptimizer for HttpRouteOptimizer {
    async fn optimize(&self, request: &OptimizationRequest) -> Result<OptimizationResponse> {
        debug!(
            "Requesting route optimization for {} visits and {} trucks",
            request.visits.len(),
            request.fleet.len()
        );

        let mut builder = self.client.post(&self.config.url).json(request);
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .context("Failed to send request to route optimizer")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Route optimizer returned error {}: {}", status, body);
        }

        let solution: OptimizationResponse = response
            .json()
            .await
            .context("Failed to parse route optimizer response")?;

        debug!(
            "Route optimizer answered with {} routes and {} unserved visits",
            solution.solution.len(),
            solution.unserved.len()
        );

        Ok(solution)
    }

    fn name(&self) -> &str {
        "HttpRouteOptimizer"
    }
}
