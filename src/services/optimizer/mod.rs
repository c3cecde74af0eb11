//! Route optimizer abstraction
//!
//! The optimizer orders one weekday's visits per truck and reports the
//! visits it could not serve. Production talks to the HTTP service; tests
//! plug in their own implementations.

mod http;

pub use http::{HttpRouteOptimizer, OptimizerConfig};

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{OptimizationRequest, OptimizationResponse};

/// Vehicle-routing optimizer
#[async_trait]
pub trait RouteOptimizer: Send + Sync {
    /// Solve one weekday. Any error is fatal for the scheduling run.
    async fn optimize(&self, request: &OptimizationRequest) -> Result<OptimizationResponse>;

    /// Get service name for logging
    fn name(&self) -> &str;
}
