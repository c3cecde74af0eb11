//! Configuration management

use anyhow::{self, Context, Result};

use crate::defaults::{default_fleet, DEFAULT_DEPOT_LOCATION_ID, DEFAULT_OPTIMIZER_TIMEOUT_SECONDS};
use crate::services::optimizer::OptimizerConfig;
use crate::types::Truck;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// NATS server URL
    pub nats_url: String,

    /// PostgreSQL connection string (needed unless jobs come from a file)
    pub database_url: Option<String>,

    /// Route optimizer endpoint
    pub optimizer_url: String,

    /// Static bearer token for the optimizer
    pub optimizer_token: Option<String>,

    /// Optimizer request timeout in seconds
    pub optimizer_timeout_seconds: u64,

    /// Location id the optimizer reports for depot stops
    pub depot_location_id: String,

    /// Trucks sent with every optimization request
    pub fleet: Vec<Truck>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let nats_url = std::env::var("NATS_URL")
            .unwrap_or_else(|_| "nats://localhost:4222".to_string());

        let database_url = std::env::var("DATABASE_URL").ok();

        let optimizer_url = std::env::var("OPTIMIZER_URL")
            .context("OPTIMIZER_URL must be set")?;

        let optimizer_token = std::env::var("OPTIMIZER_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        let optimizer_timeout_seconds = match std::env::var("OPTIMIZER_TIMEOUT_SECONDS") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("OPTIMIZER_TIMEOUT_SECONDS is not a number: {value}"))?,
            Err(_) => DEFAULT_OPTIMIZER_TIMEOUT_SECONDS,
        };

        let depot_location_id = std::env::var("OPTIMIZER_DEPOT_LOCATION_ID")
            .unwrap_or_else(|_| DEFAULT_DEPOT_LOCATION_ID.to_string());

        let fleet = match std::env::var("FLEET_JSON") {
            Ok(json) => parse_fleet(&json)?,
            Err(_) => {
                tracing::warn!("FLEET_JSON not set, using the default two-truck fleet");
                default_fleet()
            }
        };

        Ok(Self {
            nats_url,
            database_url,
            optimizer_url,
            optimizer_token,
            optimizer_timeout_seconds,
            depot_location_id,
            fleet,
        })
    }

    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set")
    }

    pub fn optimizer_config(&self) -> OptimizerConfig {
        let mut config = OptimizerConfig::new(self.optimizer_url.clone());
        config.token = self.optimizer_token.clone();
        config.timeout_seconds = self.optimizer_timeout_seconds;
        config
    }
}

/// Parse and validate a fleet list
fn parse_fleet(json: &str) -> Result<Vec<Truck>> {
    let fleet: Vec<Truck> = serde_json::from_str(json).context("FLEET_JSON is not a valid truck list")?;

    if fleet.is_empty() {
        anyhow::bail!("FLEET_JSON must contain at least one truck");
    }
    for truck in &fleet {
        if truck.shift_minutes() <= 0 {
            anyhow::bail!(
                "Truck {} has shift end {} not after shift start {}",
                truck.id,
                truck.shift_end,
                truck.shift_start
            );
        }
    }
    let mut ids: Vec<&str> = fleet.iter().map(|t| t.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.len() != fleet.len() {
        anyhow::bail!("FLEET_JSON contains duplicate truck ids");
    }

    Ok(fleet)
}
