//! Route optimizer wire types
//!
//! One request per weekday: visits keyed by candidate id plus the fleet.
//! Field names are snake_case to match the optimizer API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::TimeOfDay;

/// Request body sent to the optimizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub visits: BTreeMap<String, VisitDescriptor>,
    pub fleet: BTreeMap<String, FleetVehicle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitDescriptor {
    /// `null` when the job has no time window
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
    /// Minutes on site
    pub duration: u32,
    pub location: VisitLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitLocation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetVehicle {
    pub start_location: DepotLocation,
    pub shift_start: TimeOfDay,
    pub shift_end: TimeOfDay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepotLocation {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
}

/// Response body returned by the optimizer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizationResponse {
    /// Ordered stops per truck id
    #[serde(default)]
    pub solution: BTreeMap<String, Vec<RouteVisit>>,
    /// Candidate id → reason the optimizer left it out
    #[serde(default)]
    pub unserved: BTreeMap<String, String>,
}

/// A stop on a truck's route; depot stops carry the depot location id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteVisit {
    pub location_id: String,
    pub arrival_time: String,
    #[serde(default)]
    pub finish_time: Option<String>,
}
