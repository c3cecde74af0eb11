use chrono::NaiveTime;

use crate::types::{TimeOfDay, Truck};

pub const DEFAULT_OPTIMIZER_TIMEOUT_SECONDS: u64 = 60;

/// Location id the optimizer uses for depot stops
pub const DEFAULT_DEPOT_LOCATION_ID: &str = "depot";

pub fn default_shift_start() -> TimeOfDay {
    TimeOfDay::from_naive(NaiveTime::from_hms_opt(8, 0, 0).expect("valid static default shift start"))
}

pub fn default_shift_end() -> TimeOfDay {
    TimeOfDay::from_naive(NaiveTime::from_hms_opt(21, 0, 0).expect("valid static default shift end"))
}

/// Fleet used when `FLEET_JSON` is not set: two trucks from the main depot
pub fn default_fleet() -> Vec<Truck> {
    ["truck-1", "truck-2"]
        .into_iter()
        .map(|id| Truck {
            id: id.to_string(),
            depot_lat: 50.0755,
            depot_lng: 14.4378,
            shift_start: default_shift_start(),
            shift_end: default_shift_end(),
        })
        .collect()
}
