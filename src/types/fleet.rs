//! Fleet configuration sent with every optimization request

use serde::{Deserialize, Serialize};

use super::TimeOfDay;

/// A truck available for the week, starting from its depot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    pub id: String,
    pub depot_lat: f64,
    pub depot_lng: f64,
    pub shift_start: TimeOfDay,
    pub shift_end: TimeOfDay,
}

impl Truck {
    pub fn shift_minutes(&self) -> i64 {
        self.shift_start.minutes_until(&self.shift_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truck_parses_from_snake_case_json() {
        let json = r#"{"id": "truck-7", "depot_lat": 50.08, "depot_lng": 14.42,
                       "shift_start": "07:30", "shift_end": "16:00"}"#;
        let truck: Truck = serde_json::from_str(json).unwrap();

        assert_eq!(truck.id, "truck-7");
        assert_eq!(truck.shift_start.as_str(), "07:30");
        assert_eq!(truck.shift_minutes(), 510);
    }
}
