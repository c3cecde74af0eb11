//! Per-weekday optimizer request building and result merging

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::SchedulingError;
use crate::types::{
    DepotLocation, FleetVehicle, OptimizationRequest, OptimizationResponse, ScheduledService,
    ServiceCandidate, TimeOfDay, Truck, UnscheduledService, VisitDescriptor, VisitLocation,
};

/// Merged optimizer outcome for one weekday
#[derive(Debug, Clone, Default)]
pub struct DayOutcome {
    pub scheduled: Vec<ScheduledService>,
    pub unscheduled: Vec<UnscheduledService>,
}

/// Build the optimizer request for one weekday's candidates
pub fn build_request(
    candidates: &[ServiceCandidate],
    fleet: &[Truck],
    depot_location_id: &str,
) -> OptimizationRequest {
    let visits = candidates
        .iter()
        .map(|candidate| {
            let job = &candidate.job;
            let window = job.time_window.as_ref();
            let visit = VisitDescriptor {
                start: window.map(|w| w.start.clone()),
                end: window.map(|w| w.end.clone()),
                duration: job.duration_minutes,
                location: VisitLocation {
                    name: job.location.name.clone(),
                    lat: job.location.coordinates.lat,
                    lng: job.location.coordinates.lng,
                },
            };
            (candidate.id.to_string(), visit)
        })
        .collect();

    let fleet = fleet
        .iter()
        .map(|truck| {
            let vehicle = FleetVehicle {
                start_location: DepotLocation {
                    id: depot_location_id.to_string(),
                    lat: truck.depot_lat,
                    lng: truck.depot_lng,
                },
                shift_start: truck.shift_start.clone(),
                shift_end: truck.shift_end.clone(),
            };
            (truck.id.clone(), vehicle)
        })
        .collect();

    OptimizationRequest { visits, fleet }
}

/// Turn the optimizer response for one weekday into appointments and
/// unserved entries.
///
/// Every candidate sent must come back exactly once, either on a truck route
/// or in `unserved`; anything else means request and response do not belong
/// together and the run is aborted.
pub fn merge_result(
    weekday: u8,
    candidates: &[ServiceCandidate],
    response: &OptimizationResponse,
    depot_location_id: &str,
) -> Result<DayOutcome, SchedulingError> {
    let by_id: HashMap<String, &ServiceCandidate> = candidates
        .iter()
        .map(|candidate| (candidate.id.to_string(), candidate))
        .collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(candidates.len());
    let mut outcome = DayOutcome::default();

    for (visit_id, reason) in &response.unserved {
        let candidate = resolve(&by_id, &mut seen, weekday, visit_id)?;
        debug!(
            "Optimizer left visit {} (job {}) unserved on weekday {}: {}",
            visit_id, candidate.job.id, weekday, reason
        );
        outcome
            .unscheduled
            .push(UnscheduledService::from_candidate(candidate, reason.clone()));
    }

    for (truck_id, visits) in &response.solution {
        for visit in visits {
            if visit.location_id == depot_location_id {
                continue;
            }
            let candidate = resolve(&by_id, &mut seen, weekday, &visit.location_id)?;

            let arrival = TimeOfDay::parse(&visit.arrival_time).map_err(|_| {
                SchedulingError::InvalidArrivalTime {
                    visit_id: visit.location_id.clone(),
                    value: visit.arrival_time.clone(),
                }
            })?;
            let finish = visit.finish_time.as_deref().and_then(|value| {
                TimeOfDay::parse(value)
                    .map_err(|e| warn!("Ignoring finish time of visit {}: {}", visit.location_id, e))
                    .ok()
            });

            outcome.scheduled.push(ScheduledService::from_candidate(
                candidate, truck_id, arrival, finish,
            ));
        }
    }

    if let Some(missing) = candidates
        .iter()
        .find(|candidate| !seen.contains(candidate.id.to_string().as_str()))
    {
        return Err(SchedulingError::MissingVisit {
            weekday,
            visit_id: missing.id,
        });
    }

    Ok(outcome)
}

fn resolve<'a>(
    by_id: &'a HashMap<String, &'a ServiceCandidate>,
    seen: &mut HashSet<&'a str>,
    weekday: u8,
    visit_id: &str,
) -> Result<&'a ServiceCandidate, SchedulingError> {
    let (key, candidate) = by_id.get_key_value(visit_id).ok_or_else(|| {
        SchedulingError::UnknownVisit {
            weekday,
            visit_id: visit_id.to_string(),
        }
    })?;

    if !seen.insert(key.as_str()) {
        return Err(SchedulingError::DuplicateVisit {
            weekday,
            visit_id: visit_id.to_string(),
        });
    }

    Ok(*candidate)
}
