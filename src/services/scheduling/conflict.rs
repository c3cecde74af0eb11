//! Time-window capacity check for a weekday
//!
//! This is a capacity test rather than a strict non-overlap test: a truck can
//! serve several nearby stops inside one window as long as the summed work
//! fits into the new job's window.

use crate::types::{Job, ServiceCandidate};

/// Would adding `job` to a day already holding `existing` overstep capacity?
///
/// Jobs without a time window never conflict. Otherwise the durations of all
/// existing candidates whose windows overlap the new window are summed; the
/// day conflicts when that sum plus the new job's duration exceeds the new
/// window's length.
pub fn has_capacity_conflict(existing: &[ServiceCandidate], job: &Job) -> bool {
    let Some(window) = job.time_window.as_ref() else {
        return false;
    };

    let total_overlap_minutes: i64 = existing
        .iter()
        .filter(|candidate| {
            candidate
                .job
                .time_window
                .as_ref()
                .is_some_and(|other| window.overlaps(other))
        })
        .map(|candidate| i64::from(candidate.job.duration_minutes))
        .sum();

    total_overlap_minutes + i64::from(job.duration_minutes) > window.length_minutes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::job::test_support::{job, window};
    use chrono::NaiveDate;

    fn on_tuesday(jobs: &[&Job]) -> Vec<ServiceCandidate> {
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        jobs.iter()
            .map(|j| ServiceCandidate::new(j, monday, 2))
            .collect()
    }

    fn windowed(name: &str, start: &str, end: &str, minutes: u32) -> Job {
        let mut j = job(name);
        j.time_window = window(start, end);
        j.duration_minutes = minutes;
        j
    }

    #[test]
    fn empty_day_never_conflicts() {
        let j = windowed("Acme", "09:00", "09:30", 30);
        assert!(!has_capacity_conflict(&[], &j));
    }

    #[test]
    fn job_longer_than_its_own_window_conflicts_even_alone() {
        assert!(has_capacity_conflict(&[], &windowed("Acme", "09:00", "09:20", 30)));
        assert!(!has_capacity_conflict(&[], &windowed("Acme", "09:00", "09:30", 30)));
    }

    #[test]
    fn job_without_window_bypasses_check() {
        let busy = windowed("Busy", "09:00", "10:00", 60);
        let day = on_tuesday(&[&busy]);

        let mut free = job("Free");
        free.duration_minutes = 600;
        assert!(!has_capacity_conflict(&day, &free));
    }

    #[test]
    fn overlapping_windows_over_capacity_conflict() {
        // 30 min already booked inside 09:00-10:00; 20 more does not fit 09:15-09:45.
        let first = windowed("First", "09:00", "10:00", 30);
        let second = windowed("Second", "09:15", "09:45", 20);
        let day = on_tuesday(&[&first]);

        assert!(has_capacity_conflict(&day, &second));
    }

    #[test]
    fn short_jobs_share_a_window_while_they_fit() {
        let a = windowed("A", "09:00", "10:00", 20);
        let b = windowed("B", "09:00", "10:00", 20);
        let c = windowed("C", "09:00", "10:00", 20);
        let d = windowed("D", "09:00", "10:00", 20);

        assert!(!has_capacity_conflict(&on_tuesday(&[&a]), &b));
        assert!(!has_capacity_conflict(&on_tuesday(&[&a, &b]), &c));
        assert!(has_capacity_conflict(&on_tuesday(&[&a, &b, &c]), &d));
    }

    #[test]
    fn touching_windows_do_not_count() {
        let morning = windowed("Morning", "08:00", "09:00", 60);
        let next = windowed("Next", "09:00", "09:30", 30);

        assert!(!has_capacity_conflict(&on_tuesday(&[&morning]), &next));
    }

    #[test]
    fn windowless_existing_candidates_are_ignored() {
        let mut anytime = job("Anytime");
        anytime.duration_minutes = 240;
        let tight = windowed("Tight", "12:00", "12:30", 30);

        assert!(!has_capacity_conflict(&on_tuesday(&[&anytime]), &tight));
    }
}
