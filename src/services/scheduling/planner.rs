//! Weekly placement planner
//!
//! Jobs are split into four disjoint tiers and placed tier by tier, each tier
//! seeing only what the previous ones left over:
//!
//! - A: time window and explicit days, checked day by day for conflicts
//! - B: time window only, first conflict-free day combination wins
//! - C: explicit days only, placed unconditionally
//! - D: neither, first day combination placed unconditionally

use chrono::NaiveDate;
use tracing::{debug, info};

use super::conflict::has_capacity_conflict;
use super::day_options::day_options_for;
use crate::types::{Job, WeeklySchedule};

pub const REASON_DAY_CONFLICT: &str = "conflicts with other jobs on these days and times";
pub const REASON_NO_WINDOW_DAYS: &str = "could not find service days that work for this time window";
pub const REASON_INVALID_DAYS: &str = "service days must be between Monday (1) and Friday (5)";

/// Place `jobs` onto the weekdays of the week starting at `week_start`
pub fn plan(jobs: Vec<Job>, week_start: NaiveDate) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::new(week_start);
    let total = jobs.len();

    let (invalid, jobs): (Vec<Job>, Vec<Job>) =
        jobs.into_iter().partition(Job::has_invalid_service_days);
    for job in invalid {
        debug!("Job {} has service days outside Monday-Friday", job.id);
        schedule.mark_unscheduled(job, REASON_INVALID_DAYS);
    }

    let (windowed_with_days, rest): (Vec<Job>, Vec<Job>) = jobs
        .into_iter()
        .partition(|job| job.time_window.is_some() && job.explicit_days().is_some());
    let (windowed, rest): (Vec<Job>, Vec<Job>) =
        rest.into_iter().partition(|job| job.time_window.is_some());
    let (with_days, flexible): (Vec<Job>, Vec<Job>) =
        rest.into_iter().partition(|job| job.explicit_days().is_some());

    debug!(
        "Planner tiers: explicit={} windowed={} days_only={} flexible={}",
        windowed_with_days.len(),
        windowed.len(),
        with_days.len(),
        flexible.len()
    );

    place_windowed_with_days(&mut schedule, windowed_with_days);
    place_windowed(&mut schedule, windowed);
    place_days_only(&mut schedule, with_days);
    place_flexible(&mut schedule, flexible);

    info!(
        "Planned {} jobs for week of {}: {} candidates, {} unscheduled",
        total,
        week_start,
        schedule.total_candidates(),
        schedule.unscheduled.len()
    );

    schedule
}

/// Tier A. Days are placed in listed order until the first conflicting day;
/// the job is then reported unscheduled while the days already placed stay.
fn place_windowed_with_days(schedule: &mut WeeklySchedule, jobs: Vec<Job>) {
    for job in jobs {
        let days = job.explicit_days().unwrap_or_default();
        for day in days {
            if has_capacity_conflict(schedule.candidates_on(day), &job) {
                debug!("Job {} conflicts on weekday {}", job.id, day);
                schedule.mark_unscheduled(job.clone(), REASON_DAY_CONFLICT);
                break;
            }
            schedule.place(&job, day);
        }
    }
}

/// Tier B. Earliest windows go first; ties keep input order.
fn place_windowed(schedule: &mut WeeklySchedule, mut jobs: Vec<Job>) {
    jobs.sort_by(|a, b| window_start(a).cmp(&window_start(b)));

    for job in jobs {
        let options = job.services_per_week.map(day_options_for).unwrap_or_default();
        let chosen = options.iter().find(|days| {
            days.iter()
                .all(|&day| !has_capacity_conflict(schedule.candidates_on(day), &job))
        });

        match chosen {
            Some(days) => {
                for &day in days.iter() {
                    schedule.place(&job, day);
                }
            }
            None => {
                debug!("No conflict-free day combination for job {}", job.id);
                schedule.mark_unscheduled(job, REASON_NO_WINDOW_DAYS);
            }
        }
    }
}

fn window_start(job: &Job) -> Option<&str> {
    job.time_window.as_ref().map(|w| w.start.as_str())
}

/// Tier C
fn place_days_only(schedule: &mut WeeklySchedule, jobs: Vec<Job>) {
    for job in jobs {
        for day in job.explicit_days().unwrap_or_default() {
            schedule.place(&job, day);
        }
    }
}

/// Tier D
fn place_flexible(schedule: &mut WeeklySchedule, jobs: Vec<Job>) {
    for job in jobs {
        let first = job
            .services_per_week
            .and_then(|visits| day_options_for(visits).first());

        match first {
            Some(days) => {
                for &day in days.iter() {
                    schedule.place(&job, day);
                }
            }
            None => {
                let reason = match job.services_per_week {
                    Some(visits) => format!("no service days available for {visits} visits per week"),
                    None => "no service days available: visits per week not set".to_string(),
                };
                schedule.mark_unscheduled(job, reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::job::test_support::{job, window};
    use crate::types::WEEKDAYS;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn windowed(name: &str, start: &str, end: &str, minutes: u32) -> Job {
        let mut j = job(name);
        j.time_window = window(start, end);
        j.duration_minutes = minutes;
        j
    }

    /// Every job is either placed somewhere or unscheduled, not both
    fn assert_single_outcome(schedule: &WeeklySchedule, jobs: &[Job]) {
        for j in jobs {
            let placed = !schedule.days_for_job(j.id).is_empty();
            let unscheduled = schedule.is_unscheduled(j.id);
            assert!(placed ^ unscheduled, "job {} placed={placed} unscheduled={unscheduled}", j.client_name);
        }
    }

    #[test]
    fn flexible_single_visit_goes_to_monday() {
        let j = job("Acme");
        let schedule = plan(vec![j.clone()], monday());

        assert_eq!(schedule.days_for_job(j.id), vec![1]);
        assert!(schedule.unscheduled.is_empty());
        assert_eq!(schedule.candidates_on(1)[0].date, monday());
    }

    #[test]
    fn flexible_jobs_use_first_option_only() {
        let mut j = job("Acme");
        j.services_per_week = Some(3);
        let schedule = plan(vec![j.clone()], monday());

        assert_eq!(schedule.days_for_job(j.id), vec![1, 3, 5]);
    }

    #[test]
    fn flexible_job_without_count_is_unscheduled() {
        let mut missing = job("Missing");
        missing.services_per_week = None;
        let mut too_many = job("TooMany");
        too_many.services_per_week = Some(7);

        let schedule = plan(vec![missing.clone(), too_many.clone()], monday());

        assert_eq!(schedule.total_candidates(), 0);
        assert_eq!(schedule.unscheduled.len(), 2);
        assert!(schedule.unscheduled[1].reason.contains("7 visits per week"));
        assert_single_outcome(&schedule, &[missing, too_many]);
    }

    #[test]
    fn windowed_two_visits_land_on_tuesday_thursday() {
        let mut j = windowed("Acme", "13:00", "14:00", 30);
        j.services_per_week = Some(2);
        let schedule = plan(vec![j.clone()], monday());

        assert_eq!(schedule.days_for_job(j.id), vec![2, 4]);
    }

    #[test]
    fn windowed_job_falls_through_to_next_combination() {
        // Blocker fills Tuesday 13:00-14:00, so [2,4] fails and [1,3] is chosen.
        let mut blocker = windowed("Blocker", "13:00", "14:00", 60);
        blocker.service_days = Some(vec![2]);
        let mut j = windowed("Acme", "13:00", "14:00", 30);
        j.services_per_week = Some(2);

        let schedule = plan(vec![j.clone(), blocker.clone()], monday());

        assert_eq!(schedule.days_for_job(blocker.id), vec![2]);
        assert_eq!(schedule.days_for_job(j.id), vec![1, 3]);
    }

    #[test]
    fn windowed_job_without_feasible_combination_is_unscheduled() {
        let mut blocker = windowed("Blocker", "09:00", "10:00", 60);
        blocker.service_days = Some(vec![1, 2, 3, 4, 5]);
        let mut j = windowed("Acme", "09:00", "10:00", 15);
        j.services_per_week = Some(1);

        let schedule = plan(vec![blocker.clone(), j.clone()], monday());

        assert!(schedule.days_for_job(j.id).is_empty());
        assert_eq!(schedule.unscheduled.len(), 1);
        assert_eq!(schedule.unscheduled[0].reason, REASON_NO_WINDOW_DAYS);
        assert_single_outcome(&schedule, &[blocker, j]);
    }

    #[test]
    fn job_longer_than_its_window_is_unscheduled_on_an_empty_week() {
        let mut oversized = windowed("Oversized", "09:00", "09:20", 30);
        oversized.services_per_week = Some(1);
        let mut pinned = windowed("Pinned", "09:00", "09:20", 30);
        pinned.service_days = Some(vec![2]);

        let schedule = plan(vec![oversized.clone(), pinned.clone()], monday());

        assert_eq!(schedule.total_candidates(), 0);
        assert_eq!(schedule.unscheduled.len(), 2);
        let reason_for = |id| {
            schedule
                .unscheduled
                .iter()
                .find(|u| u.job.id == id)
                .map(|u| u.reason.as_str())
        };
        assert_eq!(reason_for(pinned.id), Some(REASON_DAY_CONFLICT));
        assert_eq!(reason_for(oversized.id), Some(REASON_NO_WINDOW_DAYS));
        assert_single_outcome(&schedule, &[oversized, pinned]);
    }

    #[test]
    fn windowed_job_with_bad_count_is_unscheduled() {
        let mut j = windowed("Acme", "09:00", "10:00", 15);
        j.services_per_week = Some(0);
        let schedule = plan(vec![j.clone()], monday());

        assert_eq!(schedule.unscheduled[0].reason, REASON_NO_WINDOW_DAYS);
    }

    #[test]
    fn windowed_jobs_are_placed_earliest_start_first() {
        // Both want one visit in overlapping windows that hold only one of them.
        // The 08:30 job goes first and takes Monday even though it is listed last.
        let late = windowed("Late", "09:00", "10:00", 45);
        let early = windowed("Early", "08:30", "09:45", 60);

        let schedule = plan(vec![late.clone(), early.clone()], monday());

        assert_eq!(schedule.days_for_job(early.id), vec![1]);
        assert_eq!(schedule.days_for_job(late.id), vec![2]);
        assert_eq!(schedule.candidates_on(1)[0].job.id, early.id);
    }

    #[test]
    fn explicit_days_with_window_are_all_placed_without_conflict() {
        let mut j = windowed("Acme", "10:00", "11:00", 30);
        j.service_days = Some(vec![5, 1]);
        let schedule = plan(vec![j.clone()], monday());

        assert_eq!(schedule.days_for_job(j.id), vec![1, 5]);
        assert!(schedule.unscheduled.is_empty());
    }

    #[test]
    fn explicit_days_conflict_keeps_earlier_days_placed() {
        // Regression lock: Monday is placed before the Wednesday conflict is found,
        // and stays placed while the job is also reported unscheduled.
        let mut wednesday = windowed("Wednesday", "09:00", "10:00", 60);
        wednesday.service_days = Some(vec![3]);
        let mut j = windowed("Acme", "09:00", "10:00", 30);
        j.service_days = Some(vec![1, 3, 5]);

        let schedule = plan(vec![wednesday.clone(), j.clone()], monday());

        assert_eq!(schedule.days_for_job(j.id), vec![1]);
        assert!(schedule.is_unscheduled(j.id));
        assert_eq!(schedule.unscheduled.len(), 1);
        assert_eq!(schedule.unscheduled[0].reason, REASON_DAY_CONFLICT);
        assert!(schedule.candidates_on(5).is_empty());
    }

    #[test]
    fn explicit_days_without_window_ignore_capacity() {
        let mut full = windowed("Full", "09:00", "10:00", 60);
        full.service_days = Some(vec![2]);
        let mut j = job("Anytime");
        j.service_days = Some(vec![2, 4]);
        j.duration_minutes = 480;

        let schedule = plan(vec![full.clone(), j.clone()], monday());

        assert_eq!(schedule.days_for_job(j.id), vec![2, 4]);
        assert!(schedule.unscheduled.is_empty());
    }

    #[test]
    fn explicit_days_win_over_visits_per_week() {
        let mut j = job("Acme");
        j.services_per_week = Some(5);
        j.service_days = Some(vec![4]);
        let schedule = plan(vec![j.clone()], monday());

        assert_eq!(schedule.days_for_job(j.id), vec![4]);
    }

    #[test]
    fn weekend_service_days_are_rejected() {
        let mut j = job("Acme");
        j.service_days = Some(vec![1, 6]);
        let schedule = plan(vec![j.clone()], monday());

        assert_eq!(schedule.total_candidates(), 0);
        assert_eq!(schedule.unscheduled[0].reason, REASON_INVALID_DAYS);
    }

    #[test]
    fn explicit_tier_is_placed_before_windowed_tier() {
        // The windowed job is listed first but must not take Tuesday 09:00 from
        // the explicit-day job.
        let mut flexible = windowed("Flexible", "09:00", "10:00", 60);
        flexible.services_per_week = Some(2);
        let mut pinned = windowed("Pinned", "09:00", "10:00", 60);
        pinned.service_days = Some(vec![2]);

        let schedule = plan(vec![flexible.clone(), pinned.clone()], monday());

        assert_eq!(schedule.days_for_job(pinned.id), vec![2]);
        assert_eq!(schedule.days_for_job(flexible.id), vec![1, 3]);
    }

    #[test]
    fn no_job_is_placed_twice_on_a_day() {
        let mut j = windowed("Acme", "09:00", "12:00", 30);
        j.service_days = Some(vec![2, 2, 2]);
        let schedule = plan(vec![j.clone()], monday());

        assert_eq!(schedule.candidates_on(2).len(), 1);
    }

    #[test]
    fn mixed_pool_gives_every_job_one_outcome() {
        let mut a = windowed("A", "08:00", "09:00", 30);
        a.services_per_week = Some(4);
        let mut b = windowed("B", "08:00", "09:00", 45);
        b.services_per_week = Some(3);
        let mut c = job("C");
        c.service_days = Some(vec![1, 2]);
        let mut d = job("D");
        d.services_per_week = Some(2);
        let mut e = windowed("E", "08:15", "08:45", 30);
        e.service_days = Some(vec![5]);
        let jobs = vec![a, b, c, d, e];

        let schedule = plan(jobs.clone(), monday());

        assert_single_outcome(&schedule, &jobs);
    }

    #[test]
    fn planning_is_deterministic_apart_from_ids() {
        let mut a = windowed("A", "10:00", "11:00", 40);
        a.services_per_week = Some(2);
        let mut b = windowed("B", "10:00", "11:00", 40);
        b.services_per_week = Some(2);
        let mut c = job("C");
        c.services_per_week = Some(4);
        let jobs = vec![a, b, c];

        let first = plan(jobs.clone(), monday());
        let second = plan(jobs.clone(), monday());

        for &day in WEEKDAYS.iter() {
            let ids = |s: &WeeklySchedule| -> Vec<_> {
                s.candidates_on(day).iter().map(|c| c.job.id).collect()
            };
            assert_eq!(ids(&first), ids(&second), "weekday {day}");
        }
        let first_ids: Vec<_> = first.candidates_on(2).iter().map(|c| c.id).collect();
        let second_ids: Vec<_> = second.candidates_on(2).iter().map(|c| c.id).collect();
        assert_ne!(first_ids, second_ids);
    }
}
