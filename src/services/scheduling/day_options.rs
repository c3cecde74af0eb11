//! Fixed weekday combinations per visits-per-week count
//!
//! Options are tried in the listed order and the first feasible one wins.

type DayOptions = &'static [&'static [u8]];

const ONE_VISIT: DayOptions = &[&[1], &[2], &[3], &[4], &[5]];
const TWO_VISITS: DayOptions = &[&[2, 4], &[1, 3], &[1, 4], &[2, 5], &[1, 5]];
const THREE_VISITS: DayOptions = &[&[1, 3, 5], &[2, 4, 5]];
const FOUR_VISITS: DayOptions = &[
    &[1, 2, 3, 4],
    &[2, 3, 4, 5],
    &[1, 3, 4, 5],
    &[1, 2, 4, 5],
    &[1, 2, 3, 5],
];
const FIVE_VISITS: DayOptions = &[&[1, 2, 3, 4, 5]];

/// Candidate weekday sets for a visits-per-week count; empty outside 1..=5
pub fn day_options_for(visits_per_week: u8) -> DayOptions {
    match visits_per_week {
        1 => ONE_VISIT,
        2 => TWO_VISITS,
        3 => THREE_VISITS,
        4 => FOUR_VISITS,
        5 => FIVE_VISITS,
        _ => &[],
    }
}
