use crate::catalog::TOTAL_DAYS;
use crate::models::{ProgressState, StatsResponse};
use chrono::{DateTime, Utc};

pub fn build_stats_at(now: DateTime<Utc>, state: &ProgressState) -> StatsResponse {
    let percentage = progress_percentage(state);
    StatsResponse {
        days_completed: days_completed(state),
        total_days: TOTAL_DAYS,
        days_elapsed: days_elapsed(state.start_date, now),
        progress_percentage: percentage,
        progress_rounded: percentage.round() as u32,
    }
}

pub fn days_completed(state: &ProgressState) -> u32 {
    state.completed_days.len() as u32
}

/// Whole days since `start`. Clamped at zero when the clock is behind the start date.
pub fn days_elapsed(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - start).num_days().max(0)
}

pub fn progress_percentage(state: &ProgressState) -> f64 {
    f64::from(days_completed(state) * 100) / f64::from(TOTAL_DAYS)
}
