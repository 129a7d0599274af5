//! Weekly activity aggregation
//!
//! Derives active days for the current week, the all-time completed count,
//! and the current streak from a workout history. The reference instant is
//! always passed in; nothing here reads the system clock.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::models::WorkoutHistoryEntry;

/// Activity figures shown on the student dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    /// Sunday that opens the current week
    pub week_start: NaiveDate,
    /// Distinct days with at least one completion since `week_start`
    pub active_days_this_week: usize,
    /// Day indices of those days, 0 = Sunday .. 6 = Saturday
    pub active_day_indices: BTreeSet<u8>,
    /// Every completion ever recorded
    pub completed_workouts: usize,
}

/// Most recent Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Summarize `history` relative to `now`
///
/// Days are taken in `now`'s time zone, so the week boundary is Sunday
/// 00:00 local time.
pub fn summarize<Tz: TimeZone>(
    history: &[WorkoutHistoryEntry],
    now: &DateTime<Tz>,
) -> ActivitySummary {
    let tz = now.timezone();
    let start = week_start(now.date_naive());

    let active_day_indices: BTreeSet<u8> = history
        .iter()
        .map(|entry| entry.ended_at.with_timezone(&tz).date_naive())
        .filter(|day| *day >= start)
        .map(|day| day.weekday().num_days_from_sunday() as u8)
        .collect();

    ActivitySummary {
        week_start: start,
        active_days_this_week: active_day_indices.len(),
        active_day_indices,
        completed_workouts: history.len(),
    }
}

/// Consecutive days with at least one completion
///
/// The run must end today or yesterday; an older run counts as broken.
pub fn current_streak<Tz: TimeZone>(history: &[WorkoutHistoryEntry], now: &DateTime<Tz>) -> u32 {
    let tz = now.timezone();
    let days: BTreeSet<NaiveDate> = history
        .iter()
        .map(|entry| entry.ended_at.with_timezone(&tz).date_naive())
        .collect();

    let today = now.date_naive();
    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}
