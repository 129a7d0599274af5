//! Gym Tracker WASM Module
//!
//! WebAssembly bindings for the scoring rules, so a browser UI computes
//! progress bars, bonus XP and weight steps exactly as the client does.

use chrono::{FixedOffset, TimeZone, Utc};
use gym_tracker_shared::{WorkoutHistoryEntry, WEIGHT_STEP_KG};
use wasm_bindgen::prelude::*;

/// Percent of the current level reached, 0 to 100
#[wasm_bindgen]
pub fn level_progress(points: u32, level: u32) -> f64 {
    gym_tracker_shared::level_progress(points, level)
}

/// XP still needed to close the current level
#[wasm_bindgen]
pub fn xp_to_next_level(points: u32, level: u32) -> f64 {
    gym_tracker_shared::xp_to_next_level(points, level) as f64
}

/// Workout XP with streak and personal-record bonuses
#[wasm_bindgen]
pub fn bonus_xp(base_xp: u32, streak_days: u32, personal_records: u32) -> u32 {
    gym_tracker_shared::bonus_xp(base_xp, streak_days, personal_records)
}

/// One weight step up or down, never below zero
#[wasm_bindgen]
pub fn step_weight(weight_kg: f64, increase: bool) -> f64 {
    let delta = if increase { WEIGHT_STEP_KG } else { -WEIGHT_STEP_KG };
    gym_tracker_shared::adjust_weight(weight_kg, delta)
}

/// Weekly activity summary as JSON
///
/// `history_json` is an array of history entries; `now_ms` is a Unix
/// timestamp in milliseconds and `utc_offset_minutes` the local offset east
/// of UTC (the negation of JavaScript's `getTimezoneOffset`).
#[wasm_bindgen]
pub fn activity_summary(
    history_json: &str,
    now_ms: f64,
    utc_offset_minutes: i32,
) -> Result<String, JsValue> {
    summarize_json(history_json, now_ms, utc_offset_minutes).map_err(|e| JsValue::from_str(&e))
}

fn summarize_json(
    history_json: &str,
    now_ms: f64,
    utc_offset_minutes: i32,
) -> Result<String, String> {
    let history: Vec<WorkoutHistoryEntry> =
        serde_json::from_str(history_json).map_err(|e| format!("Invalid history: {}", e))?;
    let offset = utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| format!("Invalid UTC offset: {} minutes", utc_offset_minutes))?;
    let now = Utc
        .timestamp_millis_opt(now_ms as i64)
        .single()
        .ok_or_else(|| format!("Invalid timestamp: {}", now_ms))?
        .with_timezone(&offset);

    let summary = gym_tracker_shared::summarize(&history, &now);
    serde_json::to_string(&summary).map_err(|e| e.to_string())
}
