//! Gamification scoring
//!
//! Level progress and bonus XP for completed workouts.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: no clock, no storage, no side effects
//! 2. **Integer XP**: bonus arithmetic stays in integers so rounding is exact

/// XP needed per level step: completing level `n` takes `n * XP_PER_LEVEL`
pub const XP_PER_LEVEL: u32 = 50;

/// Bonus percent granted per consecutive active day
pub const STREAK_BONUS_PERCENT_PER_DAY: u32 = 10;

/// Maximum streak bonus percent (reached at 10 days)
pub const STREAK_BONUS_CAP_PERCENT: u32 = 100;

/// Bonus percent granted per personal record, uncapped
pub const PR_BONUS_PERCENT: u32 = 10;

/// Weight adjustment step during a session, in kg
pub const WEIGHT_STEP_KG: f64 = 2.5;

/// XP awarded for finishing a workout before bonuses
pub const BASE_WORKOUT_XP: u32 = 100;

/// XP required to complete `level`
pub fn xp_required_for_level(level: u32) -> u64 {
    u64::from(level) * u64::from(XP_PER_LEVEL)
}

/// Progress percentage within the current level, in `[0, 100)`
///
/// Wraps to 0 at every multiple of `level * 50`; `points` is expected to be
/// the counter for the current level.
pub fn level_progress(points: u32, level: u32) -> f64 {
    let required = xp_required_for_level(level);
    if required == 0 {
        return 0.0;
    }
    (u64::from(points) % required) as f64 / required as f64 * 100.0
}

/// XP left before the progress bar wraps
pub fn xp_to_next_level(points: u32, level: u32) -> u64 {
    let required = xp_required_for_level(level);
    if required == 0 {
        return 0;
    }
    required - u64::from(points) % required
}

/// XP earned for a workout given the current streak and personal records
///
/// `round(base * (1 + (min(streak * 10, 100) + prs * 10) / 100))`, rounding
/// half up.
pub fn bonus_xp(base_xp: u32, streak_days: u32, personal_records: u32) -> u32 {
    let streak_percent = u64::from(streak_days)
        .saturating_mul(u64::from(STREAK_BONUS_PERCENT_PER_DAY))
        .min(u64::from(STREAK_BONUS_CAP_PERCENT));
    let pr_percent = u64::from(personal_records).saturating_mul(u64::from(PR_BONUS_PERCENT));
    let multiplier = 100u64
        .saturating_add(streak_percent)
        .saturating_add(pr_percent);

    let earned = u64::from(base_xp)
        .saturating_mul(multiplier)
        .saturating_add(50)
        / 100;
    u32::try_from(earned).unwrap_or(u32::MAX)
}

/// Apply a weight delta, clamping the result at zero
pub fn adjust_weight(weight_kg: f64, delta_kg: f64) -> f64 {
    (weight_kg + delta_kg).max(0.0)
}
