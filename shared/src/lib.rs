//! Gym Tracker Shared Library
//!
//! This crate contains the domain model and the pure business rules used by
//! the client and WASM modules: level progress, bonus XP, weekly activity and
//! input validation.

pub mod activity;
pub mod gamification;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use activity::{current_streak, summarize, week_start, ActivitySummary};
pub use gamification::*;
pub use models::*;
pub use validation::ValidationError;
