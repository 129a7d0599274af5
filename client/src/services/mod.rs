//! Display-side logic built on the API facade

pub mod dashboard;
pub mod training;
pub mod workout;

pub use dashboard::{Dashboard, DashboardService, StudentDashboard, TeacherDashboard};
pub use training::TrainingEditor;
pub use workout::{reward_patch, WorkoutSession};
