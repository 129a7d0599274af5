//! API facade
//!
//! One operation contract, [`GymApi`], served either by the local mock
//! backend or by the REST server. The backend is chosen once, at startup,
//! by [`build_api`].

pub mod http;
pub mod latency;
pub mod mock;
pub mod session;

use std::sync::Arc;

use async_trait::async_trait;
use gym_tracker_shared::{
    Achievement, MedicalInfo, NewStudent, RankingEntry, RankingWindow, StudentPatch,
    StudentProfile, UserAccount, WorkoutPlan,
};
use tracing::info;

use crate::config::{AppConfig, BackendMode};
use crate::error::ApiResult;
use crate::repositories::MockStore;
use crate::storage::KeyValueStore;

pub use http::HttpApi;
pub use latency::Delayed;
pub use mock::MockApi;
pub use session::{Session, AUTH_TOKEN_KEY};

/// Operations available to the UI, independent of the backend
#[async_trait]
pub trait GymApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> ApiResult<UserAccount>;

    /// Drop the current session; never fails
    async fn logout(&self);

    /// Plans for a student, or the general catalogue when `student_id` is `None`
    async fn get_workouts(&self, student_id: Option<&str>) -> ApiResult<Vec<WorkoutPlan>>;

    async fn get_achievements(&self, student_id: Option<&str>) -> ApiResult<Vec<Achievement>>;

    /// Leaderboard ordered by ascending position
    async fn get_ranking(&self, window: RankingWindow) -> ApiResult<Vec<RankingEntry>>;

    async fn get_students(&self) -> ApiResult<Vec<StudentProfile>>;

    async fn get_medical_info(&self, student_id: &str) -> ApiResult<MedicalInfo>;

    async fn create_student(&self, input: NewStudent) -> ApiResult<StudentProfile>;

    /// Merge-patch a student; `Ok(None)` when no student has this id
    async fn update_student(
        &self,
        id: &str,
        patch: StudentPatch,
    ) -> ApiResult<Option<StudentProfile>>;

    async fn get_training(&self, student_id: &str) -> ApiResult<Vec<WorkoutPlan>>;

    /// Replace a student's plans wholesale, returning what was stored
    async fn save_training(
        &self,
        student_id: &str,
        plans: Vec<WorkoutPlan>,
    ) -> ApiResult<Vec<WorkoutPlan>>;
}

/// Build the backend selected by `config.api.mode`
pub fn build_api(
    config: &AppConfig,
    storage: Arc<dyn KeyValueStore>,
) -> ApiResult<Arc<dyn GymApi>> {
    match config.api.mode {
        BackendMode::Mock => {
            info!(latency_ms = config.mock.latency_ms, "Using mock backend");
            let api = MockApi::new(MockStore::load(storage));
            Ok(Arc::new(Delayed::new(api, config.mock.latency())))
        }
        BackendMode::Server => {
            info!(base_url = %config.api.base_url, "Using server backend");
            let session = Session::restore(storage);
            Ok(Arc::new(HttpApi::new(&config.api, session)?))
        }
    }
}
