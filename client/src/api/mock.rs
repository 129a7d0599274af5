//! Mock backend
//!
//! Serves students, training and medical records from [`MockStore`] and
//! the catalogue, achievements and ranking from the built-in samples.

use async_trait::async_trait;
use gym_tracker_shared::validation::{
    validate_credentials, validate_new_student, validate_student_id, validate_student_patch,
    validate_training,
};
use gym_tracker_shared::{
    Achievement, MedicalInfo, NewStudent, RankingEntry, RankingWindow, Role, StudentPatch,
    StudentProfile, UserAccount, WorkoutPlan,
};
use tracing::{debug, info};

use super::GymApi;
use crate::error::{ApiError, ApiResult};
use crate::repositories::{seed, MockStore};

pub struct MockApi {
    store: MockStore,
}

impl MockApi {
    pub fn new(store: MockStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MockStore {
        &self.store
    }
}

#[async_trait]
impl GymApi for MockApi {
    async fn login(&self, email: &str, password: &str) -> ApiResult<UserAccount> {
        validate_credentials(email, password)?;

        let account = seed::accounts()
            .into_iter()
            .find(|account| account.email.eq_ignore_ascii_case(email.trim()))
            .ok_or_else(|| ApiError::Unauthorized {
                status: 401,
                message: "Invalid email or password".to_string(),
                payload: None,
            })?;

        // Students see their stored progress, not the seed snapshot
        let account = match account.role {
            Role::Student => self
                .store
                .find_student(&account.id)
                .map(|student| student.account)
                .unwrap_or(account),
            Role::Teacher => account,
        };

        info!(user_id = %account.id, role = account.role.as_str(), "Mock login");
        Ok(account)
    }

    async fn logout(&self) {
        debug!("Mock logout");
    }

    async fn get_workouts(&self, student_id: Option<&str>) -> ApiResult<Vec<WorkoutPlan>> {
        if let Some(id) = student_id {
            validate_student_id(id)?;
            let assigned = self.store.get_training(id);
            if !assigned.is_empty() {
                return Ok(assigned);
            }
        }
        Ok(seed::workout_plans())
    }

    async fn get_achievements(&self, _student_id: Option<&str>) -> ApiResult<Vec<Achievement>> {
        Ok(seed::achievements())
    }

    async fn get_ranking(&self, window: RankingWindow) -> ApiResult<Vec<RankingEntry>> {
        Ok(seed::ranking(window))
    }

    async fn get_students(&self) -> ApiResult<Vec<StudentProfile>> {
        Ok(self.store.list_students())
    }

    async fn get_medical_info(&self, student_id: &str) -> ApiResult<MedicalInfo> {
        validate_student_id(student_id)?;
        Ok(self.store.get_medical_info(student_id))
    }

    async fn create_student(&self, input: NewStudent) -> ApiResult<StudentProfile> {
        validate_new_student(&input)?;
        Ok(self.store.create_student(input))
    }

    async fn update_student(
        &self,
        id: &str,
        patch: StudentPatch,
    ) -> ApiResult<Option<StudentProfile>> {
        validate_student_id(id)?;
        validate_student_patch(&patch)?;
        Ok(self.store.update_student(id, &patch))
    }

    async fn get_training(&self, student_id: &str) -> ApiResult<Vec<WorkoutPlan>> {
        validate_student_id(student_id)?;
        Ok(self.store.get_training(student_id))
    }

    async fn save_training(
        &self,
        student_id: &str,
        plans: Vec<WorkoutPlan>,
    ) -> ApiResult<Vec<WorkoutPlan>> {
        validate_student_id(student_id)?;
        validate_training(&plans)?;
        Ok(self.store.set_training(student_id, plans))
    }
}
