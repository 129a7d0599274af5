//! Artificial latency for the mock backend

use std::time::Duration;

use async_trait::async_trait;
use gym_tracker_shared::{
    Achievement, MedicalInfo, NewStudent, RankingEntry, RankingWindow, StudentPatch,
    StudentProfile, UserAccount, WorkoutPlan,
};

use super::GymApi;
use crate::error::ApiResult;

/// Wraps a backend and delays every call by a fixed amount
///
/// A zero delay performs no sleep at all.
pub struct Delayed<A> {
    inner: A,
    delay: Duration,
}

impl<A> Delayed<A> {
    pub fn new(inner: A, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl<A: GymApi> GymApi for Delayed<A> {
    async fn login(&self, email: &str, password: &str) -> ApiResult<UserAccount> {
        self.pause().await;
        self.inner.login(email, password).await
    }

    async fn logout(&self) {
        self.pause().await;
        self.inner.logout().await
    }

    async fn get_workouts(&self, student_id: Option<&str>) -> ApiResult<Vec<WorkoutPlan>> {
        self.pause().await;
        self.inner.get_workouts(student_id).await
    }

    async fn get_achievements(&self, student_id: Option<&str>) -> ApiResult<Vec<Achievement>> {
        self.pause().await;
        self.inner.get_achievements(student_id).await
    }

    async fn get_ranking(&self, window: RankingWindow) -> ApiResult<Vec<RankingEntry>> {
        self.pause().await;
        self.inner.get_ranking(window).await
    }

    async fn get_students(&self) -> ApiResult<Vec<StudentProfile>> {
        self.pause().await;
        self.inner.get_students().await
    }

    async fn get_medical_info(&self, student_id: &str) -> ApiResult<MedicalInfo> {
        self.pause().await;
        self.inner.get_medical_info(student_id).await
    }

    async fn create_student(&self, input: NewStudent) -> ApiResult<StudentProfile> {
        self.pause().await;
        self.inner.create_student(input).await
    }

    async fn update_student(
        &self,
        id: &str,
        patch: StudentPatch,
    ) -> ApiResult<Option<StudentProfile>> {
        self.pause().await;
        self.inner.update_student(id, patch).await
    }

    async fn get_training(&self, student_id: &str) -> ApiResult<Vec<WorkoutPlan>> {
        self.pause().await;
        self.inner.get_training(student_id).await
    }

    async fn save_training(
        &self,
        student_id: &str,
        plans: Vec<WorkoutPlan>,
    ) -> ApiResult<Vec<WorkoutPlan>> {
        self.pause().await;
        self.inner.save_training(student_id, plans).await
    }
}
