//! REST backend
//!
//! JSON over HTTP with a bearer token taken from the login response. Every
//! non-success outcome is classified into an [`ApiError`].

use std::time::Duration;

use async_trait::async_trait;
use gym_tracker_shared::types::{LoginRequest, LoginResponse};
use gym_tracker_shared::validation::{
    validate_credentials, validate_new_student, validate_student_id, validate_student_patch,
    validate_training,
};
use gym_tracker_shared::{
    Achievement, MedicalInfo, NewStudent, RankingEntry, RankingWindow, StudentPatch,
    StudentProfile, UserAccount, WorkoutPlan,
};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::{GymApi, Session};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

pub struct HttpApi {
    client: Client,
    base_url: Url,
    timeout: Duration,
    session: Session,
}

impl HttpApi {
    pub fn new(config: &ApiConfig, session: Session) -> ApiResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiError::Unexpected(format!("Invalid base URL {}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Unexpected(format!(
                "Invalid base URL {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Unexpected(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Base URL extended by `segments`, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let request = match self.session.bearer() {
            Some(bearer) => request.header(AUTHORIZATION, bearer),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, self.timeout))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(e, self.timeout))?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "Request failed");
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::Unexpected(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl GymApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> ApiResult<UserAccount> {
        validate_credentials(email, password)?;

        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .send(self.client.post(self.endpoint(&["auth", "login"])).json(&body))
            .await?;

        self.session.begin(response.token);
        info!(user_id = %response.user.id, "Logged in");
        Ok(response.user)
    }

    async fn logout(&self) {
        self.session.end();
        info!("Logged out");
    }

    async fn get_workouts(&self, student_id: Option<&str>) -> ApiResult<Vec<WorkoutPlan>> {
        let mut request = self.client.get(self.endpoint(&["workouts"]));
        if let Some(id) = student_id {
            validate_student_id(id)?;
            request = request.query(&[("studentId", id)]);
        }
        self.send(request).await
    }

    async fn get_achievements(&self, student_id: Option<&str>) -> ApiResult<Vec<Achievement>> {
        let mut request = self.client.get(self.endpoint(&["achievements"]));
        if let Some(id) = student_id {
            validate_student_id(id)?;
            request = request.query(&[("studentId", id)]);
        }
        self.send(request).await
    }

    async fn get_ranking(&self, window: RankingWindow) -> ApiResult<Vec<RankingEntry>> {
        let mut entries: Vec<RankingEntry> = self
            .send(self.client.get(self.endpoint(&["ranking", window.as_str()])))
            .await?;
        entries.sort_by_key(|entry| entry.position);
        Ok(entries)
    }

    async fn get_students(&self) -> ApiResult<Vec<StudentProfile>> {
        self.send(self.client.get(self.endpoint(&["students"])))
            .await
    }

    async fn get_medical_info(&self, student_id: &str) -> ApiResult<MedicalInfo> {
        validate_student_id(student_id)?;
        self.send(
            self.client
                .get(self.endpoint(&["students", student_id, "medical-info"])),
        )
        .await
    }

    async fn create_student(&self, input: NewStudent) -> ApiResult<StudentProfile> {
        validate_new_student(&input)?;
        self.send(self.client.post(self.endpoint(&["students"])).json(&input))
            .await
    }

    async fn update_student(
        &self,
        id: &str,
        patch: StudentPatch,
    ) -> ApiResult<Option<StudentProfile>> {
        validate_student_id(id)?;
        validate_student_patch(&patch)?;

        let request = self
            .client
            .patch(self.endpoint(&["students", id]))
            .json(&patch);
        match self.send(request).await {
            Ok(student) => Ok(Some(student)),
            Err(ApiError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_training(&self, student_id: &str) -> ApiResult<Vec<WorkoutPlan>> {
        validate_student_id(student_id)?;
        self.send(self.client.get(self.endpoint(&["training", student_id])))
            .await
    }

    async fn save_training(
        &self,
        student_id: &str,
        plans: Vec<WorkoutPlan>,
    ) -> ApiResult<Vec<WorkoutPlan>> {
        validate_student_id(student_id)?;
        validate_training(&plans)?;
        self.send(
            self.client
                .post(self.endpoint(&["training", student_id]))
                .json(&plans),
        )
        .await
    }
}
