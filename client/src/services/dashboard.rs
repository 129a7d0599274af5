//! Role-specific home screen data

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use gym_tracker_shared::{
    current_streak, level_progress, summarize, xp_to_next_level, ActivitySummary, RankingEntry,
    RankingWindow, Role, StudentProfile, UserAccount, WorkoutHistoryEntry, WorkoutPlan,
};
use serde::Serialize;
use tracing::debug;

use crate::api::GymApi;
use crate::error::ApiResult;

/// Entries of the monthly ranking shown to teachers
pub const TOP_RANKING_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Dashboard {
    Student(StudentDashboard),
    Teacher(TeacherDashboard),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub user: UserAccount,
    /// Percent of the current level, 0 to 100
    pub level_progress: f64,
    pub xp_to_next_level: u64,
    pub activity: ActivitySummary,
    pub streak: u32,
    pub plans: Vec<WorkoutPlan>,
    pub unlocked_achievements: usize,
    pub total_achievements: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDashboard {
    pub user: UserAccount,
    pub student_count: usize,
    pub students: Vec<StudentProfile>,
    pub top_ranking: Vec<RankingEntry>,
}

pub struct DashboardService {
    api: Arc<dyn GymApi>,
}

impl DashboardService {
    pub fn new(api: Arc<dyn GymApi>) -> Self {
        Self { api }
    }

    /// Gather the dashboard for `user`
    ///
    /// `history` is the user's local workout log. The streak is derived from
    /// it when it has entries and taken from the account otherwise.
    pub async fn load<Tz: TimeZone>(
        &self,
        user: &UserAccount,
        history: &[WorkoutHistoryEntry],
        now: &DateTime<Tz>,
    ) -> ApiResult<Dashboard> {
        debug!(user_id = %user.id, role = user.role.as_str(), "Loading dashboard");

        match user.role {
            Role::Student => {
                let activity = summarize(history, now);
                let streak = if history.is_empty() {
                    user.streak
                } else {
                    current_streak(history, now)
                };

                let plans = self.api.get_workouts(Some(&user.id)).await?;
                let achievements = self.api.get_achievements(Some(&user.id)).await?;

                Ok(Dashboard::Student(StudentDashboard {
                    user: user.clone(),
                    level_progress: level_progress(user.points, user.level),
                    xp_to_next_level: xp_to_next_level(user.points, user.level),
                    activity,
                    streak,
                    plans,
                    unlocked_achievements: achievements.iter().filter(|a| a.unlocked).count(),
                    total_achievements: achievements.len(),
                }))
            }
            Role::Teacher => {
                let students = self.api.get_students().await?;
                let mut top_ranking = self.api.get_ranking(RankingWindow::Monthly).await?;
                top_ranking.truncate(TOP_RANKING_SIZE);

                Ok(Dashboard::Teacher(TeacherDashboard {
                    user: user.clone(),
                    student_count: students.len(),
                    students,
                    top_ranking,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApi;
    use crate::repositories::{seed, MockStore};
    use crate::storage::MemoryStore;
    use chrono::{Duration, Utc};

    fn service() -> DashboardService {
        let api = MockApi::new(MockStore::load(Arc::new(MemoryStore::new())));
        DashboardService::new(Arc::new(api))
    }

    fn account(role: Role) -> UserAccount {
        seed::accounts()
            .into_iter()
            .find(|a| a.role == role)
            .unwrap()
    }

    #[tokio::test]
    async fn test_student_dashboard() {
        let user = account(Role::Student);
        let now = Utc::now();
        let history = vec![WorkoutHistoryEntry {
            id: "h1".to_string(),
            plan_name: "Pernas".to_string(),
            ended_at: now,
            xp_earned: 100,
        }];

        let dashboard = service().load(&user, &history, &now).await.unwrap();

        let Dashboard::Student(dashboard) = dashboard else {
            panic!("expected a student dashboard");
        };
        assert_eq!(
            dashboard.level_progress,
            level_progress(user.points, user.level)
        );
        assert_eq!(dashboard.activity.completed_workouts, 1);
        assert_eq!(dashboard.activity.active_days_this_week, 1);
        assert_eq!(dashboard.streak, 1);
        assert_eq!(dashboard.plans, seed::workout_plans());
        assert_eq!(dashboard.unlocked_achievements, 2);
        assert_eq!(dashboard.total_achievements, 5);
    }

    #[tokio::test]
    async fn test_student_streak_falls_back_to_account() {
        let user = account(Role::Student);
        let now = Utc::now();

        let Dashboard::Student(dashboard) = service().load(&user, &[], &now).await.unwrap() else {
            panic!("expected a student dashboard");
        };
        assert_eq!(dashboard.streak, user.streak);
        assert_eq!(dashboard.activity.completed_workouts, 0);

        let stale = vec![WorkoutHistoryEntry {
            id: "old".to_string(),
            plan_name: "Pernas".to_string(),
            ended_at: now - Duration::days(30),
            xp_earned: 100,
        }];
        let Dashboard::Student(dashboard) = service().load(&user, &stale, &now).await.unwrap()
        else {
            panic!("expected a student dashboard");
        };
        assert_eq!(dashboard.streak, 0);
        assert_eq!(dashboard.activity.active_days_this_week, 0);
        assert_eq!(dashboard.activity.completed_workouts, 1);
    }

    #[tokio::test]
    async fn test_teacher_dashboard() {
        let user = account(Role::Teacher);

        let dashboard = service().load(&user, &[], &Utc::now()).await.unwrap();

        let Dashboard::Teacher(dashboard) = dashboard else {
            panic!("expected a teacher dashboard");
        };
        assert_eq!(dashboard.student_count, 3);
        assert!(dashboard.top_ranking.len() <= TOP_RANKING_SIZE);
        assert_eq!(dashboard.top_ranking[0].position, 1);
    }

    #[tokio::test]
    async fn test_dashboard_serializes_role_tag() {
        let user = account(Role::Teacher);
        let dashboard = service().load(&user, &[], &Utc::now()).await.unwrap();

        let value = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(value["role"], "teacher");
        assert_eq!(value["studentCount"], 3);
    }
}
