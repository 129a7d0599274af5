//! In-progress workout
//!
//! Tracks exercise completion, weight changes and personal records while a
//! student trains, then turns the session into a history entry with its XP.

use chrono::{DateTime, Utc};
use gym_tracker_shared::{
    bonus_xp, Exercise, StudentPatch, UserAccount, ValidationError, WeightStep,
    WorkoutHistoryEntry, WorkoutPlan, BASE_WORKOUT_XP,
};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct WorkoutSession {
    plan: WorkoutPlan,
    started_at: DateTime<Utc>,
}

impl WorkoutSession {
    /// Start a session on `plan` with every exercise pending
    pub fn start(mut plan: WorkoutPlan, started_at: DateTime<Utc>) -> Self {
        for exercise in &mut plan.exercises {
            exercise.completed = false;
            exercise.personal_record = false;
        }
        Self { plan, started_at }
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    fn exercise_mut(&mut self, exercise_id: &str) -> Option<&mut Exercise> {
        self.plan.exercises.iter_mut().find(|e| e.id == exercise_id)
    }

    /// Flip completion; returns the new state, `None` for an unknown exercise
    pub fn toggle_exercise(&mut self, exercise_id: &str) -> Option<bool> {
        let exercise = self.exercise_mut(exercise_id)?;
        exercise.toggle_completed();
        Some(exercise.completed)
    }

    /// Move the working weight one step; returns the new weight
    pub fn adjust_weight(&mut self, exercise_id: &str, step: WeightStep) -> Option<f64> {
        let exercise = self.exercise_mut(exercise_id)?;
        exercise.adjust_weight(step);
        Some(exercise.weight)
    }

    /// Flip the personal-record flag; returns the new state
    pub fn toggle_personal_record(&mut self, exercise_id: &str) -> Option<bool> {
        let exercise = self.exercise_mut(exercise_id)?;
        exercise.personal_record = !exercise.personal_record;
        Some(exercise.personal_record)
    }

    pub fn completed_count(&self) -> usize {
        self.plan.completed_count()
    }

    pub fn is_complete(&self) -> bool {
        !self.plan.exercises.is_empty() && self.completed_count() == self.plan.exercises.len()
    }

    /// Records counted toward the bonus: flagged and completed
    pub fn personal_records(&self) -> u32 {
        self.plan
            .exercises
            .iter()
            .filter(|e| e.completed && e.personal_record)
            .count() as u32
    }

    /// XP the session is worth if finished now
    pub fn projected_xp(&self, streak_days: u32) -> u32 {
        bonus_xp(BASE_WORKOUT_XP, streak_days, self.personal_records())
    }

    /// Close the session
    ///
    /// Fails when no exercise was completed.
    pub fn finish(
        self,
        streak_days: u32,
        ended_at: DateTime<Utc>,
    ) -> Result<WorkoutHistoryEntry, ValidationError> {
        if self.completed_count() == 0 {
            return Err(ValidationError::new(
                "exercises",
                "Complete at least one exercise before finishing",
            ));
        }

        let entry = WorkoutHistoryEntry {
            id: Uuid::new_v4().to_string(),
            plan_name: self.plan.name.clone(),
            ended_at,
            xp_earned: self.projected_xp(streak_days),
        };
        debug!(
            plan = %entry.plan_name,
            xp = entry.xp_earned,
            records = self.personal_records(),
            "Workout finished"
        );
        Ok(entry)
    }
}

/// Profile changes that credit a finished workout to `account`
pub fn reward_patch(
    account: &UserAccount,
    entry: &WorkoutHistoryEntry,
    streak: u32,
) -> StudentPatch {
    StudentPatch {
        points: Some(account.points.saturating_add(entry.xp_earned)),
        streak: Some(streak),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gym_tracker_shared::{PlanSlot, Role};

    fn exercise(id: &str, weight: f64) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: format!("Exercise {}", id),
            series: 3,
            reps: "10-12".to_string(),
            weight,
            rest: "60s".to_string(),
            completed: true,
            personal_record: true,
        }
    }

    fn session() -> WorkoutSession {
        let plan = WorkoutPlan {
            id: "w1".to_string(),
            plan_type: PlanSlot::A,
            name: "Peito e Tríceps".to_string(),
            exercises: vec![exercise("e1", 40.0), exercise("e2", 2.5)],
        };
        WorkoutSession::start(plan, Utc::now())
    }

    #[test]
    fn test_start_resets_progress() {
        let session = session();
        assert_eq!(session.completed_count(), 0);
        assert_eq!(session.personal_records(), 0);
        assert!(!session.is_complete());
    }

    #[test]
    fn test_toggle_and_adjust() {
        let mut session = session();
        assert_eq!(session.toggle_exercise("e1"), Some(true));
        assert_eq!(session.toggle_exercise("e1"), Some(false));
        assert_eq!(session.toggle_exercise("missing"), None);

        assert_eq!(session.adjust_weight("e1", WeightStep::Increase), Some(42.5));
        assert_eq!(session.adjust_weight("e2", WeightStep::Decrease), Some(0.0));
        assert_eq!(session.adjust_weight("e2", WeightStep::Decrease), Some(0.0));
    }

    #[test]
    fn test_only_completed_records_count() {
        let mut session = session();
        session.toggle_personal_record("e1");
        session.toggle_personal_record("e2");
        session.toggle_exercise("e1");

        assert_eq!(session.personal_records(), 1);
        assert_eq!(session.projected_xp(0), 110);
    }

    #[test]
    fn test_finish_applies_bonus() {
        let mut session = session();
        session.toggle_exercise("e1");
        session.toggle_exercise("e2");
        session.toggle_personal_record("e1");
        session.toggle_personal_record("e2");
        assert!(session.is_complete());

        let ended_at = Utc::now();
        let entry = session.finish(5, ended_at).unwrap();
        assert_eq!(entry.xp_earned, 170);
        assert_eq!(entry.ended_at, ended_at);
        assert_eq!(entry.plan_name, "Peito e Tríceps");
    }

    #[test]
    fn test_finish_requires_progress() {
        let err = session().finish(0, Utc::now()).unwrap_err();
        assert_eq!(err.field, "exercises");
    }

    #[test]
    fn test_reward_patch() {
        let account = UserAccount {
            id: "1".to_string(),
            name: "João".to_string(),
            email: String::new(),
            role: Role::Student,
            level: 3,
            points: 120,
            streak: 5,
        };
        let entry = WorkoutHistoryEntry {
            id: "h".to_string(),
            plan_name: "Pernas".to_string(),
            ended_at: Utc::now(),
            xp_earned: 160,
        };

        let patch = reward_patch(&account, &entry, 6);
        assert_eq!(patch.points, Some(280));
        assert_eq!(patch.streak, Some(6));
        assert!(!patch.touches_medical_info());
    }
}
