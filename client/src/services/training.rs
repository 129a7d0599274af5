//! Teacher-side editing of a student's plans
//!
//! Changes are local until [`TrainingEditor::save`], which replaces the
//! stored training wholesale. Concurrent editors overwrite each other; the
//! last save wins.

use std::sync::Arc;

use gym_tracker_shared::validation::{validate_training, MAX_PLANS_PER_STUDENT};
use gym_tracker_shared::{Exercise, PlanSlot, ValidationError, WorkoutPlan};
use tracing::info;
use uuid::Uuid;

use crate::api::GymApi;
use crate::error::ApiResult;

pub struct TrainingEditor {
    api: Arc<dyn GymApi>,
    student_id: String,
    plans: Vec<WorkoutPlan>,
}

impl TrainingEditor {
    /// Open the editor on the student's current training
    pub async fn load(api: Arc<dyn GymApi>, student_id: &str) -> ApiResult<Self> {
        let plans = api.get_training(student_id).await?;
        Ok(Self {
            api,
            student_id: student_id.to_string(),
            plans,
        })
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn plans(&self) -> &[WorkoutPlan] {
        &self.plans
    }

    /// Add an empty plan in the next free slot
    ///
    /// A blank name becomes "Treino <slot>".
    pub fn add_plan(&mut self, name: &str) -> Result<&mut WorkoutPlan, ValidationError> {
        let slot = PlanSlot::next_free(&self.plans).ok_or_else(|| {
            ValidationError::new(
                "plans",
                &format!("A student can have at most {} plans", MAX_PLANS_PER_STUDENT),
            )
        })?;

        let name = match name.trim() {
            "" => format!("Treino {}", slot.as_str()),
            trimmed => trimmed.to_string(),
        };
        self.plans.push(WorkoutPlan {
            id: Uuid::new_v4().to_string(),
            plan_type: slot,
            name,
            exercises: Vec::new(),
        });

        let index = self.plans.len() - 1;
        Ok(&mut self.plans[index])
    }

    pub fn remove_plan(&mut self, plan_id: &str) -> Option<WorkoutPlan> {
        let index = self.plans.iter().position(|plan| plan.id == plan_id)?;
        Some(self.plans.remove(index))
    }

    pub fn plan_mut(&mut self, plan_id: &str) -> Option<&mut WorkoutPlan> {
        self.plans.iter_mut().find(|plan| plan.id == plan_id)
    }

    /// Append an exercise to a plan; `false` when the plan is unknown
    pub fn add_exercise(&mut self, plan_id: &str, exercise: Exercise) -> bool {
        match self.plan_mut(plan_id) {
            Some(plan) => {
                plan.exercises.push(exercise);
                true
            }
            None => false,
        }
    }

    /// Validate and store the edited plans, replacing what was there
    pub async fn save(&mut self) -> ApiResult<&[WorkoutPlan]> {
        validate_training(&self.plans)?;
        let saved = self
            .api
            .save_training(&self.student_id, self.plans.clone())
            .await?;

        info!(student_id = %self.student_id, plans = saved.len(), "Training saved");
        self.plans = saved;
        Ok(&self.plans)
    }
}
