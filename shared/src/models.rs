//! Data models for the Gym Tracker application
//!
//! Every entity serializes as camelCase JSON. The same representation is used
//! on the REST wire and in the locally persisted snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::gamification::{adjust_weight, WEIGHT_STEP_KG};

// ============================================================================
// Accounts
// ============================================================================

/// Account role, always explicit on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Gym member following workout plans
    Student,
    /// Instructor managing students and their plans
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }
}

fn default_level() -> u32 {
    1
}

fn default_age() -> u32 {
    DEFAULT_STUDENT_AGE
}

pub const DEFAULT_STUDENT_NAME: &str = "Novo Aluno";
pub const DEFAULT_STUDENT_AGE: u32 = 18;

/// Base identity shared by students and teachers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    #[serde(default = "default_level")]
    pub level: u32,
    /// Accumulated XP
    #[serde(default)]
    pub points: u32,
    /// Consecutive active days
    #[serde(default)]
    pub streak: u32,
}

/// Gender recorded on a student profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Student profile managed by teachers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(flatten)]
    pub account: UserAccount,
    #[serde(default = "default_age")]
    pub age: u32,
    /// Weight in kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Height in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_notes: Option<String>,
}

impl StudentProfile {
    pub fn id(&self) -> &str {
        &self.account.id
    }

    pub fn name(&self) -> &str {
        &self.account.name
    }
}

/// Registration input for a new student
///
/// Every field is optional. Missing fields are filled with defaults by the
/// store; supplied fields are validated before anything is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(range(min = 5, max = 120, message = "Age must be between 5 and 120"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[validate(range(min = 0.0, max = 500.0, message = "Weight must be between 0 and 500 kg"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[validate(range(min = 0.5, max = 2.8, message = "Height must be between 0.5 and 2.8 m"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[validate(length(max = 2000, message = "Health notes are too long"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_notes: Option<String>,
    #[validate(range(min = 1, message = "Level must be at least 1"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

impl NewStudent {
    /// Build a student profile, filling every missing field with its default
    pub fn into_profile(self, id: String) -> StudentProfile {
        StudentProfile {
            account: UserAccount {
                id,
                name: self
                    .name
                    .unwrap_or_else(|| DEFAULT_STUDENT_NAME.to_string()),
                email: self.email.unwrap_or_default(),
                role: Role::Student,
                level: self.level.unwrap_or(1),
                points: self.points.unwrap_or(0),
                streak: 0,
            },
            age: self.age.unwrap_or(DEFAULT_STUDENT_AGE),
            weight: self.weight,
            height: self.height,
            gender: self.gender,
            health_notes: self.health_notes,
        }
    }
}

/// Merge-patch for a student profile
///
/// Only the fields that are `Some` overwrite the stored profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(range(min = 5, max = 120, message = "Age must be between 5 and 120"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[validate(range(min = 0.0, max = 500.0, message = "Weight must be between 0 and 500 kg"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[validate(range(min = 0.5, max = 2.8, message = "Height must be between 0.5 and 2.8 m"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[validate(length(max = 2000, message = "Health notes are too long"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_notes: Option<String>,
    #[validate(range(min = 1, message = "Level must be at least 1"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
}

impl StudentPatch {
    /// Whether the patch changes data mirrored in the medical record
    pub fn touches_medical_info(&self) -> bool {
        self.weight.is_some() || self.height.is_some() || self.health_notes.is_some()
    }

    /// Overwrite the supplied fields on `student`
    pub fn apply(&self, student: &mut StudentProfile) {
        if let Some(name) = &self.name {
            student.account.name = name.clone();
        }
        if let Some(email) = &self.email {
            student.account.email = email.clone();
        }
        if let Some(level) = self.level {
            student.account.level = level;
        }
        if let Some(points) = self.points {
            student.account.points = points;
        }
        if let Some(streak) = self.streak {
            student.account.streak = streak;
        }
        if let Some(age) = self.age {
            student.age = age;
        }
        if self.weight.is_some() {
            student.weight = self.weight;
        }
        if self.height.is_some() {
            student.height = self.height;
        }
        if self.gender.is_some() {
            student.gender = self.gender;
        }
        if self.health_notes.is_some() {
            student.health_notes = self.health_notes.clone();
        }
    }
}

// ============================================================================
// Training
// ============================================================================

/// Plan slot within a student's training
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlanSlot {
    A,
    B,
    C,
}

impl PlanSlot {
    /// Slots in creation order
    pub const ALL: [PlanSlot; 3] = [PlanSlot::A, PlanSlot::B, PlanSlot::C];

    /// First slot not yet used by `plans`, or `None` when all are taken
    pub fn next_free(plans: &[WorkoutPlan]) -> Option<PlanSlot> {
        Self::ALL
            .into_iter()
            .find(|slot| plans.iter().all(|plan| plan.plan_type != *slot))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanSlot::A => "A",
            PlanSlot::B => "B",
            PlanSlot::C => "C",
        }
    }
}

/// A named workout plan assigned to one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: String,
    #[serde(rename = "type")]
    pub plan_type: PlanSlot,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl WorkoutPlan {
    pub fn completed_count(&self) -> usize {
        self.exercises.iter().filter(|e| e.completed).count()
    }
}

/// Direction of a weight adjustment during a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightStep {
    Increase,
    Decrease,
}

impl WeightStep {
    pub fn delta_kg(&self) -> f64 {
        match self {
            WeightStep::Increase => WEIGHT_STEP_KG,
            WeightStep::Decrease => -WEIGHT_STEP_KG,
        }
    }
}

/// Exercise prescription inside a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub series: u32,
    /// Rep range, e.g. "8-12"
    pub reps: String,
    /// Working weight in kg
    pub weight: f64,
    /// Rest interval, e.g. "60s"
    pub rest: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub personal_record: bool,
}

impl Exercise {
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Move the working weight one step, never below zero
    pub fn adjust_weight(&mut self, step: WeightStep) {
        self.weight = adjust_weight(self.weight, step.delta_kg());
    }
}

/// A completed workout, as recorded in a student's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutHistoryEntry {
    pub id: String,
    pub plan_name: String,
    pub ended_at: DateTime<Utc>,
    #[serde(default)]
    pub xp_earned: u32,
}

// ============================================================================
// Medical information
// ============================================================================

pub const DEFAULT_BLOOD_PRESSURE: &str = "120/80";
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;
pub const DEFAULT_HEIGHT_M: f64 = 1.70;

/// Medical record, at most one per student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalInfo {
    pub student_id: String,
    pub weight: f64,
    pub height: f64,
    pub blood_pressure: String,
    #[serde(default)]
    pub heart_condition: bool,
    #[serde(default)]
    pub injuries: Vec<String>,
    #[serde(default)]
    pub restrictions: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl MedicalInfo {
    /// Default record for a student, seeded from whatever is known about them
    pub fn synthesize(
        student_id: &str,
        weight: Option<f64>,
        height: Option<f64>,
        notes: Option<&str>,
    ) -> Self {
        Self {
            student_id: student_id.to_string(),
            weight: weight.unwrap_or(DEFAULT_WEIGHT_KG),
            height: height.unwrap_or(DEFAULT_HEIGHT_M),
            blood_pressure: DEFAULT_BLOOD_PRESSURE.to_string(),
            heart_condition: false,
            injuries: Vec::new(),
            restrictions: Vec::new(),
            notes: notes.unwrap_or_default().to_string(),
        }
    }

    /// Mirror the weight, height and notes carried by a student patch
    pub fn merge_student_patch(&mut self, patch: &StudentPatch) {
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(notes) = &patch.health_notes {
            self.notes = notes.clone();
        }
    }
}

// ============================================================================
// Achievements and ranking
// ============================================================================

/// Achievement badge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Ranking window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingWindow {
    Monthly,
    Total,
}

impl RankingWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingWindow::Monthly => "monthly",
            RankingWindow::Total => "total",
        }
    }
}

/// One line of a leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub id: String,
    pub name: String,
    pub points: u32,
    pub level: u32,
    /// 1-based
    pub position: u32,
}

/// Order entries by descending points and number them from 1
///
/// Ties keep their input order.
pub fn rank_entries(mut entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    entries.sort_by(|a, b| b.points.cmp(&a.points));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.position = index as u32 + 1;
    }
    entries
}
