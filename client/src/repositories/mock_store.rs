//! Mock persistence layer
//!
//! Students, per-student training and per-student medical records, kept in
//! memory and mirrored to a [`KeyValueStore`] as three JSON documents.
//! Storage is best effort: unreadable documents are replaced by defaults and
//! failed writes are logged, never returned to the caller.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gym_tracker_shared::{MedicalInfo, NewStudent, StudentPatch, StudentProfile, WorkoutPlan};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::seed;
use crate::storage::KeyValueStore;

pub const STUDENTS_KEY: &str = "gym_tracker.students";
pub const TRAININGS_KEY: &str = "gym_tracker.trainings";
pub const MEDICAL_INFO_KEY: &str = "gym_tracker.medical_info";

#[derive(Debug, Default)]
struct State {
    students: Vec<StudentProfile>,
    trainings: BTreeMap<String, Vec<WorkoutPlan>>,
    medical_info: BTreeMap<String, MedicalInfo>,
}

/// In-memory store with write-through persistence
pub struct MockStore {
    storage: Arc<dyn KeyValueStore>,
    state: Mutex<State>,
}

impl MockStore {
    /// Load persisted state, seeding students when none is stored
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let students = match read_json::<Vec<StudentProfile>>(storage.as_ref(), STUDENTS_KEY) {
            Some(students) => students,
            None => {
                let seeded = seed::students();
                info!(count = seeded.len(), "Seeding sample students");
                write_json(storage.as_ref(), STUDENTS_KEY, &seeded);
                seeded
            }
        };
        let trainings: BTreeMap<String, Vec<WorkoutPlan>> =
            read_json(storage.as_ref(), TRAININGS_KEY).unwrap_or_default();
        let medical_info: BTreeMap<String, MedicalInfo> =
            read_json(storage.as_ref(), MEDICAL_INFO_KEY).unwrap_or_default();

        Self {
            storage,
            state: Mutex::new(State {
                students,
                trainings,
                medical_info,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every student, in insertion order
    pub fn list_students(&self) -> Vec<StudentProfile> {
        self.state().students.clone()
    }

    pub fn find_student(&self, id: &str) -> Option<StudentProfile> {
        self.state().students.iter().find(|s| s.id() == id).cloned()
    }

    /// Append a student, filling missing fields with defaults
    pub fn create_student(&self, input: NewStudent) -> StudentProfile {
        let mut state = self.state();
        let mut id = Uuid::now_v7().to_string();
        while state.students.iter().any(|s| s.id() == id) {
            id = Uuid::now_v7().to_string();
        }

        let student = input.into_profile(id);
        state.students.push(student.clone());
        write_json(self.storage.as_ref(), STUDENTS_KEY, &state.students);

        debug!(student_id = %student.id(), "Created student");
        student
    }

    /// Merge `patch` into a student; `None` when the id is unknown
    ///
    /// Weight, height and notes are mirrored into the student's medical
    /// record. A record is created when none exists and both weight and
    /// height are known after the merge.
    pub fn update_student(&self, id: &str, patch: &StudentPatch) -> Option<StudentProfile> {
        let mut state = self.state();
        let student = state.students.iter_mut().find(|s| s.id() == id)?;
        patch.apply(student);
        let updated = student.clone();
        write_json(self.storage.as_ref(), STUDENTS_KEY, &state.students);

        if patch.touches_medical_info() {
            let synced = match state.medical_info.get_mut(id) {
                Some(info) => {
                    info.merge_student_patch(patch);
                    true
                }
                None => match (updated.weight, updated.height) {
                    (Some(weight), Some(height)) => {
                        let info = MedicalInfo::synthesize(
                            id,
                            Some(weight),
                            Some(height),
                            updated.health_notes.as_deref(),
                        );
                        state.medical_info.insert(id.to_string(), info);
                        true
                    }
                    _ => false,
                },
            };
            if synced {
                write_json(self.storage.as_ref(), MEDICAL_INFO_KEY, &state.medical_info);
            }
        }

        debug!(student_id = %id, "Updated student");
        Some(updated)
    }

    /// Plans assigned to a student; empty when none were saved
    pub fn get_training(&self, student_id: &str) -> Vec<WorkoutPlan> {
        self.state()
            .trainings
            .get(student_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Replace a student's plans wholesale
    pub fn set_training(&self, student_id: &str, plans: Vec<WorkoutPlan>) -> Vec<WorkoutPlan> {
        let mut state = self.state();
        state.trainings.insert(student_id.to_string(), plans.clone());
        write_json(self.storage.as_ref(), TRAININGS_KEY, &state.trainings);

        debug!(student_id = %student_id, plans = plans.len(), "Saved training");
        plans
    }

    /// Stored medical record, synthesized and persisted on first request
    ///
    /// Ids that match no student get the defaults without anything being
    /// stored.
    pub fn get_medical_info(&self, student_id: &str) -> MedicalInfo {
        let mut state = self.state();
        if let Some(info) = state.medical_info.get(student_id) {
            return info.clone();
        }

        let Some(student) = state.students.iter().find(|s| s.id() == student_id) else {
            debug!(student_id = %student_id, "Medical info requested for unknown student");
            return MedicalInfo::synthesize(student_id, None, None, None);
        };
        let info = MedicalInfo::synthesize(
            student_id,
            student.weight,
            student.height,
            student.health_notes.as_deref(),
        );
        state
            .medical_info
            .insert(student_id.to_string(), info.clone());
        write_json(self.storage.as_ref(), MEDICAL_INFO_KEY, &state.medical_info);

        debug!(student_id = %student_id, "Synthesized medical info");
        info
    }
}

fn read_json<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!(key, error = %err, "Failed to read from storage, using defaults");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, error = %err, "Discarding malformed stored data");
            None
        }
    }
}

fn write_json<T: Serialize + ?Sized>(storage: &dyn KeyValueStore, key: &str, value: &T) {
    let serialized = match serde_json::to_string(value) {
        Ok(serialized) => serialized,
        Err(err) => {
            warn!(key, error = %err, "Failed to serialize data for storage");
            return;
        }
    };

    if let Err(err) = storage.set(key, &serialized) {
        warn!(key, error = %err, "Failed to persist data, keeping it in memory only");
    }
}
