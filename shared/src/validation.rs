//! Input validation functions
//!
//! This module checks caller input before it reaches a store or the network.
//! Uses both custom validators and the `validator` crate for derive macros.

use std::collections::HashSet;

use thiserror::Error;
use validator::{Validate, ValidateEmail, ValidationErrors};

use crate::models::{NewStudent, StudentPatch, WorkoutPlan};

/// Maximum number of plans a student can hold (slots A, B and C)
pub const MAX_PLANS_PER_STUDENT: usize = 3;

/// Validate login credentials
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::new("email", "Email is required"));
    }
    if !email.validate_email() {
        return Err(ValidationError::new("email", "Invalid email format"));
    }
    if password.is_empty() {
        return Err(ValidationError::new("password", "Password is required"));
    }
    Ok(())
}

/// Reject blank student identifiers
pub fn validate_student_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::new("studentId", "Student id is required"));
    }
    Ok(())
}

/// Validate the supplied fields of a registration
pub fn validate_new_student(student: &NewStudent) -> Result<(), ValidationError> {
    student.validate().map_err(first_error)?;
    if let Some(name) = &student.name {
        if name.trim().is_empty() {
            return Err(ValidationError::new("name", "Name cannot be blank"));
        }
    }
    Ok(())
}

/// Validate the supplied fields of a profile patch
pub fn validate_student_patch(patch: &StudentPatch) -> Result<(), ValidationError> {
    patch.validate().map_err(first_error)?;
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(ValidationError::new("name", "Name cannot be blank"));
        }
    }
    Ok(())
}

/// Validate a student's plan list before it replaces the stored one
///
/// At most three plans, each slot used once.
pub fn validate_training(plans: &[WorkoutPlan]) -> Result<(), ValidationError> {
    if plans.len() > MAX_PLANS_PER_STUDENT {
        return Err(ValidationError::new(
            "plans",
            &format!("A student can have at most {} plans", MAX_PLANS_PER_STUDENT),
        ));
    }

    let mut seen = HashSet::new();
    for plan in plans {
        if !seen.insert(plan.plan_type) {
            return Err(ValidationError::new(
                "plans",
                &format!("Plan {} is used more than once", plan.plan_type.as_str()),
            ));
        }
        if plan.name.trim().is_empty() {
            return Err(ValidationError::new("plans", "Plan name cannot be blank"));
        }
        if plan.exercises.iter().any(|e| e.weight < 0.0 || e.weight.is_nan()) {
            return Err(ValidationError::new(
                "plans",
                "Exercise weight cannot be negative",
            ));
        }
    }
    Ok(())
}

/// Reduce derive-based errors to the first failing field, by field name
fn first_error(errors: ValidationErrors) -> ValidationError {
    let mut fields: Vec<_> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .map(|err| match &err.message {
                    Some(message) => message.to_string(),
                    None => err.code.to_string(),
                })
                .unwrap_or_else(|| "Invalid value".to_string());
            (field.to_string(), message)
        })
        .collect();
    fields.sort();

    match fields.into_iter().next() {
        Some((field, message)) => ValidationError::new(&field, &message),
        None => ValidationError::new("input", "Invalid input"),
    }
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Name",
        "email" => "Email",
        "password" => "Password",
        "age" => "Age",
        "weight" => "Weight",
        "height" => "Height",
        "gender" => "Gender",
        "health_notes" | "healthNotes" => "Health Notes",
        "level" => "Level",
        "plans" => "Workout Plans",
        "studentId" => "Student",
        "exercises" => "Exercises",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}
