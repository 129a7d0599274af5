//! Common test utilities for integration tests
//!
//! Builders for both backends over in-memory storage, plus sample data.

#![allow(dead_code)]

use std::sync::Arc;

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use gym_tracker_client::api::{HttpApi, MockApi, Session};
use gym_tracker_client::config::{ApiConfig, BackendMode};
use gym_tracker_client::repositories::MockStore;
use gym_tracker_client::storage::MemoryStore;
use gym_tracker_shared::{Exercise, NewStudent, PlanSlot, WorkoutPlan};
use serde_json::{json, Value};

/// Mock backend over fresh in-memory storage
pub fn mock_api() -> (MockApi, Arc<MemoryStore>) {
    let storage = Arc::new(MemoryStore::new());
    let api = MockApi::new(MockStore::load(storage.clone()));
    (api, storage)
}

/// Server backend pointed at `base_url`
pub fn http_api(base_url: &str, timeout_ms: u64) -> (HttpApi, Arc<MemoryStore>) {
    http_api_with_storage(base_url, timeout_ms, Arc::new(MemoryStore::new()))
}

pub fn http_api_with_storage(
    base_url: &str,
    timeout_ms: u64,
    storage: Arc<MemoryStore>,
) -> (HttpApi, Arc<MemoryStore>) {
    let config = ApiConfig {
        mode: BackendMode::Server,
        base_url: base_url.to_string(),
        timeout_ms,
    };
    let api = HttpApi::new(&config, Session::restore(storage.clone()))
        .expect("Failed to build HTTP backend");
    (api, storage)
}

/// Registration with a random name and email
pub fn fake_student() -> NewStudent {
    NewStudent {
        name: Some(Name().fake()),
        email: Some(SafeEmail().fake()),
        age: Some((16u32..70).fake()),
        ..Default::default()
    }
}

pub fn sample_plan(slot: PlanSlot, name: &str) -> WorkoutPlan {
    WorkoutPlan {
        id: format!("plan-{}", slot.as_str().to_lowercase()),
        plan_type: slot,
        name: name.to_string(),
        exercises: vec![Exercise {
            id: format!("ex-{}", slot.as_str().to_lowercase()),
            name: "Supino Reto".to_string(),
            series: 4,
            reps: "8-12".to_string(),
            weight: 40.0,
            rest: "90s".to_string(),
            completed: false,
            personal_record: false,
        }],
    }
}

pub fn user_json(id: &str, role: &str) -> Value {
    json!({
        "id": id,
        "name": "Carlos Mendes",
        "email": "teacher@gym.com",
        "role": role,
        "level": 4,
        "points": 160,
        "streak": 2
    })
}
