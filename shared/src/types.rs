//! API request and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::UserAccount;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
///
/// Servers differ on the token field name; all common spellings are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    pub user: UserAccount,
}

/// Best human-readable message inside a server error body
///
/// Understands `{"message": "..."}`, `{"message": ["..", ".."]}`,
/// `{"error": "..."}`, `{"error": {"message": ".."}}` and
/// `{"errors": [..]}` where items are strings or objects with a `message`.
pub fn extract_error_message(payload: &Value) -> Option<String> {
    if let Some(message) = payload.get("message").and_then(join_messages) {
        return Some(message);
    }
    match payload.get("error") {
        Some(Value::String(message)) if !message.is_empty() => return Some(message.clone()),
        Some(error @ Value::Object(_)) => {
            if let Some(message) = error.get("message").and_then(join_messages) {
                return Some(message);
            }
        }
        _ => {}
    }
    payload.get("errors").and_then(join_messages)
}

fn join_messages(value: &Value) -> Option<String> {
    match value {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(message) => Some(message.clone()),
                    Value::Object(_) => item
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    _ => None,
                })
                .filter(|message| !message.is_empty())
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}
