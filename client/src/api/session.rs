//! Bearer token lifecycle for the server backend

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::storage::KeyValueStore;

pub const AUTH_TOKEN_KEY: &str = "gym_tracker.auth_token";

/// Authenticated session, persisted so a restart does not require a new login
pub struct Session {
    storage: Arc<dyn KeyValueStore>,
    token: Mutex<Option<SecretString>>,
}

impl Session {
    /// Restore the token left by a previous run, if any
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let token = match storage.get(AUTH_TOKEN_KEY) {
            Ok(Some(token)) if !token.trim().is_empty() => {
                debug!("Restored persisted session");
                Some(SecretString::new(token))
            }
            Ok(_) => None,
            Err(err) => {
                warn!(error = %err, "Failed to read persisted session");
                None
            }
        };

        Self {
            storage,
            token: Mutex::new(token),
        }
    }

    fn token(&self) -> MutexGuard<'_, Option<SecretString>> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> Option<String> {
        self.token()
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }

    /// Adopt a freshly issued token and persist it
    pub fn begin(&self, token: String) {
        if let Err(err) = self.storage.set(AUTH_TOKEN_KEY, &token) {
            warn!(error = %err, "Failed to persist session token");
        }
        *self.token() = Some(SecretString::new(token));
    }

    /// Forget the token in memory and in storage
    pub fn end(&self) {
        *self.token() = None;
        if let Err(err) = self.storage.remove(AUTH_TOKEN_KEY) {
            warn!(error = %err, "Failed to remove persisted session token");
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
