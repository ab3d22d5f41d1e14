//! # Auth Store
//!
//! Session token and the logged-in user, persisted under `netcom:auth`.
//!
//! ## Lifecycle
//! ```text
//!  AuthStore::new()           has_hydrated = false, is_authenticated = false
//!        │
//!        ▼
//!  hydrate()                  restores {token, user}; a token without a
//!        │                    usable user is dropped
//!        ▼
//!  has_hydrated = true        is_authenticated == token restored
//!        │
//!   login(user, token) ──────► persisted, then visible
//!   logout() ────────────────► persisted as empty, then visible
//! ```
//!
//! Consumers must not make authorization decisions before `has_hydrated()`
//! is true.

use netcom_core::{User, ValidationError};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use super::cell::PersistedCell;
use super::error::StateResult;
use super::storage::StateStorage;

pub const AUTH_KEY: &str = "netcom:auth";

/// Persisted auth record.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthState")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user.as_ref().map(|u| &u.id))
            .finish()
    }
}

impl AuthState {
    fn restored(self) -> Self {
        let user_ok = self.user.as_ref().is_some_and(|u| !u.id.trim().is_empty());
        if self.token.is_some() && !user_ok {
            warn!("Persisted session has no user, discarding it");
            return AuthState::default();
        }
        self
    }
}

pub struct AuthStore {
    cell: PersistedCell<AuthState>,
}

impl AuthStore {
    pub fn new(storage: Arc<dyn StateStorage>) -> Self {
        AuthStore {
            cell: PersistedCell::new(AUTH_KEY, storage),
        }
    }

    pub async fn hydrate(&self) -> StateResult<()> {
        self.cell.hydrate(AuthState::restored).await
    }

    pub fn has_hydrated(&self) -> bool {
        self.cell.has_hydrated()
    }

    /// A session token is present. Always false before hydration.
    pub fn is_authenticated(&self) -> bool {
        self.has_hydrated() && self.cell.read(|s| s.token.is_some())
    }

    pub fn user(&self) -> Option<User> {
        self.cell.read(|s| s.user.clone())
    }

    pub fn token(&self) -> Option<SecretString> {
        self.cell.read(|s| s.token.clone().map(SecretString::from))
    }

    /// Stores a new session, replacing any previous one wholesale.
    pub async fn login(&self, user: User, token: String) -> StateResult<()> {
        if token.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "token".to_string(),
            }
            .into());
        }
        if user.id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "user.id".to_string(),
            }
            .into());
        }

        let user_id = user.id.clone();
        self.cell
            .replace(AuthState {
                token: Some(token),
                user: Some(user),
            })
            .await?;

        info!(user_id = %user_id, "Session stored");
        Ok(())
    }

    pub async fn logout(&self) -> StateResult<()> {
        self.cell.replace(AuthState::default()).await?;
        info!("Session cleared");
        Ok(())
    }
}
