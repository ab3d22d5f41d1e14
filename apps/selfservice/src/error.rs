//! # Command Error
//!
//! What a failed command prints. Every layer's error is folded into a
//! `{ code, message }` pair at the command boundary.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  netcom lines                                                           │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function  -> CommandResult<T>                           │  │
//! │  │                                                                  │  │
//! │  │  ValidationError ──────────────► VALIDATION_ERROR                │  │
//! │  │  ApiError::Api { message } ────► API_ERROR  (message verbatim)   │  │
//! │  │  ApiError::Connection ─────────► CONNECTION_ERROR                │  │
//! │  │  StateError / DbError ─────────► STORAGE_ERROR                   │  │
//! │  │  no session ───────────────────► NOT_AUTHENTICATED               │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  stderr: "Linha não encontrada"        exit code 1                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Serializable so `--json` output carries errors in the same shape.

use netcom_api::ApiError;
use netcom_core::{CoreError, ValidationError};
use netcom_db::DbError;
use serde::Serialize;
use std::fmt;

use crate::state::StateError;

pub type CommandResult<T> = Result<T, CommandError>;

/// Error returned from commands.
///
/// ```json
/// { "code": "API_ERROR", "message": "Linha não encontrada" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Form input rejected before anything was sent
    ValidationError,

    /// The backend answered with an error
    ApiError,

    /// No response from the backend
    ConnectionError,

    /// No session, or the session is not loaded yet
    NotAuthenticated,

    /// Local state could not be read or written
    StorageError,

    /// Missing token, bad base URL
    ConfigError,

    /// Anything else
    Internal,
}

impl CommandError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CommandError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::ValidationError, message)
    }

    pub fn not_authenticated() -> Self {
        CommandError::new(
            ErrorCode::NotAuthenticated,
            "Você precisa entrar na sua conta. Use `netcom login`.",
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::validation(err.to_string())
    }
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::Underage { .. } => CommandError::validation(err.to_string()),
        }
    }
}

impl From<ApiError> for CommandError {
    fn from(err: ApiError) -> Self {
        let code = match &err {
            ApiError::Api { .. } => ErrorCode::ApiError,
            ApiError::Connection { .. } => ErrorCode::ConnectionError,
            ApiError::InvalidResponse { .. } => ErrorCode::ApiError,
            ApiError::InvalidRequest(_) => ErrorCode::ValidationError,
            ApiError::Config(_) => ErrorCode::ConfigError,
        };
        CommandError::new(code, err.to_string())
    }
}

impl From<DbError> for CommandError {
    fn from(err: DbError) -> Self {
        tracing::error!("Local storage failed: {}", err);
        CommandError::new(ErrorCode::StorageError, "Falha ao acessar os dados locais.")
    }
}

impl From<StateError> for CommandError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::Validation(e) => e.into(),
            StateError::Core(e) => e.into(),
            StateError::Storage(e) => e.into(),
            other => {
                tracing::error!("State error: {}", other);
                CommandError::new(ErrorCode::StorageError, other.to_string())
            }
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;
    use netcom_api::CONNECTION_MESSAGE;

    #[test]
    fn test_api_message_is_kept_verbatim() {
        let err: CommandError = ApiError::Api {
            status: 404,
            message: "X".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ApiError);
        assert_eq!(err.to_string(), "X");
    }

    #[test]
    fn test_connection_error() {
        let err: CommandError = ApiError::Connection {
            reason: "refused".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ConnectionError);
        assert_eq!(err.message, CONNECTION_MESSAGE);
    }

    #[test]
    fn test_nested_validation_unwraps() {
        let err: CommandError = StateError::Core(CoreError::Validation(ValidationError::Required {
            field: "email".into(),
        }))
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "O campo E-mail é obrigatório.");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(CommandError::not_authenticated()).unwrap();
        assert_eq!(json["code"], "NOT_AUTHENTICATED");
        assert!(json["message"].as_str().unwrap().contains("netcom login"));
    }
}
