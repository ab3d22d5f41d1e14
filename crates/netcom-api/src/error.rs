//! # API Error Types
//!
//! Every remote call fails in one of two ways the customer can tell apart,
//! plus two the client itself can cause.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  ┌───────────────────────────┐   ┌───────────────────────────────────┐ │
//! │  │  Server answered          │   │  No answer                        │ │
//! │  │                           │   │                                   │ │
//! │  │  Api { status, message }  │   │  Connection                       │ │
//! │  │  message = body.error     │   │  "Não foi possível conectar.      │ │
//! │  │        or body.message    │   │   Verifique sua internet."        │ │
//! │  │        or fallback        │   │  (DNS, TLS, refused, reset...)    │ │
//! │  │                           │   │                                   │ │
//! │  │  InvalidResponse          │   │                                   │ │
//! │  │  2xx with a bad body      │   │                                   │ │
//! │  └───────────────────────────┘   └───────────────────────────────────┘ │
//! │                                                                         │
//! │  ┌───────────────────────────┐   ┌───────────────────────────────────┐ │
//! │  │  Config                   │   │  InvalidRequest                   │ │
//! │  │  missing token, bad URL   │   │  empty id, refused before send    │ │
//! │  └───────────────────────────┘   └───────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The message of `Api` and `Connection` is shown to the customer verbatim.

use std::fmt;
use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Message shown whenever no response was received.
pub const CONNECTION_MESSAGE: &str = "Não foi possível conectar. Verifique sua internet.";

// =============================================================================
// Operations
// =============================================================================

/// Every remote operation, used for log fields and fallback messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Customer,
    LinePlan,
    LineUsage,
    LinePayments,
    Products,
    CreateCustomer,
    Login,
}

impl Operation {
    /// Message used when a structured error carries no text of its own.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Operation::Customer | Operation::LinePlan => {
                "Ocorreu um erro ao tentar obter as linhas."
            }
            Operation::LineUsage => "Ocorreu um erro ao tentar obter o consumo da linha.",
            Operation::LinePayments => "Ocorreu um erro ao tentar obter os pagamentos.",
            Operation::Products => "Ocorreu um erro ao tentar obter os produtos.",
            Operation::CreateCustomer => "Ocorreu um erro ao criar o cliente.",
            Operation::Login => "Ocorreu um erro ao tentar fazer o login.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Customer => "customer",
            Operation::LinePlan => "line_plan",
            Operation::LineUsage => "line_usage",
            Operation::LinePayments => "line_payments",
            Operation::Products => "products",
            Operation::CreateCustomer => "create_customer",
            Operation::Login => "login",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Api Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// No response was received at all.
    #[error("{}", CONNECTION_MESSAGE)]
    Connection { reason: String },

    /// A success status with a body that does not match the schema.
    #[error("Resposta inesperada do servidor ({operation}): {reason}")]
    InvalidResponse { operation: Operation, reason: String },

    /// The request was refused before anything was sent.
    #[error("Requisição inválida: {0}")]
    InvalidRequest(String),

    /// Missing token, unparsable base URL, unreadable config file.
    #[error("Configuração da API inválida: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of a structured error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, ApiError::Connection { .. })
    }
}

/// Picks the customer-facing message out of an error body.
///
/// ## Lookup Order
/// 1. `error` when it is a non-empty string
/// 2. `error.message` when `error` is an object
/// 3. `message`
/// 4. the operation's fallback
pub fn extract_error_message(body: &str, operation: Operation) -> String {
    let non_empty = |v: &serde_json::Value| {
        v.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            let error = json.get("error");
            error
                .and_then(non_empty)
                .or_else(|| error.and_then(|e| e.get("message")).and_then(non_empty))
                .or_else(|| json.get("message").and_then(non_empty))
        })
        .unwrap_or_else(|| operation.fallback_message().to_string())
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Config(format!("URL inválida: {err}"))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Config(format!("não foi possível ler o arquivo: {err}"))
    }
}

impl From<toml::de::Error> for ApiError {
    fn from(err: toml::de::Error) -> Self {
        ApiError::Config(format!("arquivo TOML inválido: {err}"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_top_level_error_string() {
        assert_eq!(
            extract_error_message(r#"{"error":"Linha não encontrada"}"#, Operation::LinePlan),
            "Linha não encontrada"
        );
    }

    #[test]
    fn test_extract_nested_error_message() {
        assert_eq!(
            extract_error_message(
                r#"{"error":{"code":"E42","message":"CPF já cadastrado"}}"#,
                Operation::CreateCustomer
            ),
            "CPF já cadastrado"
        );
    }

    #[test]
    fn test_extract_message_field() {
        assert_eq!(
            extract_error_message(r#"{"message":"Senha incorreta"}"#, Operation::Login),
            "Senha incorreta"
        );
    }

    #[test]
    fn test_extract_falls_back() {
        assert_eq!(
            extract_error_message("", Operation::Customer),
            "Ocorreu um erro ao tentar obter as linhas."
        );
        assert_eq!(
            extract_error_message("<html>502</html>", Operation::Login),
            "Ocorreu um erro ao tentar fazer o login."
        );
        assert_eq!(
            extract_error_message(r#"{"error":""}"#, Operation::CreateCustomer),
            "Ocorreu um erro ao criar o cliente."
        );
    }

    #[test]
    fn test_display_is_customer_facing() {
        let err = ApiError::Api {
            status: 404,
            message: "X".to_string(),
        };
        assert_eq!(err.to_string(), "X");
        assert_eq!(err.status(), Some(404));

        let err = ApiError::Connection {
            reason: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), CONNECTION_MESSAGE);
        assert!(err.is_connection());
    }
}
