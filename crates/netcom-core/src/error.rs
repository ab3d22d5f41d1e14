//! # Error Types
//!
//! Domain-specific error types for netcom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  netcom-core errors (this file)                                        │
//! │  ├── CoreError        - Domain rule failures                           │
//! │  └── ValidationError  - Form input failures (never reach the network)  │
//! │                                                                         │
//! │  netcom-db errors      └── DbError    - Local storage failures         │
//! │  netcom-api errors     └── ApiError   - Remote call failures           │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CommandError     - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CommandError → stderr             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors that are not tied to a single form field.
///
/// Messages are customer-facing (pt-BR).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Customer is younger than the minimum age.
    #[error("É preciso ter pelo menos {minimum} anos para criar uma conta (idade informada: {age}).")]
    Underage { age: i32, minimum: i32 },

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised synchronously while a form is filled in, before any request is
/// built. `field` keeps the machine name (`birth_date`); the message shows
/// the label from [`field_label`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("O campo {} é obrigatório.", field_label(.field))]
    Required { field: String },

    /// Field value is too short.
    #[error("O campo {} deve ter pelo menos {} caracteres.", field_label(.field), .min)]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("O campo {} deve ter no máximo {} caracteres.", field_label(.field), .max)]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("O campo {} deve estar entre {} e {}.", field_label(.field), .min, .max)]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (bad mask, bad check digit, impossible date).
    #[error("O campo {} é inválido: {}.", field_label(.field), .reason)]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must agree do not.
    #[error("Os campos {} e {} não coincidem.", field_label(.other), field_label(.field))]
    Mismatch { field: String, other: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Name of the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Mismatch { field, .. } => field,
        }
    }
}

/// Label a form field is shown under. Unknown names come back unchanged.
pub fn field_label(field: &str) -> &str {
    match field {
        "email" => "E-mail",
        "password" => "Senha",
        "confirm_password" => "Confirmação de senha",
        "full_name" => "Nome completo",
        "cpf" => "CPF",
        "birth_date" => "Data de nascimento",
        "gender" => "Gênero",
        "iccid" => "ICCID",
        "cep" => "CEP",
        "street" => "Rua",
        "number" => "Número",
        "complement" => "Complemento",
        "neighbourhood" => "Bairro",
        "city" => "Cidade",
        "state" => "Estado",
        "name" => "Nome do titular",
        "expiry" => "Validade",
        "expiry month" => "Mês de validade",
        "cvv" => "CVV",
        "token" => "Token de sessão",
        "user.id" => "Identificador do usuário",
        other => other,
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::Underage {
            age: 17,
            minimum: 18,
        };
        assert_eq!(
            err.to_string(),
            "É preciso ter pelo menos 18 anos para criar uma conta (idade informada: 17)."
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("cpf");
        assert_eq!(err.to_string(), "O campo CPF é obrigatório.");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "O campo Senha deve ter pelo menos 6 caracteres.");

        let err = ValidationError::Mismatch {
            field: "confirm_password".to_string(),
            other: "password".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Os campos Senha e Confirmação de senha não coincidem."
        );

        let err = ValidationError::invalid("birth_date", "use o formato DD/MM/AAAA");
        assert_eq!(
            err.to_string(),
            "O campo Data de nascimento é inválido: use o formato DD/MM/AAAA."
        );
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(ValidationError::invalid("cep", "x").field(), "cep");
        assert_eq!(field_label("shoe_size"), "shoe_size");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("email").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "O campo E-mail é obrigatório.");
    }
}
