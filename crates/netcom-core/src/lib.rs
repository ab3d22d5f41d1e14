//! # netcom-core: Pure Domain Logic for the Netcom self-service client
//!
//! Everything the self-service client decides without talking to the
//! network or the disk lives here: form validation, wire types for both
//! backends, money and display formatting, payment history grouping.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Netcom Self-Service Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  netcom CLI (apps/selfservice)                  │   │
//! │  │   login ──► lines ──► usage / plan ──► cards ──► register      │   │
//! │  └───────────────┬─────────────────────────────┬───────────────────┘   │
//! │                  │                             │                        │
//! │  ┌───────────────▼─────────────┐  ┌────────────▼────────────────────┐  │
//! │  │  netcom-api (HTTP clients)  │  │  netcom-db (persisted state)    │  │
//! │  │  storefront + partner       │  │  SQLite key/value blobs         │  │
//! │  └───────────────┬─────────────┘  └─────────────────────────────────┘  │
//! │                  │                                                      │
//! │  ┌───────────────▼─────────────────────────────────────────────────┐   │
//! │  │               ★ netcom-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  format   │  │ validation│  │   │
//! │  │   │ Customer  │  │   Money   │  │ CPF, CEP  │  │ CPF, age  │  │   │
//! │  │   │ Line,Plan │  │   (BRL)   │  │  msisdn   │  │ card, CEP │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO NETWORK • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (Customer, Line, PlanItem, Payment, Card, ...)
//! - [`money`] - Money in centavos with BRL display
//! - [`error`] - Validation error types
//! - [`validation`] - CPF check digits, age gate, form rules
//! - [`format`] - Masks for CPF, CEP and phone numbers
//! - [`payments`] - Payment status labels and month grouping
//! - [`registration`] - Multi-step sign-up draft and its final checks
//!
//! ## Example Usage
//!
//! ```rust
//! use netcom_core::validation::is_valid_cpf;
//!
//! assert!(is_valid_cpf("111.444.777-35"));
//! assert!(!is_valid_cpf("111.111.111-11"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod format;
pub mod money;
pub mod payments;
pub mod registration;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use registration::{DraftField, RegistrationDraft};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum age, in whole years, to open an account.
pub const MINIMUM_AGE: i32 = 18;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Gender sent when the customer never picks one.
pub const DEFAULT_GENDER: &str = "M";
