//! # netcom-api: REST Clients for the Netcom backends
//!
//! Thin typed wrappers over two HTTP backends with one shared failure
//! model.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Netcom API Layer                               │
//! │                                                                         │
//! │  netcom CLI command                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     netcom-api (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │  ApiConfig ──► StorefrontToken ──► StorefrontClient ──┐        │   │
//! │  │     │                                                  │        │   │
//! │  │     └───────► PartnerToken ─────► PartnerClient ───────┤        │   │
//! │  │                                                        ▼        │   │
//! │  │                                               HttpBackend       │   │
//! │  │                                   (send, normalize, decode,    │   │
//! │  │                                    check)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(T) or ApiError::{Api, Connection, InvalidResponse, ...}           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Base URLs and tokens (TOML + environment)
//! - [`auth`] - Per-backend bearer token types
//! - [`error`] - Failure taxonomy and message extraction
//! - [`storefront`] - Customer, line, plan, usage, payment, product calls
//! - [`partner`] - Sign-up and login
//! - [`overview`] - Concurrent two-call views
//! - [`schema`] - Semantic checks on decoded responses
//! - [`postal`] - Postal-code lookup seam
//!
//! ## Usage
//!
//! ```rust,ignore
//! use netcom_api::{ApiConfig, StorefrontClient};
//!
//! let config = ApiConfig::load(None)?;
//! let storefront = StorefrontClient::from_config(&config)?;
//! let lines = storefront.lines(&user.id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod config;
pub mod error;
mod http;
pub mod overview;
pub mod partner;
pub mod postal;
pub mod schema;
pub mod storefront;

// =============================================================================
// Re-exports
// =============================================================================

pub use auth::{PartnerToken, StorefrontToken};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, Operation, CONNECTION_MESSAGE};
pub use overview::{LineOverview, PlanDetails};
pub use partner::PartnerClient;
pub use postal::PostalCodeLookup;
pub use storefront::StorefrontClient;
