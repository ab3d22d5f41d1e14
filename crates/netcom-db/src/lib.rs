//! # netcom-db: Local Storage for the Netcom client
//!
//! This crate provides the on-device database behind the persisted client
//! stores. It uses SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Netcom Client Data Flow                          │
//! │                                                                         │
//! │  AuthStore / CardStore / RegistrationStore (apps/selfservice)          │
//! │       │  save("netcom:cards", {"version":1,"state":{...}})             │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     netcom-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────────┐  ┌────────────┐ │   │
//! │  │   │   Database    │    │   Repositories      │  │ Migrations │ │   │
//! │  │   │   (pool.rs)   │◄───│ ClientStateRepo     │  │ (embedded) │ │   │
//! │  │   │  SqlitePool   │    │ get/put/delete/keys │  │ 001_...sql │ │   │
//! │  │   └───────────────┘    └─────────────────────┘  └────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file in the platform data dir (netcom.db)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use netcom_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("netcom.db")).await?;
//! db.client_state().put("netcom:auth", r#"{"version":1,"state":{}}"#).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::client_state::ClientStateRepository;
