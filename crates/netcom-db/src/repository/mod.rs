//! # Repository Module
//!
//! ## Repository Pattern
//! ```text
//! Store (apps/selfservice)
//!      │  db.client_state().put("netcom:auth", json)
//!      ▼
//! ClientStateRepository
//! ├── get(&self, key)
//! ├── put(&self, key, value)
//! ├── delete(&self, key)
//! └── keys(&self)
//!      │  SQL
//!      ▼
//! client_state table
//! ```
//!
//! ## Available Repositories
//!
//! - [`client_state::ClientStateRepository`] - Key/value blobs for persisted stores

pub mod client_state;
