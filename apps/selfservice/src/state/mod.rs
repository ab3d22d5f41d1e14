//! # State Module
//!
//! Client state that survives between invocations. Each store owns one
//! record and mirrors it to storage under its own key.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌───────────────────┐  ┌──────────────┐             │
//! │  │  AuthStore   │  │ RegistrationStore │  │  CardStore   │             │
//! │  │ netcom:auth  │  │ netcom:registr.   │  │ netcom:cards │             │
//! │  │ token, user  │  │ sign-up draft     │  │ Vec<Card>    │             │
//! │  └──────┬───────┘  └─────────┬─────────┘  └──────┬───────┘             │
//! │         └────────────────────┼───────────────────┘                      │
//! │                              ▼                                          │
//! │                  Arc<dyn StateStorage>                                  │
//! │              SqliteStorage  │  MemoryStorage (tests)                    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Reads: std RwLock, synchronous                                      │
//! │  • Writes: tokio Mutex per store, persisted before they are visible    │
//! │  • Stores are independent: logout leaves drafts and cards alone        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod cards;
mod cell;
mod error;
mod registration;
mod storage;

pub use auth::{AuthState, AuthStore, AUTH_KEY};
pub use cards::{CardStore, CARDS_KEY};
pub use error::{StateError, StateResult};
pub use registration::{AddressStep, RegistrationStore, REGISTRATION_KEY};
pub use storage::{MemoryStorage, SqliteStorage, StateStorage, STATE_VERSION};
