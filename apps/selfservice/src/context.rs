//! # Application Context
//!
//! Everything a command may need, built once per invocation: API
//! configuration and the three stores, already hydrated. Commands borrow
//! only what they use.

use netcom_api::{ApiConfig, PartnerClient, StorefrontClient};
use netcom_core::User;
use netcom_db::Database;
use std::sync::Arc;
use tracing::debug;

use crate::error::{CommandError, CommandResult};
use crate::state::{AuthStore, CardStore, RegistrationStore, SqliteStorage, StateResult, StateStorage};

pub struct AppContext {
    pub config: ApiConfig,
    pub auth: AuthStore,
    pub registration: RegistrationStore,
    pub cards: CardStore,
}

impl AppContext {
    /// Context over the SQLite client-state table.
    pub async fn open(db: &Database, config: ApiConfig) -> StateResult<Self> {
        Self::with_storage(Arc::new(SqliteStorage::new(db.client_state())), config).await
    }

    /// Context over any storage; every store is hydrated before returning.
    pub async fn with_storage(
        storage: Arc<dyn StateStorage>,
        config: ApiConfig,
    ) -> StateResult<Self> {
        let ctx = AppContext {
            config,
            auth: AuthStore::new(storage.clone()),
            registration: RegistrationStore::new(storage.clone()),
            cards: CardStore::new(storage),
        };

        ctx.auth.hydrate().await?;
        ctx.registration.hydrate().await?;
        ctx.cards.hydrate().await?;
        debug!("Client state loaded");

        Ok(ctx)
    }

    pub fn storefront(&self) -> CommandResult<StorefrontClient> {
        Ok(StorefrontClient::from_config(&self.config)?)
    }

    pub fn partner(&self) -> CommandResult<PartnerClient> {
        Ok(PartnerClient::from_config(&self.config)?)
    }

    /// The logged-in user. Refuses until the auth store has hydrated and
    /// holds a session.
    pub fn require_user(&self) -> CommandResult<User> {
        if !self.auth.has_hydrated() || !self.auth.is_authenticated() {
            return Err(CommandError::not_authenticated());
        }
        self.auth.user().ok_or_else(CommandError::not_authenticated)
    }
}
