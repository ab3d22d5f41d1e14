//! Errors raised by the persisted stores.

use netcom_core::{CoreError, ValidationError};
use netcom_db::DbError;
use thiserror::Error;

pub type StateResult<T> = Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    /// The backing storage refused a read or write. In-memory state is
    /// left as it was before the call.
    #[error("Erro no armazenamento local: {0}")]
    Storage(#[from] DbError),

    /// A mutation arrived before `hydrate()`; writing now would clobber the
    /// persisted record with defaults.
    #[error("Os dados locais de '{key}' ainda não foram carregados.")]
    NotHydrated { key: &'static str },

    /// A persisted blob could not be encoded.
    #[error("Não foi possível gravar os dados de '{key}': {reason}")]
    Encode { key: String, reason: String },

    /// An in-memory storage was told to fail (tests only).
    #[error("Armazenamento local indisponível: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
