//! # Client State Repository
//!
//! Stores one JSON blob per namespaced key (`netcom:auth`, `netcom:cards`,
//! `netcom:registration`). The repository knows nothing about what is inside
//! the blob; the owning store encodes and versions it.
//!
//! ## Write Semantics
//! ```text
//! put(key, value)
//!      │
//!      ▼
//! INSERT ... ON CONFLICT(key) DO UPDATE   ← single statement, atomic
//!      │
//!      ├── Ok  → caller commits its in-memory copy
//!      └── Err → caller keeps the previous in-memory copy
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for the `client_state` table.
#[derive(Debug, Clone)]
pub struct ClientStateRepository {
    pool: SqlitePool,
}

impl ClientStateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ClientStateRepository { pool }
    }

    /// Reads the raw blob for `key`. `None` if nothing was ever written.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM client_state WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = value.is_some(), "Loaded client state");
        Ok(value)
    }

    /// Inserts or replaces the blob for `key`.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO client_state (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Saved client state");
        Ok(())
    }

    /// Removes `key`. Returns whether a row existed.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM client_state WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, "Removed client state");
        Ok(result.rows_affected() > 0)
    }

    /// All stored keys, sorted.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys = sqlx::query_scalar("SELECT key FROM client_state ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
