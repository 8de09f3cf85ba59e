//! Persistent seen-set store
//!
//! Records which contribution ids have been opened by this installation, as a
//! JSON-encoded array of id strings under a fixed storage key. The seen-set is
//! best-effort bookkeeping: storage failures are logged and swallowed, never
//! surfaced to the caller.

use crate::{Error, Result};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// Storage key for the opened-record id list
pub const OPENED_IDS_KEY: &str = "openedBlogIds";

/// Durable set of previously-opened record ids
///
/// Grown monotonically; ids are appended once and never removed. Read-modify-write
/// is serialized by an in-process mutex (single-process assumption, no cross-process
/// locking needed).
#[derive(Clone)]
pub struct SeenSetStore {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
}

impl SeenSetStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Read the stored id sequence; missing key yields an empty set, a corrupt
    /// value is reported as a typed storage error
    async fn read_ids(&self, key: &str) -> Result<Vec<String>> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT value FROM storage WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((Some(value),)) => serde_json::from_str(&value)
                .map_err(|e| Error::Storage(format!("corrupt value under '{}': {}", key, e))),
            _ => Ok(Vec::new()),
        }
    }

    /// Ids recorded under `key`; empty on missing key or any storage failure
    pub async fn get(&self, key: &str) -> Vec<String> {
        match self.read_ids(key).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read seen-set, treating as empty");
                Vec::new()
            }
        }
    }

    /// Append `id` under `key` if not already present
    ///
    /// Failures are logged and swallowed; the UI proceeds unaffected.
    pub async fn append(&self, key: &str, id: &str) {
        let _guard = self.write_lock.lock().await;

        // A corrupt stored value is recovered by rewriting the key from scratch
        let mut ids = match self.read_ids(key).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(key = %key, error = %e, "Resetting unreadable seen-set");
                Vec::new()
            }
        };

        if ids.iter().any(|existing| existing == id) {
            return;
        }
        ids.push(id.to_string());

        let encoded = match serde_json::to_string(&ids) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to encode seen-set");
                return;
            }
        };

        let written = sqlx::query(
            "INSERT OR REPLACE INTO storage (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)",
        )
        .bind(key)
        .bind(&encoded)
        .execute(&self.pool)
        .await;

        if let Err(e) = written {
            warn!(key = %key, id = %id, error = %e, "Failed to save opened id");
        }
    }

    /// True if `id` was recorded under `key`
    pub async fn contains(&self, key: &str, id: &str) -> bool {
        self.get(key).await.iter().any(|existing| existing == id)
    }
}
