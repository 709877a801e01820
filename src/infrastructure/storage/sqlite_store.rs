use crate::application::ports::ActionStore;
use crate::domain::entities::ActionRecord;
use crate::shared::error::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use tracing::warn;

/// SQLite-backed store: the whole collection is serialized as one JSON
/// array under a single well-known key, so a save is one atomic row upsert
/// and a reader never observes a half-written collection. There is no
/// schema versioning; a layout change requires a wipe.
pub struct SqliteActionStore {
    pool: Pool<Sqlite>,
    storage_key: String,
}

impl SqliteActionStore {
    pub async fn connect(database_url: &str, max_connections: u32, storage_key: String) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new(pool, storage_key).await
    }

    pub async fn new(pool: Pool<Sqlite>, storage_key: String) -> Result<Self> {
        let store = Self { pool, storage_key };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS offline_store (
                storage_key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn read_value(&self) -> Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT value FROM offline_store
            WHERE storage_key = ?1
            "#,
        )
        .bind(&self.storage_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| row.get::<String, _>("value")))
    }
}

#[async_trait]
impl ActionStore for SqliteActionStore {
    /// A corrupted or unavailable store yields an empty collection rather
    /// than an error, so a broken queue cannot block startup.
    async fn load(&self) -> Vec<ActionRecord> {
        let raw = match self.read_value().await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(
                    target: "sync::store",
                    error = %err,
                    "failed to read persisted action queue, starting empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ActionRecord>>(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    target: "sync::store",
                    error = %err,
                    "persisted action queue is corrupted, starting empty"
                );
                Vec::new()
            }
        }
    }

    async fn save(&self, records: &[ActionRecord]) -> std::result::Result<(), AppError> {
        let value = serde_json::to_string(records)?;
        let updated_at = Utc::now().timestamp();

        sqlx::query(
            r#"
            INSERT INTO offline_store (storage_key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(storage_key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&self.storage_key)
        .bind(&value)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
