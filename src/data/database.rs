//! SQLite database operations
//!
//! All database access goes through this module.
//! The `animal_images` table is an append-only log: rows are inserted
//! and read, never updated or deleted.

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::path::Path;

use super::models::*;
use crate::error::AppError;
use crate::metrics::DB_QUERIES_TOTAL;

const MAX_CONNECTIONS: u32 = 5;

/// Database connection pool wrapper.
///
/// Built once at startup and shared through `AppState`.
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect to SQLite database
    ///
    /// Creates the database file if it doesn't exist.
    /// Runs pending migrations automatically.
    ///
    /// # Arguments
    /// * `path` - Path to SQLite database file
    ///
    /// # Errors
    /// Returns error if connection or migration fails
    pub async fn connect(path: &Path) -> Result<Self, AppError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Database(sqlx::Error::Io(e)))?;
        }

        // FULL sync: a returned insert is on disk.
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                AppError::Internal(anyhow::anyhow!("Migration failed: {}", e))
            })?;

        tracing::info!(path = %path.display(), "Database connected and migrated successfully");

        Ok(Self { pool })
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // =========================================================================
    // Animal images
    // =========================================================================

    /// Append a new image record stamped with the current time
    ///
    /// The insert is committed when this returns, so any later read
    /// through the pool (or another handle on the same file) sees it.
    ///
    /// # Returns
    /// The stored record, including its generated `id` and `created_at`
    pub async fn append_image(
        &self,
        animal_type: AnimalType,
        image_url: &str,
    ) -> Result<AnimalImage, AppError> {
        self.append_image_at(animal_type, image_url, Utc::now()).await
    }

    pub(crate) async fn append_image_at(
        &self,
        animal_type: AnimalType,
        image_url: &str,
        created_at: DateTime<Utc>,
    ) -> Result<AnimalImage, AppError> {
        DB_QUERIES_TOTAL.with_label_values(&["insert"]).inc();

        // Drain the statement so the implicit transaction commits before
        // the record is handed back.
        let rows = sqlx::query_as::<_, AnimalImage>(
            r#"
            INSERT INTO animal_images (animal_type, image_url, created_at)
            VALUES (?, ?, ?)
            RETURNING id, animal_type, image_url, created_at
            "#,
        )
        .bind(animal_type)
        .bind(image_url)
        .bind(created_at)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .next()
            .ok_or(AppError::Database(sqlx::Error::RowNotFound))
    }

    /// Get the most recent image record for an animal type
    ///
    /// Newest `created_at` wins; equal timestamps fall back to the
    /// highest `id`.
    ///
    /// # Returns
    /// The record or None if nothing was stored for this type yet
    pub async fn most_recent_image(
        &self,
        animal_type: AnimalType,
    ) -> Result<Option<AnimalImage>, AppError> {
        DB_QUERIES_TOTAL.with_label_values(&["select_latest"]).inc();

        let record = sqlx::query_as::<_, AnimalImage>(
            r#"
            SELECT id, animal_type, image_url, created_at
            FROM animal_images
            WHERE animal_type = ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(animal_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Count stored records for an animal type
    pub async fn count_images(&self, animal_type: AnimalType) -> Result<i64, AppError> {
        DB_QUERIES_TOTAL.with_label_values(&["count"]).inc();

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM animal_images WHERE animal_type = ?")
                .bind(animal_type)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
