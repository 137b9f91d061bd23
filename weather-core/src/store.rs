use chrono::Utc;
use log::debug;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::model::{LocationPatch, NewLocation, SavedLocation};

/// Saved-locations table, created at startup if absent.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

const COLUMNS: &str = "id, name, latitude, longitude, created_at, updated_at";

/// CRUD persistence for named favorite locations.
///
/// Lookups return `Option` as the not-found sentinel; only genuine
/// persistence failures surface as errors. Every mutation runs in a single
/// transaction, so a failure between statements rolls back cleanly and no
/// partial write is visible.
#[derive(Debug, Clone)]
pub struct LocationStore {
    pool: SqlitePool,
}

impl LocationStore {
    /// Connect to the database and bootstrap the schema.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(url).await?;
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;

        debug!("connected to locations database ({url})");
        Ok(Self { pool })
    }

    /// Insert a new favorite; the store assigns id and both timestamps.
    pub async fn create(&self, new: &NewLocation) -> Result<SavedLocation> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let row: SavedLocation = sqlx::query_as(&format!(
            "INSERT INTO locations (name, latitude, longitude, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS};"
        ))
        .bind(&new.name)
        .bind(new.latitude)
        .bind(new.longitude)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Look up one favorite; `None` when the id is unknown.
    pub async fn get(&self, id: i64) -> Result<Option<SavedLocation>> {
        let row = sqlx::query_as(&format!("SELECT {COLUMNS} FROM locations WHERE id = ?;"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// List favorites in insertion order, bounded by offset/limit.
    /// Bounds (`skip >= 0`, `limit` in 1..=1000) are enforced by the caller.
    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<SavedLocation>> {
        let rows = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM locations ORDER BY id LIMIT ? OFFSET ?;"
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Partial update: only fields present in the patch are overwritten.
    /// Refreshes `updated_at`, preserves `created_at`.
    pub async fn update(&self, id: i64, patch: &LocationPatch) -> Result<Option<SavedLocation>> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<SavedLocation> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM locations WHERE id = ?;"))
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let name = patch.name.clone().unwrap_or(existing.name);
        let latitude = patch.latitude.unwrap_or(existing.latitude);
        let longitude = patch.longitude.unwrap_or(existing.longitude);

        let row: SavedLocation = sqlx::query_as(&format!(
            "UPDATE locations
             SET name = ?, latitude = ?, longitude = ?, updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS};"
        ))
        .bind(&name)
        .bind(latitude)
        .bind(longitude)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    /// Delete a favorite, returning the deleted record; `None` when absent.
    pub async fn delete(&self, id: i64) -> Result<Option<SavedLocation>> {
        let mut tx = self.pool.begin().await?;

        let row: Option<SavedLocation> = sqlx::query_as(&format!(
            "DELETE FROM locations WHERE id = ? RETURNING {COLUMNS};"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }
}
