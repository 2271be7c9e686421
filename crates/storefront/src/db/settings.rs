//! Preorder window settings.

use chrono::NaiveTime;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::PreorderWindow;

#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    preorder_start: NaiveTime,
    preorder_end: NaiveTime,
    preordering_enabled: bool,
}

impl From<SettingsRow> for PreorderWindow {
    fn from(row: SettingsRow) -> Self {
        Self {
            preorder_start: row.preorder_start,
            preorder_end: row.preorder_end,
            preordering_enabled: row.preordering_enabled,
        }
    }
}

/// Repository for the singleton settings row (`id = 1`).
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Read the preorder window.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the settings row is missing.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn window(&self) -> Result<PreorderWindow, RepositoryError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            "SELECT preorder_start, preorder_end, preordering_enabled FROM settings WHERE id = 1",
        )
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Store a new preorder window.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn update_window(
        &self,
        window: &PreorderWindow,
    ) -> Result<PreorderWindow, RepositoryError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r"
            INSERT INTO settings (id, preorder_start, preorder_end, preordering_enabled)
            VALUES (1, $1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                preorder_start = EXCLUDED.preorder_start,
                preorder_end = EXCLUDED.preorder_end,
                preordering_enabled = EXCLUDED.preordering_enabled,
                updated_at = NOW()
            RETURNING preorder_start, preorder_end, preordering_enabled
            ",
        )
        .bind(window.preorder_start)
        .bind(window.preorder_end)
        .bind(window.preordering_enabled)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
