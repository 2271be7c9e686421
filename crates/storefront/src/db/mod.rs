//! Database operations for the storefront `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `profiles` - One row per identity-provider account, with its role
//! - `products` - Daily listings with their remaining stock
//! - `preorders` - Customer reservations against a product
//! - `settings` - Singleton row holding the daily preorder window
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p farmstand-cli -- migrate
//! ```

pub mod preorders;
pub mod products;
pub mod profiles;
pub mod reports;
pub mod settings;

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use preorders::{PlacedPreorder, PreorderRepository};
pub use products::ProductRepository;
pub use profiles::ProfileRepository;
pub use reports::ReportRepository;
pub use settings::SettingsRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// UTC bounds `[start, end)` of a calendar day in the server's local time zone.
///
/// Falls back to UTC midnight when local midnight does not exist (DST gap).
#[must_use]
pub fn local_day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let bound = |day: NaiveDate| {
        let midnight = day.and_time(chrono::NaiveTime::MIN);
        Local
            .from_local_datetime(&midnight)
            .earliest()
            .map_or_else(|| midnight.and_utc(), |local| local.with_timezone(&Utc))
    };
    let next = date.succ_opt().unwrap_or(date);
    (bound(date), bound(next))
}

/// Map a unique violation to [`RepositoryError::Conflict`].
fn conflict_on_unique(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}
