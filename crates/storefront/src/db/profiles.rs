//! Profile repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use farmstand_core::{Email, ProfileId, Role};

use super::{RepositoryError, conflict_on_unique};
use crate::models::{NewProfile, Profile};

const PROFILE_COLUMNS: &str = "id, username, name, surname, phone, email, role, created_at";

/// Message shown when a signup reuses an address.
pub const DUPLICATE_EMAIL: &str = "Email already exists. Please use a different email.";

/// Message shown when the caller already has a profile.
pub const DUPLICATE_PROFILE: &str = "Profile already exists";

/// Conflict message for the unique constraint a profile insert violated.
fn conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("profiles_pkey") => DUPLICATE_PROFILE,
        _ => DUPLICATE_EMAIL,
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    username: String,
    name: String,
    surname: String,
    phone: String,
    email: String,
    role: Role,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = RepositoryError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: ProfileId::new(row.id),
            username: row.username,
            name: row.name,
            surname: row.surname,
            phone: row.phone,
            email,
            role: row.role,
            created_at: row.created_at,
        })
    }
}

/// Repository for profile database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get(&self, id: ProfileId) -> Result<Option<Profile>, RepositoryError> {
        sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .map(Profile::try_from)
        .transpose()
    }

    /// Get a profile by email address, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<Profile>, RepositoryError> {
        sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?
        .map(Profile::try_from)
        .transpose()
    }

    /// Whether any profile uses `email`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM profiles WHERE lower(email) = lower($1))",
        )
        .bind(email)
        .fetch_one(self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a profile with the `user` role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the ID or email is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, id: ProfileId, new: &NewProfile) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r"
            INSERT INTO profiles (id, username, name, surname, phone, email, role)
            VALUES ($1, $2, $3, $4, $5, $6, 'user')
            RETURNING {PROFILE_COLUMNS}
            "
        ))
        .bind(id)
        .bind(new.username())
        .bind(new.name.trim())
        .bind(new.surname.trim())
        .bind(new.phone.trim())
        .bind(&new.email)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let message = match &e {
                sqlx::Error::Database(db_err) => conflict_message(db_err.constraint()),
                _ => DUPLICATE_EMAIL,
            };
            conflict_on_unique(e, message)
        })?;

        Profile::try_from(row)
    }

    /// List every profile, by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored email is invalid.
    pub async fn list(&self) -> Result<Vec<Profile>, RepositoryError> {
        sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY lower(username), id"
        ))
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(Profile::try_from)
        .collect()
    }

    /// Give a profile the `admin` role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the profile does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn promote(&self, id: ProfileId) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "UPDATE profiles SET role = 'admin', updated_at = NOW() \
             WHERE id = $1 RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Profile::try_from(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_by_constraint() {
        assert_eq!(conflict_message(Some("profiles_pkey")), DUPLICATE_PROFILE);
        assert_eq!(conflict_message(Some("profiles_email_key")), DUPLICATE_EMAIL);
        assert_eq!(
            conflict_message(Some("profiles_email_lower_idx")),
            DUPLICATE_EMAIL
        );
        assert_eq!(conflict_message(None), DUPLICATE_EMAIL);
    }
}
