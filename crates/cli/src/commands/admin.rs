//! Admin user management commands.
//!
//! Profiles are created by the storefront when a user signs up. Promotion
//! only changes the role of an existing profile.

use farmstand_core::Email;
use farmstand_storefront::db::{ProfileRepository, RepositoryError};
use thiserror::Error;

use super::ConnectError;

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("No profile found with email: {0}")]
    UnknownProfile(String),
}

/// Promote the profile registered under `email` to the admin role.
///
/// Promoting a profile that is already an admin is a no-op.
///
/// # Errors
///
/// Returns `AdminError` if the email is invalid, no profile uses it, or the
/// database update fails.
pub async fn promote(email: &str) -> Result<(), AdminError> {
    let email = Email::parse(email).map_err(|_| AdminError::InvalidEmail(email.to_owned()))?;

    let pool = super::connect().await?;
    let profiles = ProfileRepository::new(&pool);

    let profile = profiles
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AdminError::UnknownProfile(email.to_string()))?;

    if profile.role.is_admin() {
        tracing::info!(email = %email, "Profile is already an admin");
        return Ok(());
    }

    let promoted = profiles.promote(profile.id).await?;
    tracing::info!(
        id = %promoted.id,
        email = %promoted.email,
        username = %promoted.username,
        "Profile promoted to admin"
    );
    Ok(())
}
