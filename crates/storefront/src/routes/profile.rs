//! Caller profile handlers.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::db::ProfileRepository;
use crate::db::profiles::{DUPLICATE_EMAIL, DUPLICATE_PROFILE};
use crate::error::{AppError, Result};
use crate::middleware::{Identity, RequireProfile};
use crate::models::{NewProfile, Profile};
use crate::state::AppState;

/// The caller's profile.
pub async fn show(RequireProfile(profile): RequireProfile) -> Json<Profile> {
    Json(profile)
}

/// Create the caller's profile after their first sign-in.
///
/// Every new profile gets the `user` role.
#[instrument(skip_all, fields(profile_id = %id))]
pub async fn create(
    State(state): State<AppState>,
    Identity(id): Identity,
    Json(new): Json<NewProfile>,
) -> Result<(StatusCode, Json<Profile>)> {
    let repo = ProfileRepository::new(state.pool());

    if repo.get(id).await?.is_some() {
        return Err(AppError::Conflict(DUPLICATE_PROFILE.into()));
    }
    if repo.email_exists(&new.email).await? {
        return Err(AppError::Conflict(DUPLICATE_EMAIL.into()));
    }

    let profile = repo.create(id, &new).await?;
    tracing::info!(username = %profile.username, "Profile created");

    Ok((StatusCode::CREATED, Json(profile)))
}
