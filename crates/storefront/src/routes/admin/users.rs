//! Profile listing and promotion.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use farmstand_core::ProfileId;

use crate::db::ProfileRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Profile;
use crate::state::AppState;

/// Every profile, by username.
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Profile>>> {
    Ok(Json(ProfileRepository::new(state.pool()).list().await?))
}

/// Grant the `admin` role.
#[instrument(skip_all, fields(admin = %admin.username, profile_id = %id))]
pub async fn promote(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ProfileId>,
) -> Result<Json<Profile>> {
    let profile = ProfileRepository::new(state.pool()).promote(id).await?;
    tracing::info!(username = %profile.username, "Profile promoted to admin");
    Ok(Json(profile))
}
