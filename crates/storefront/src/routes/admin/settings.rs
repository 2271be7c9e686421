//! Preorder window settings.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::SettingsRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::PreorderWindow;
use crate::state::AppState;

/// Current preorder window.
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<PreorderWindow>> {
    Ok(Json(SettingsRepository::new(state.pool()).window().await?))
}

/// Replace the preorder window.
#[instrument(skip_all, fields(admin = %admin.username))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(window): Json<PreorderWindow>,
) -> Result<Json<PreorderWindow>> {
    let window = SettingsRepository::new(state.pool())
        .update_window(&window)
        .await?;
    tracing::info!(
        start = %window.preorder_start,
        end = %window.preorder_end,
        enabled = window.preordering_enabled,
        "Preorder window updated"
    );
    Ok(Json(window))
}
