//! Identity extractors.
//!
//! Authentication itself happens at the identity provider. Its gateway
//! forwards the verified account ID in a header (see
//! [`StorefrontConfig::identity_header`](crate::config::StorefrontConfig));
//! these extractors turn that header into a profile and enforce roles.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderName, request::Parts},
};

use farmstand_core::ProfileId;

use crate::db::ProfileRepository;
use crate::error::{AppError, set_sentry_user};
use crate::models::Profile;
use crate::state::AppState;

/// Extractor for the caller's verified account ID.
///
/// Does not require a profile row, so it is usable on the signup route.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Identity(id): Identity) -> impl IntoResponse {
///     format!("Hello, {id}!")
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub ProfileId);

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        identity_from_headers(&parts.headers, &state.config().identity_header).map(Self)
    }
}

/// Extractor that requires a caller with a profile.
pub struct RequireProfile(pub Profile);

impl FromRequestParts<AppState> for RequireProfile {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Identity(id) = Identity::from_request_parts(parts, state).await?;

        let profile = ProfileRepository::new(state.pool())
            .get(id)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("No profile for this account. Complete signup first.".into())
            })?;

        set_sentry_user(&profile.id, Some(profile.email.as_str()));
        Ok(Self(profile))
    }
}

/// Extractor that requires a caller with the `admin` role.
///
/// Unknown callers get 401; known callers without the role get 403.
///
/// # Example
///
/// ```rust,ignore
/// async fn admin_handler(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
///     format!("Hello admin {}!", admin.username)
/// }
/// ```
pub struct RequireAdmin(pub Profile);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireProfile(profile) = RequireProfile::from_request_parts(parts, state).await?;
        if !profile.is_admin() {
            tracing::warn!(profile_id = %profile.id, path = %parts.uri.path(), "Admin route refused");
            return Err(AppError::Forbidden("Admin access required".into()));
        }
        Ok(Self(profile))
    }
}

/// Read and parse the identity header.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if the header is missing or not a UUID.
pub fn identity_from_headers(headers: &HeaderMap, name: &HeaderName) -> Result<ProfileId, AppError> {
    let value = headers
        .get(name)
        .ok_or_else(|| AppError::Unauthorized("Sign in required".into()))?;

    value
        .to_str()
        .ok()
        .and_then(|v| ProfileId::parse(v).ok())
        .ok_or_else(|| AppError::Unauthorized("Invalid identity".into()))
}
