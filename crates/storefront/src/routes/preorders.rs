//! Customer preorder handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::instrument;

use farmstand_core::check_preorder_quantity;

use crate::db::{PreorderRepository, ProductRepository, SettingsRepository};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireProfile;
use crate::models::{NewPreorder, Preorder, PreorderHistoryEntry, PreorderWindow, Product};
use crate::state::AppState;

/// Response to a successful preorder.
#[derive(Debug, Serialize)]
pub struct PreorderConfirmation {
    pub preorder: Preorder,
    pub remaining_stock: i32,
    pub message: String,
}

/// Confirmation shown to the customer.
#[must_use]
pub fn confirmation_message(quantity: i32, product_name: &str) -> String {
    format!("Preorder confirmed for {quantity} of {product_name}. Please pay upon collection.")
}

/// Whether `quantity` of `product` may be preordered at local time `now`.
///
/// # Errors
///
/// Returns `AppError::Forbidden` outside the preorder window,
/// `AppError::BadRequest` when the product is not on sale today or the
/// quantity is out of range.
pub fn check_preorder(
    window: &PreorderWindow,
    product: &Product,
    quantity: i32,
    now: NaiveDateTime,
) -> Result<()> {
    window.check(now.time())?;

    if !product.enabled || product.available_date != now.date() {
        return Err(AppError::BadRequest(
            "This product is not available for preorder today.".into(),
        ));
    }

    check_preorder_quantity(quantity, product.max_selectable())?;
    Ok(())
}

/// Place a preorder for one of today's products.
///
/// Refused when preordering is off or outside the daily window, when the
/// product is not on sale today, and when the quantity exceeds what is left.
#[instrument(skip_all, fields(product_id = %request.product_id, quantity = request.quantity))]
pub async fn create(
    State(state): State<AppState>,
    RequireProfile(profile): RequireProfile,
    Json(request): Json<NewPreorder>,
) -> Result<(StatusCode, Json<PreorderConfirmation>)> {
    let now = Local::now().naive_local();

    let window = SettingsRepository::new(state.pool()).window().await?;
    let product = ProductRepository::new(state.pool())
        .get(request.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    check_preorder(&window, &product, request.quantity, now)?;

    let placed = PreorderRepository::new(state.pool())
        .place(profile.id, product.id, request.quantity)
        .await?;

    tracing::info!(
        preorder_id = %placed.preorder.id,
        profile_id = %profile.id,
        remaining_stock = placed.remaining_stock,
        "Preorder placed"
    );
    let product_id = product.id.to_string();
    add_breadcrumb(
        "preorder",
        "Preorder placed",
        Some(&[("product_id", product_id.as_str())]),
    );

    Ok((
        StatusCode::CREATED,
        Json(PreorderConfirmation {
            message: confirmation_message(request.quantity, &product.name),
            preorder: placed.preorder,
            remaining_stock: placed.remaining_stock,
        }),
    ))
}

/// The caller's preorders, newest first.
#[instrument(skip_all, fields(profile_id = %profile.id))]
pub async fn history(
    State(state): State<AppState>,
    RequireProfile(profile): RequireProfile,
) -> Result<Json<Vec<PreorderHistoryEntry>>> {
    let entries = PreorderRepository::new(state.pool())
        .history(profile.id)
        .await?;
    Ok(Json(entries))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::response::IntoResponse;
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::models::product::tests::product;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn window() -> PreorderWindow {
        PreorderWindow {
            preorder_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            preorder_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            preordering_enabled: true,
        }
    }

    fn status(result: Result<()>) -> StatusCode {
        result.unwrap_err().into_response().status()
    }

    #[test]
    fn test_preorder_allowed() {
        assert!(check_preorder(&window(), &product(1, "Kale", 300), 4, at(9, 0)).is_ok());
    }

    #[test]
    fn test_preorder_outside_window_is_forbidden() {
        let kale = product(1, "Kale", 300);
        assert_eq!(
            status(check_preorder(&window(), &kale, 1, at(18, 1))),
            StatusCode::FORBIDDEN
        );

        let disabled = PreorderWindow {
            preordering_enabled: false,
            ..window()
        };
        assert_eq!(
            status(check_preorder(&disabled, &kale, 1, at(9, 0))),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_preorder_unavailable_product() {
        let mut kale = product(1, "Kale", 300);
        kale.enabled = false;
        assert_eq!(
            status(check_preorder(&window(), &kale, 1, at(9, 0))),
            StatusCode::BAD_REQUEST
        );

        let mut kale = product(1, "Kale", 300);
        kale.available_date = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        assert_eq!(
            status(check_preorder(&window(), &kale, 1, at(9, 0))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_preorder_quantity_limits() {
        let kale = product(1, "Kale", 300);
        assert_eq!(
            status(check_preorder(&window(), &kale, 5, at(9, 0))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(check_preorder(&window(), &kale, 0, at(9, 0))),
            StatusCode::BAD_REQUEST
        );

        let mut sold_out = product(1, "Kale", 300);
        sold_out.remaining_stock = Some(0);
        assert_eq!(
            status(check_preorder(&window(), &sold_out, 1, at(9, 0))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_confirmation_message() {
        assert_eq!(
            confirmation_message(3, "Tomato Roma Grade A"),
            "Preorder confirmed for 3 of Tomato Roma Grade A. Please pay upon collection."
        );
    }
}
