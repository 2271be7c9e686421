//! Product management.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use farmstand_core::{ProductId, sort_rows};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Product, ProductColumn, ProductInput};
use crate::routes::{SortQuery, today};
use crate::state::AppState;

/// All products, sorted by the requested column.
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<SortQuery<ProductColumn>>,
) -> Result<Json<Vec<Product>>> {
    let (column, direction) = query.resolve();
    let mut products = ProductRepository::new(state.pool()).list().await?;
    sort_rows(&mut products, column, direction);
    Ok(Json(products))
}

/// Create a product with full stock, enabled.
#[instrument(skip_all, fields(admin = %admin.username))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>)> {
    let name = input.validate().map_err(AppError::BadRequest)?;
    let available_date = input.available_date.unwrap_or_else(today);

    let product = ProductRepository::new(state.pool())
        .create(&name, &input, available_date)
        .await?;
    tracing::info!(product_id = %product.id, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product's details. Stock is reset to the new maximum.
#[instrument(skip_all, fields(admin = %admin.username, product_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ProductId>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>> {
    let name = input.validate().map_err(AppError::BadRequest)?;
    let product = ProductRepository::new(state.pool())
        .update(id, &name, &input)
        .await?;
    tracing::info!(name = %product.name, "Product updated");
    Ok(Json(product))
}

/// Enable or disable a product.
#[instrument(skip_all, fields(admin = %admin.username, product_id = %id))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .toggle_enabled(id)
        .await?;
    tracing::info!(enabled = product.enabled, "Product toggled");
    Ok(Json(product))
}

/// Delete a product and every preorder placed against it.
#[instrument(skip_all, fields(admin = %admin.username, product_id = %id))]
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool()).delete(id).await?;
    tracing::info!("Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
