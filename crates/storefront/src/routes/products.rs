//! Customer product listing.

use axum::{Json, extract::State};
use chrono::Local;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::models::ProductListing;
use crate::state::AppState;

/// Today's enabled products, priced at the current local time.
#[instrument(skip_all)]
pub async fn today(State(state): State<AppState>) -> Result<Json<Vec<ProductListing>>> {
    let now = Local::now().naive_local();
    let products = ProductRepository::new(state.pool())
        .list_available_on(now.date())
        .await?;

    Ok(Json(
        products
            .into_iter()
            .map(|product| ProductListing::priced_at(product, now))
            .collect(),
    ))
}
