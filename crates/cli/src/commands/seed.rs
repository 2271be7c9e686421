//! Seed the storefront database with sample products for today.

use chrono::Local;
use farmstand_storefront::db::{ProductRepository, RepositoryError};
use farmstand_storefront::models::ProductInput;
use rust_decimal::Decimal;
use thiserror::Error;

use super::ConnectError;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid sample product: {0}")]
    InvalidSample(String),
}

fn sample(
    product_type: &str,
    variety: &str,
    quality: &str,
    stock: i32,
    cents: i64,
    unit: &str,
) -> ProductInput {
    ProductInput {
        product_type: product_type.to_owned(),
        variety: variety.to_owned(),
        quality: quality.to_owned(),
        max_quantity: stock,
        base_price: Decimal::new(cents, 2),
        hourly_price_drop: None,
        unit: unit.to_owned(),
        description: String::new(),
        available_date: None,
    }
}

/// The products inserted by `farmstand seed`.
fn samples() -> Vec<ProductInput> {
    vec![
        sample("Tomato", "Roma", "Premium", 40, 350, "kg"),
        sample("Potato", "Yukon Gold", "", 60, 180, "kg"),
        sample("Strawberry", "", "Grade A", 25, 500, "punnet"),
        sample("Lettuce", "Butterhead", "", 30, 120, "head"),
    ]
}

/// Insert the sample products, available today and enabled.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or an insert fails.
pub async fn sample_products() -> Result<usize, SeedError> {
    let pool = super::connect().await?;
    let products = ProductRepository::new(&pool);
    let today = Local::now().date_naive();

    let inputs = samples();
    for input in &inputs {
        let name = input.validate().map_err(SeedError::InvalidSample)?;
        let product = products.create(&name, input, today).await?;
        tracing::info!(id = %product.id, name = %product.name, "Seeded product");
    }

    tracing::info!(count = inputs.len(), date = %today, "Seeding complete");
    Ok(inputs.len())
}
