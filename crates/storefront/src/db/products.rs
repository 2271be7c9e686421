//! Product repository.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use farmstand_core::ProductId;

use super::RepositoryError;
use crate::models::{Product, ProductInput};

const PRODUCT_COLUMNS: &str = r#"
    id, name, "type", variety, quality, max_quantity, remaining_stock,
    base_price, hourly_price_drop, unit, description, enabled,
    available_date, created_at, updated_at
"#;

#[derive(Debug, sqlx::FromRow)]
pub(super) struct ProductRow {
    id: ProductId,
    name: String,
    #[sqlx(rename = "type")]
    product_type: String,
    variety: String,
    quality: String,
    max_quantity: i32,
    remaining_stock: Option<i32>,
    base_price: Decimal,
    hourly_price_drop: Decimal,
    unit: String,
    description: String,
    enabled: bool,
    available_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            product_type: row.product_type,
            variety: row.variety,
            quality: row.quality,
            max_quantity: row.max_quantity,
            remaining_stock: row.remaining_stock,
            base_price: row.base_price,
            hourly_price_drop: row.hourly_price_drop,
            unit: row.unit,
            description: row.description,
            enabled: row.enabled,
            available_date: row.available_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every product, unordered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Enabled products available on `date`, by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_available_on(&self, date: NaiveDate) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE enabled AND available_date = $1 \
             ORDER BY name, id"
        ))
        .bind(date)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Create an enabled product with full stock.
    ///
    /// `name` is the display name computed from the input.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        input: &ProductInput,
        available_date: NaiveDate,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products
                (name, "type", variety, quality, max_quantity, remaining_stock,
                 base_price, hourly_price_drop, unit, description, enabled, available_date)
            VALUES ($1, $2, $3, $4, $5, $5, $6, $7, $8, $9, TRUE, $10)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(input.product_type.trim())
        .bind(input.variety.trim())
        .bind(input.quality.trim())
        .bind(input.max_quantity)
        .bind(input.base_price)
        .bind(input.hourly_price_drop())
        .bind(&input.unit)
        .bind(&input.description)
        .bind(available_date)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace a product's fields and reset its stock to `max_quantity`.
    ///
    /// A missing `available_date` keeps the stored one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        name: &str,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products SET
                name = $2, "type" = $3, variety = $4, quality = $5,
                max_quantity = $6, remaining_stock = $6,
                base_price = $7, hourly_price_drop = $8, unit = $9, description = $10,
                available_date = COALESCE($11, available_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(input.product_type.trim())
        .bind(input.variety.trim())
        .bind(input.quality.trim())
        .bind(input.max_quantity)
        .bind(input.base_price)
        .bind(input.hourly_price_drop())
        .bind(&input.unit)
        .bind(&input.description)
        .bind(input.available_date)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Flip a product's `enabled` flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn toggle_enabled(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products SET enabled = NOT enabled, updated_at = NOW() \
             WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a product together with its preorders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM preorders WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;
        tracing::debug!(product_id = %id, preorders_removed = removed, "Product deleted");
        Ok(())
    }
}
