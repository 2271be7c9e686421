//! Preorder repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use farmstand_core::{PreorderId, ProductId, ProfileId};

use super::RepositoryError;
use crate::models::{Preorder, PreorderHistoryEntry};

#[derive(Debug, sqlx::FromRow)]
struct PreorderRow {
    id: PreorderId,
    product_id: ProductId,
    user_id: ProfileId,
    quantity: i32,
    order_date: DateTime<Utc>,
}

impl From<PreorderRow> for Preorder {
    fn from(row: PreorderRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            user_id: row.user_id,
            quantity: row.quantity,
            order_date: row.order_date,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    id: PreorderId,
    quantity: i32,
    order_date: DateTime<Utc>,
    product_name: String,
    base_price: Decimal,
}

impl From<HistoryRow> for PreorderHistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            id: row.id,
            quantity: row.quantity,
            order_date: row.order_date,
            product_name: row.product_name,
            base_price: row.base_price,
        }
    }
}

/// Result of a successful preorder.
#[derive(Debug, Clone)]
pub struct PlacedPreorder {
    pub preorder: Preorder,
    /// Stock left on the product after the decrement.
    pub remaining_stock: i32,
}

/// Repository for preorder database operations.
pub struct PreorderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PreorderRepository<'a> {
    /// Create a new preorder repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a preorder and take its quantity out of the product's stock.
    ///
    /// Both writes happen in one transaction. The decrement only applies
    /// while enough stock is left, so concurrent preorders cannot oversell.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the remaining stock is below
    /// `quantity` (or the product vanished).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn place(
        &self,
        user_id: ProfileId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<PlacedPreorder, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let remaining_stock: Option<i32> = sqlx::query_scalar(
            r"
            UPDATE products
            SET remaining_stock = COALESCE(remaining_stock, max_quantity) - $2,
                updated_at = NOW()
            WHERE id = $1 AND COALESCE(remaining_stock, max_quantity) >= $2
            RETURNING remaining_stock
            ",
        )
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(remaining_stock) = remaining_stock else {
            tx.rollback().await?;
            return Err(RepositoryError::Conflict("insufficient stock".to_owned()));
        };

        let row = sqlx::query_as::<_, PreorderRow>(
            r"
            INSERT INTO preorders (product_id, user_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, product_id, user_id, quantity, order_date
            ",
        )
        .bind(product_id)
        .bind(user_id)
        .bind(quantity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(PlacedPreorder {
            preorder: row.into(),
            remaining_stock,
        })
    }

    /// A customer's preorders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn history(
        &self,
        user_id: ProfileId,
    ) -> Result<Vec<PreorderHistoryEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r"
            SELECT o.id, o.quantity, o.order_date,
                   p.name AS product_name, p.base_price
            FROM preorders o
            JOIN products p ON p.id = o.product_id
            WHERE o.user_id = $1
            ORDER BY o.order_date DESC, o.id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(PreorderHistoryEntry::from).collect())
    }
}
