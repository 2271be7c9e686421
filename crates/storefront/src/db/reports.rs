//! Report queries.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use farmstand_core::{PreorderId, ProductId};

use super::{RepositoryError, local_day_bounds};
use crate::models::{LeftoverReportRow, PreorderReportRow};

#[derive(Debug, sqlx::FromRow)]
struct PreorderLine {
    id: PreorderId,
    username: Option<String>,
    product: String,
    quantity: i32,
    base_price: Decimal,
    order_date: DateTime<Utc>,
}

impl From<PreorderLine> for PreorderReportRow {
    fn from(line: PreorderLine) -> Self {
        Self {
            id: line.id,
            username: line.username,
            total: line.base_price * Decimal::from(line.quantity),
            product: line.product,
            quantity: line.quantity,
            base_price: line.base_price,
            order_date: line.order_date,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LeftoverLine {
    id: ProductId,
    name: String,
    max_quantity: i32,
    remaining_stock: i32,
    base_price: Decimal,
    description: String,
}

impl From<LeftoverLine> for LeftoverReportRow {
    fn from(line: LeftoverLine) -> Self {
        Self {
            id: line.id,
            name: line.name,
            max_quantity: line.max_quantity,
            remaining_stock: line.remaining_stock,
            base_price: line.base_price,
            description: line.description,
        }
    }
}

/// Read-only queries behind the admin reports.
pub struct ReportRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReportRepository<'a> {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Preorders placed on `date` (local time), by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn completed_preorders(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<PreorderReportRow>, RepositoryError> {
        let (start, end) = local_day_bounds(date);
        let rows = sqlx::query_as::<_, PreorderLine>(
            r"
            SELECT o.id, u.username, p.name AS product, o.quantity, p.base_price, o.order_date
            FROM preorders o
            JOIN products p ON p.id = o.product_id
            LEFT JOIN profiles u ON u.id = o.user_id
            WHERE o.order_date >= $1 AND o.order_date < $2
            ORDER BY o.id
            ",
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(PreorderReportRow::from).collect())
    }

    /// Products available on `date` that still have stock, by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn leftover_stock(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<LeftoverReportRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, LeftoverLine>(
            r"
            SELECT id, name, max_quantity,
                   COALESCE(remaining_stock, max_quantity) AS remaining_stock,
                   base_price, description
            FROM products
            WHERE available_date = $1
              AND COALESCE(remaining_stock, max_quantity) > 0
            ORDER BY name, id
            ",
        )
        .bind(date)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(LeftoverReportRow::from).collect())
    }
}
