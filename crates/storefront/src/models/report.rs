//! Report rows and their sortable columns.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use farmstand_core::sorting::compare_text;
use farmstand_core::{PreorderId, ProductId, Sortable};

/// One preorder in the completed-preorders report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreorderReportRow {
    pub id: PreorderId,
    /// `None` when the ordering profile no longer has a username.
    pub username: Option<String>,
    pub product: String,
    pub quantity: i32,
    pub base_price: Decimal,
    /// `quantity × base_price`.
    pub total: Decimal,
    pub order_date: DateTime<Utc>,
}

impl PreorderReportRow {
    /// Cells in the order of [`PreorderReportRow::HEADERS`].
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.username.clone().unwrap_or_else(|| "-".to_string()),
            self.product.clone(),
            self.quantity.to_string(),
            format!("{:.2}", self.base_price),
            format!("{:.2}", self.total),
            self.order_date.format("%Y-%m-%d %H:%M").to_string(),
        ]
    }

    pub const HEADERS: [&'static str; 7] = [
        "Order ID",
        "Username",
        "Product",
        "Quantity",
        "Base Price",
        "Total",
        "Order Date",
    ];
}

/// Sortable columns of the completed-preorders report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PreorderColumn {
    #[default]
    Id,
    Username,
    Product,
    Quantity,
    BasePrice,
    Total,
    OrderDate,
}

impl Sortable for PreorderReportRow {
    type Column = PreorderColumn;

    fn compare_by(&self, other: &Self, column: PreorderColumn) -> Ordering {
        match column {
            PreorderColumn::Id => self.id.cmp(&other.id),
            PreorderColumn::Username => compare_text(
                self.username.as_deref().unwrap_or(""),
                other.username.as_deref().unwrap_or(""),
            ),
            PreorderColumn::Product => compare_text(&self.product, &other.product),
            PreorderColumn::Quantity => self.quantity.cmp(&other.quantity),
            PreorderColumn::BasePrice => self.base_price.cmp(&other.base_price),
            PreorderColumn::Total => self.total.cmp(&other.total),
            PreorderColumn::OrderDate => self.order_date.cmp(&other.order_date),
        }
    }
}

/// One product in the leftover-stock report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeftoverReportRow {
    pub id: ProductId,
    pub name: String,
    pub max_quantity: i32,
    pub remaining_stock: i32,
    pub base_price: Decimal,
    pub description: String,
}

impl LeftoverReportRow {
    /// Cells in the order of [`LeftoverReportRow::HEADERS`].
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.max_quantity.to_string(),
            self.remaining_stock.to_string(),
            format!("{:.2}", self.base_price),
        ]
    }

    pub const HEADERS: [&'static str; 4] = ["Product", "Max Qty", "Remaining Stock", "Base Price"];
}

/// Sortable columns of the leftover-stock report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeftoverColumn {
    #[default]
    Name,
    MaxQuantity,
    RemainingStock,
    BasePrice,
}

impl Sortable for LeftoverReportRow {
    type Column = LeftoverColumn;

    fn compare_by(&self, other: &Self, column: LeftoverColumn) -> Ordering {
        match column {
            LeftoverColumn::Name => compare_text(&self.name, &other.name),
            LeftoverColumn::MaxQuantity => self.max_quantity.cmp(&other.max_quantity),
            LeftoverColumn::RemainingStock => self.remaining_stock.cmp(&other.remaining_stock),
            LeftoverColumn::BasePrice => self.base_price.cmp(&other.base_price),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use farmstand_core::{SortDirection, sort_rows};

    use super::*;

    fn order(id: i32, username: Option<&str>, product: &str, quantity: i32) -> PreorderReportRow {
        let base_price = Decimal::new(300, 2);
        PreorderReportRow {
            id: PreorderId::new(id),
            username: username.map(String::from),
            product: product.to_string(),
            quantity,
            base_price,
            total: base_price * Decimal::from(quantity),
            order_date: Utc.with_ymd_and_hms(2025, 3, 14, 9, id.unsigned_abs(), 0).unwrap(),
        }
    }

    #[test]
    fn test_preorder_cells_match_headers() {
        let row = order(4, None, "Tomato Roma", 2);
        let cells = row.cells();
        assert_eq!(cells.len(), PreorderReportRow::HEADERS.len());
        assert_eq!(cells[1], "-");
        assert_eq!(cells[4], "3.00");
        assert_eq!(cells[5], "6.00");
    }

    #[test]
    fn test_sort_preorders_by_username_missing_first() {
        let mut rows = vec![
            order(1, Some("zoe"), "Kale", 1),
            order(2, None, "Kale", 1),
            order(3, Some("Adam"), "Kale", 1),
        ];
        sort_rows(&mut rows, PreorderColumn::Username, SortDirection::Asc);
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_i32()).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn test_sort_preorders_by_total_desc() {
        let mut rows = vec![
            order(1, None, "Kale", 1),
            order(2, None, "Kale", 5),
            order(3, None, "Kale", 3),
        ];
        sort_rows(&mut rows, PreorderColumn::Total, SortDirection::Desc);
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_i32()).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn test_leftover_cells_and_sort() {
        let row = |id: i32, name: &str, remaining: i32| LeftoverReportRow {
            id: ProductId::new(id),
            name: name.to_string(),
            max_quantity: 10,
            remaining_stock: remaining,
            base_price: Decimal::new(125, 2),
            description: String::new(),
        };
        let mut rows = vec![row(1, "kale", 2), row(2, "Beet", 7)];
        assert_eq!(rows[0].cells(), ["kale", "10", "2", "1.25"]);

        sort_rows(&mut rows, LeftoverColumn::Name, SortDirection::Asc);
        assert_eq!(rows[0].name, "Beet");
        sort_rows(&mut rows, LeftoverColumn::RemainingStock, SortDirection::Asc);
        assert_eq!(rows[0].name, "kale");
    }

    #[test]
    fn test_column_names() {
        let column: PreorderColumn = serde_json::from_str("\"order_date\"").unwrap();
        assert_eq!(column, PreorderColumn::OrderDate);
        let column: LeftoverColumn = serde_json::from_str("\"remaining_stock\"").unwrap();
        assert_eq!(column, LeftoverColumn::RemainingStock);
    }
}
