//! Product listings.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use farmstand_core::pricing::dynamic_price;
use farmstand_core::sorting::compare_text;
use farmstand_core::stock::available_stock;
use farmstand_core::{ProductId, Sortable, display_name, selectable_limit};

/// Default percentage shown for the hourly price drop of new products.
pub const DEFAULT_HOURLY_PRICE_DROP: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// A product offered for preorder on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    /// Stored display name (see [`display_name`]).
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub variety: String,
    pub quality: String,
    pub max_quantity: i32,
    /// `None` on rows that predate stock tracking; `max_quantity` applies.
    pub remaining_stock: Option<i32>,
    pub base_price: Decimal,
    pub hourly_price_drop: Decimal,
    pub unit: String,
    pub description: String,
    pub enabled: bool,
    pub available_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Stock left, counting an untracked row as fully stocked.
    #[must_use]
    pub fn available_stock(&self) -> i32 {
        available_stock(self.max_quantity, self.remaining_stock)
    }

    /// Largest quantity a customer may preorder right now.
    #[must_use]
    pub fn max_selectable(&self) -> i32 {
        selectable_limit(self.max_quantity, self.remaining_stock)
    }
}

/// What a customer sees for one of today's products.
#[derive(Debug, Clone, Serialize)]
pub struct ProductListing {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub variety: String,
    pub description: String,
    pub unit: String,
    pub max_quantity: i32,
    pub remaining_stock: Option<i32>,
    pub base_price: Decimal,
    /// Base price after the evening discount at the time of the request.
    pub current_price: Decimal,
    /// Upper bound for the quantity picker.
    pub max_selectable: i32,
}

impl ProductListing {
    /// Build a listing priced at local time `now`.
    #[must_use]
    pub fn priced_at(product: Product, now: NaiveDateTime) -> Self {
        let max_selectable = product.max_selectable();
        Self {
            id: product.id,
            current_price: dynamic_price(product.base_price, now),
            name: product.name,
            product_type: product.product_type,
            variety: product.variety,
            description: product.description,
            unit: product.unit,
            max_quantity: product.max_quantity,
            remaining_stock: product.remaining_stock,
            base_price: product.base_price,
            max_selectable,
        }
    }
}

/// Admin form for creating or editing a product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    #[serde(rename = "type")]
    pub product_type: String,
    #[serde(default)]
    pub variety: String,
    #[serde(default)]
    pub quality: String,
    pub max_quantity: i32,
    pub base_price: Decimal,
    #[serde(default)]
    pub hourly_price_drop: Option<Decimal>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to the current local date.
    #[serde(default)]
    pub available_date: Option<NaiveDate>,
}

impl ProductInput {
    /// Validate the form and return the stored display name.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message for the first invalid field.
    pub fn validate(&self) -> Result<String, String> {
        if self.product_type.trim().is_empty() {
            return Err("Type is required.".to_string());
        }
        if self.max_quantity < 0 {
            return Err("Max quantity cannot be negative.".to_string());
        }
        if self.base_price < Decimal::ZERO {
            return Err("Base price cannot be negative.".to_string());
        }
        if self
            .hourly_price_drop
            .is_some_and(|drop| drop < Decimal::ZERO || drop > Decimal::ONE_HUNDRED)
        {
            return Err("Hourly price drop must be between 0 and 100.".to_string());
        }
        Ok(display_name(&self.product_type, &self.variety, &self.quality))
    }

    /// Hourly price drop, falling back to the default for new products.
    #[must_use]
    pub fn hourly_price_drop(&self) -> Decimal {
        self.hourly_price_drop.unwrap_or(DEFAULT_HOURLY_PRICE_DROP)
    }
}

/// Sortable columns of the admin product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductColumn {
    #[default]
    Name,
    #[serde(rename = "type")]
    ProductType,
    MaxQuantity,
    RemainingStock,
    BasePrice,
    Enabled,
    AvailableDate,
}

impl Sortable for Product {
    type Column = ProductColumn;

    fn compare_by(&self, other: &Self, column: ProductColumn) -> Ordering {
        match column {
            ProductColumn::Name => compare_text(&self.name, &other.name),
            ProductColumn::ProductType => compare_text(&self.product_type, &other.product_type),
            ProductColumn::MaxQuantity => self.max_quantity.cmp(&other.max_quantity),
            ProductColumn::RemainingStock => self.available_stock().cmp(&other.available_stock()),
            ProductColumn::BasePrice => self.base_price.cmp(&other.base_price),
            ProductColumn::Enabled => self.enabled.cmp(&other.enabled),
            ProductColumn::AvailableDate => self.available_date.cmp(&other.available_date),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use chrono::TimeZone;

    use farmstand_core::{SortDirection, sort_rows};

    use super::*;

    pub(crate) fn product(id: i32, name: &str, base_cents: i64) -> Product {
        let created = Utc.with_ymd_and_hms(2025, 3, 14, 6, 0, 0).unwrap();
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            product_type: name.to_string(),
            variety: String::new(),
            quality: String::new(),
            max_quantity: 10,
            remaining_stock: Some(4),
            base_price: Decimal::new(base_cents, 2),
            hourly_price_drop: DEFAULT_HOURLY_PRICE_DROP,
            unit: "kg".to_string(),
            description: String::new(),
            enabled: true,
            available_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            created_at: created,
            updated_at: created,
        }
    }

    fn input(product_type: &str) -> ProductInput {
        ProductInput {
            product_type: product_type.to_string(),
            variety: "Roma".to_string(),
            quality: String::new(),
            max_quantity: 20,
            base_price: Decimal::new(450, 2),
            hourly_price_drop: None,
            unit: "kg".to_string(),
            description: String::new(),
            available_date: None,
        }
    }

    #[test]
    fn test_validate_computes_name() {
        assert_eq!(input("Tomato").validate().unwrap(), "Tomato Roma");
    }

    #[test]
    fn test_validate_requires_type() {
        assert_eq!(input("  ").validate().unwrap_err(), "Type is required.");
    }

    #[test]
    fn test_validate_rejects_negative_values() {
        let mut form = input("Tomato");
        form.base_price = Decimal::new(-1, 0);
        assert!(form.validate().is_err());

        let mut form = input("Tomato");
        form.max_quantity = -1;
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_hourly_drop_default() {
        assert_eq!(input("Tomato").hourly_price_drop(), Decimal::new(10, 0));
    }

    #[test]
    fn test_input_deserializes_type_field() {
        let form: ProductInput = serde_json::from_str(
            r#"{"type": "Kale", "max_quantity": 5, "base_price": "2.50"}"#,
        )
        .unwrap();
        assert_eq!(form.product_type, "Kale");
        assert_eq!(form.base_price, Decimal::new(250, 2));
        assert_eq!(form.validate().unwrap(), "Kale");
    }

    #[test]
    fn test_listing_is_priced_and_limited() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(20, 30, 0)
            .unwrap();
        let listing = ProductListing::priced_at(product(1, "Kale", 1000), now);
        assert_eq!(listing.current_price, Decimal::new(900, 2));
        assert_eq!(listing.max_selectable, 4);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let mut products = vec![
            product(1, "kale", 100),
            product(2, "Beet", 300),
            product(3, "apple", 200),
        ];
        sort_rows(&mut products, ProductColumn::Name, SortDirection::Asc);
        let ids: Vec<_> = products.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, [3, 2, 1]);

        sort_rows(&mut products, ProductColumn::BasePrice, SortDirection::Desc);
        let ids: Vec<_> = products.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn test_sort_by_stock_treats_untracked_as_full() {
        let mut untracked = product(1, "Kale", 100);
        untracked.max_quantity = 50;
        untracked.remaining_stock = None;
        let mut sold_out = product(2, "Beet", 100);
        sold_out.remaining_stock = Some(0);
        let mut products = vec![untracked, sold_out, product(3, "Leek", 100)];

        sort_rows(&mut products, ProductColumn::RemainingStock, SortDirection::Asc);
        let ids: Vec<_> = products.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn test_column_names() {
        let column: ProductColumn = serde_json::from_str("\"type\"").unwrap();
        assert_eq!(column, ProductColumn::ProductType);
        assert!(serde_json::from_str::<ProductColumn>("\"price\"").is_err());
    }
}
