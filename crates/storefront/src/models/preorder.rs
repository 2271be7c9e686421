//! Preorders placed by customers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use farmstand_core::{PreorderId, ProductId, ProfileId};

/// A stored preorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preorder {
    pub id: PreorderId,
    pub product_id: ProductId,
    pub user_id: ProfileId,
    pub quantity: i32,
    pub order_date: DateTime<Utc>,
}

/// Customer request to preorder a product.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPreorder {
    pub product_id: ProductId,
    /// Defaults to one unit.
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

const fn default_quantity() -> i32 {
    1
}

/// One line of a customer's order history.
#[derive(Debug, Clone, Serialize)]
pub struct PreorderHistoryEntry {
    pub id: PreorderId,
    pub quantity: i32,
    pub order_date: DateTime<Utc>,
    pub product_name: String,
    pub base_price: Decimal,
}
