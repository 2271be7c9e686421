//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! # Customer API
//! GET  /api/products/today             - Today's products with current price
//! POST /api/preorders                  - Place a preorder
//! GET  /api/preorders                  - Caller's preorder history
//! GET  /api/profile                    - Caller's profile
//! POST /api/profile                    - Create caller's profile (first login)
//!
//! # Admin API (role `admin`)
//! GET    /api/admin/products                  - Product table (sortable)
//! POST   /api/admin/products                  - Create product
//! PUT    /api/admin/products/{id}             - Update product
//! DELETE /api/admin/products/{id}             - Delete product and its preorders
//! POST   /api/admin/products/{id}/toggle      - Enable/disable product
//! GET    /api/admin/settings                  - Preorder window
//! PUT    /api/admin/settings                  - Update preorder window
//! GET    /api/admin/users                     - Profiles
//! POST   /api/admin/users/{id}/promote        - Grant admin role
//! GET    /api/admin/reports/{kind}            - Report rows (JSON)
//! GET    /api/admin/reports/{kind}/document   - Printable report (HTML download)
//! POST   /api/admin/reports/{kind}/email      - Email report via the mailer
//! ```

pub mod admin;
pub mod preorders;
pub mod products;
pub mod profile;

use axum::{Router, routing::get};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use farmstand_core::SortDirection;

use crate::state::AppState;

/// `?sort=<column>&dir=<asc|desc>` for sortable tables.
///
/// Unknown columns fail deserialization, which axum answers with 400.
#[derive(Debug, Deserialize)]
pub struct SortQuery<C> {
    pub sort: Option<C>,
    pub dir: Option<SortDirection>,
}

impl<C: Default> SortQuery<C> {
    /// Requested column and direction, with defaults applied.
    pub fn resolve(self) -> (C, SortDirection) {
        (self.sort.unwrap_or_default(), self.dir.unwrap_or_default())
    }
}

/// Current calendar date in the server's time zone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Create the customer API router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/products/today", get(products::today))
        .route(
            "/preorders",
            get(preorders::history).post(preorders::create),
        )
        .route("/profile", get(profile::show).post(profile::create))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", customer_routes())
        .nest("/api/admin", admin::routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::extract::Query;
    use axum::http::Uri;

    use super::*;
    use crate::models::ProductColumn;

    #[test]
    fn test_sort_query_defaults() {
        let uri: Uri = "/api/admin/products".parse().unwrap();
        let Query(query) = Query::<SortQuery<ProductColumn>>::try_from_uri(&uri).unwrap();
        assert_eq!(query.resolve(), (ProductColumn::Name, SortDirection::Asc));
    }

    #[test]
    fn test_sort_query_parses_column_and_direction() {
        let uri: Uri = "/api/admin/products?sort=base_price&dir=desc".parse().unwrap();
        let Query(query) = Query::<SortQuery<ProductColumn>>::try_from_uri(&uri).unwrap();
        assert_eq!(query.resolve(), (ProductColumn::BasePrice, SortDirection::Desc));
    }

    #[test]
    fn test_sort_query_rejects_unknown_column() {
        let uri: Uri = "/api/admin/products?sort=colour".parse().unwrap();
        assert!(Query::<SortQuery<ProductColumn>>::try_from_uri(&uri).is_err());
    }
}
