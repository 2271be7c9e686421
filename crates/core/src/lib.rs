//! Farmstand Core - Shared types and pricing rules.
//!
//! This crate provides what every Farmstand component agrees on:
//! - `storefront` - Customer and admin JSON API
//! - `mailer` - Report email relay
//! - `cli` - Migrations and account management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Database encoding for the ID types is
//! available behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, roles and report kinds
//! - [`catalog`] - Product display names
//! - [`pricing`] - Evening discount schedule
//! - [`stock`] - Preorder quantity limits
//! - [`sorting`] - Column sorting for admin tables and reports

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod pricing;
pub mod sorting;
pub mod stock;
pub mod types;

pub use catalog::display_name;
pub use pricing::dynamic_price;
pub use sorting::{SortDirection, Sortable, sort_rows};
pub use stock::{StockError, check_preorder_quantity, selectable_limit};
pub use types::*;
