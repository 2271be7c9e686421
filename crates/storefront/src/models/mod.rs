//! Domain models for the storefront.
//!
//! These are validated domain types, separate from the database row types
//! in [`crate::db`].

pub mod preorder;
pub mod product;
pub mod profile;
pub mod report;
pub mod settings;

pub use preorder::{NewPreorder, Preorder, PreorderHistoryEntry};
pub use product::{Product, ProductColumn, ProductInput, ProductListing};
pub use profile::{NewProfile, Profile};
pub use report::{LeftoverColumn, LeftoverReportRow, PreorderColumn, PreorderReportRow};
pub use settings::{PreorderWindow, WindowError};
