//! Core types for Farmstand.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod report;
pub mod role;

pub use email::{Email, EmailError};
pub use id::*;
pub use report::{ReportEmail, ReportKind};
pub use role::Role;
