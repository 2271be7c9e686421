//! Column sorting for admin tables and reports.
//!
//! Text columns compare case-insensitively. Sorting is stable, so rows that
//! compare equal keep their query order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Sort direction for a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Orient an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Rows that can be ordered by one of their columns.
pub trait Sortable {
    /// Column selector, usually a fieldless enum.
    type Column: Copy;

    /// Ascending comparison of `self` and `other` on `column`.
    fn compare_by(&self, other: &Self, column: Self::Column) -> Ordering;
}

/// Case-insensitive text comparison.
#[must_use]
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Sort `rows` in place on `column`.
pub fn sort_rows<T: Sortable>(rows: &mut [T], column: T::Column, direction: SortDirection) {
    rows.sort_by(|a, b| direction.apply(a.compare_by(b, column)));
}
