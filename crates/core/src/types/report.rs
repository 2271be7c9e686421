//! Report kinds shared by the storefront and the mailer.

use serde::{Deserialize, Serialize};

/// The two reports an admin can generate for a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Preorders placed on the report date.
    Preorders,
    /// Products for the report date that still have stock left.
    Leftover,
}

impl ReportKind {
    /// Human-readable title, e.g. "Completed Preorders".
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Preorders => "Completed Preorders",
            Self::Leftover => "Leftover Stock",
        }
    }

    /// File name (without extension) used for downloadable exports.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Preorders => "Completed_Preorders_Report",
            Self::Leftover => "Leftover_Stock_Report",
        }
    }

    /// Wire name, as used in URLs and in the mailer payload.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preorders => "preorders",
            Self::Leftover => "leftover",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preorders" => Ok(Self::Preorders),
            "leftover" => Ok(Self::Leftover),
            _ => Err(format!("unknown report type: {s}")),
        }
    }
}

/// Body of a report email request, as accepted by the mailer's
/// `POST /send-email`.
///
/// Each entry of `data` is one report row; the mailer renders it as compact
/// JSON, so any serializable row shape works.
///
/// `report_type` is free-form on the wire: the storefront sends a
/// [`ReportKind`] wire name, but the mailer accepts any text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEmail {
    pub report_type: String,
    /// Report date as shown to the recipient (`YYYY-MM-DD`).
    pub report_date: String,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

impl ReportEmail {
    /// Build the request for a report of `kind`.
    #[must_use]
    pub fn new(kind: ReportKind, report_date: String, data: Vec<serde_json::Value>) -> Self {
        Self {
            report_type: kind.as_str().to_owned(),
            report_date,
            data,
        }
    }

    /// Heading title: "Completed Preorders" for `preorders`, otherwise
    /// "Leftover Stock".
    #[must_use]
    pub fn title(&self) -> &'static str {
        if self.report_type == ReportKind::Preorders.as_str() {
            ReportKind::Preorders.title()
        } else {
            ReportKind::Leftover.title()
        }
    }

    /// Subject line, e.g. `Report: preorders - 2025-03-14`.
    #[must_use]
    pub fn subject(&self) -> String {
        format!("Report: {} - {}", self.report_type, self.report_date)
    }
}
