//! Daily reports: JSON rows, printable document, and email.

use askama::Template;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use chrono::{Local, NaiveDate};
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use farmstand_core::{ReportEmail, ReportKind, SortDirection, sort_rows};

use crate::db::ReportRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{LeftoverColumn, LeftoverReportRow, PreorderColumn, PreorderReportRow};
use crate::routes::today;
use crate::state::AppState;

/// `?date=YYYY-MM-DD&sort=<column>&dir=<asc|desc>`.
///
/// `sort` is kept as text because valid columns depend on the report kind.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub date: Option<NaiveDate>,
    pub sort: Option<String>,
    pub dir: Option<SortDirection>,
}

/// Rows of one report kind.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReportRows {
    Preorders(Vec<PreorderReportRow>),
    Leftover(Vec<LeftoverReportRow>),
}

impl ReportRows {
    fn headers(&self) -> &'static [&'static str] {
        match self {
            Self::Preorders(_) => &PreorderReportRow::HEADERS,
            Self::Leftover(_) => &LeftoverReportRow::HEADERS,
        }
    }

    fn cells(&self) -> Vec<Vec<String>> {
        match self {
            Self::Preorders(rows) => rows.iter().map(PreorderReportRow::cells).collect(),
            Self::Leftover(rows) => rows.iter().map(LeftoverReportRow::cells).collect(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Preorders(rows) => rows.len(),
            Self::Leftover(rows) => rows.len(),
        }
    }

    /// One JSON value per row, for the mailer.
    fn to_values(&self) -> Result<Vec<Value>> {
        let values: std::result::Result<Vec<Value>, serde_json::Error> = match self {
            Self::Preorders(rows) => rows.iter().map(serde_json::to_value).collect(),
            Self::Leftover(rows) => rows.iter().map(serde_json::to_value).collect(),
        };
        values.map_err(|e| AppError::Internal(format!("report serialization failed: {e}")))
    }
}

/// A generated report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub kind: ReportKind,
    pub title: &'static str,
    pub date: NaiveDate,
    pub rows: ReportRows,
}

/// Printable report table.
#[derive(Template)]
#[template(path = "report_document.html")]
pub struct ReportDocumentTemplate<'a> {
    pub title: &'a str,
    pub date: String,
    pub generated_at: String,
    pub headers: &'a [&'a str],
    pub rows: Vec<Vec<String>>,
}

/// Parse a column name for the given report's column enum.
fn parse_column<C: DeserializeOwned + Default>(sort: Option<&str>) -> Result<C> {
    sort.map_or_else(
        || Ok(C::default()),
        |name| {
            C::deserialize(name.into_deserializer()).map_err(|_: serde::de::value::Error| {
                AppError::BadRequest(format!("Unknown sort column: {name}"))
            })
        },
    )
}

/// Parse the `{kind}` path segment.
fn parse_kind(kind: &str) -> Result<ReportKind> {
    kind.parse().map_err(AppError::NotFound)
}

/// Load and sort a report.
async fn build_report(state: &AppState, kind: ReportKind, query: &ReportQuery) -> Result<Report> {
    let date = query.date.unwrap_or_else(today);
    let direction = query.dir.unwrap_or_default();
    let repo = ReportRepository::new(state.pool());

    let rows = match kind {
        ReportKind::Preorders => {
            let column: PreorderColumn = parse_column(query.sort.as_deref())?;
            let mut rows = repo.completed_preorders(date).await?;
            sort_rows(&mut rows, column, direction);
            ReportRows::Preorders(rows)
        }
        ReportKind::Leftover => {
            let column: LeftoverColumn = parse_column(query.sort.as_deref())?;
            let mut rows = repo.leftover_stock(date).await?;
            sort_rows(&mut rows, column, direction);
            ReportRows::Leftover(rows)
        }
    };

    Ok(Report {
        kind,
        title: kind.title(),
        date,
        rows,
    })
}

/// Render the printable document for a report.
///
/// # Errors
///
/// Returns `AppError::Template` if rendering fails.
pub fn render_document(report: &Report) -> Result<String> {
    let template = ReportDocumentTemplate {
        title: report.title,
        date: report.date.format("%Y-%m-%d").to_string(),
        generated_at: Local::now().format("%Y-%m-%d %H:%M").to_string(),
        headers: report.rows.headers(),
        rows: report.rows.cells(),
    };
    Ok(template.render()?)
}

/// Report rows as JSON.
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(kind): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Report>> {
    let kind = parse_kind(&kind)?;
    Ok(Json(build_report(&state, kind, &query).await?))
}

/// Report as a downloadable HTML document.
#[instrument(skip_all, fields(admin = %admin.username, kind = %kind))]
pub async fn document(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(kind): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let report = build_report(&state, kind, &query).await?;
    let html = render_document(&report)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.html\"", kind.file_stem()),
            ),
        ],
        html,
    ))
}

/// Send a report to the configured recipient through the mailer.
#[instrument(skip_all, fields(admin = %admin.username, kind = %kind))]
pub async fn email(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(kind): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Value>> {
    let kind = parse_kind(&kind)?;
    let report = build_report(&state, kind, &query).await?;

    let email = ReportEmail::new(kind, report.date.to_string(), report.rows.to_values()?);
    state.mailer().send_report(&email).await?;

    Ok(Json(json!({
        "message": "Email sent!",
        "rows": report.rows.len(),
    })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use farmstand_core::{PreorderId, ProductId};

    use super::*;

    fn preorder_report() -> Report {
        Report {
            kind: ReportKind::Preorders,
            title: ReportKind::Preorders.title(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            rows: ReportRows::Preorders(vec![PreorderReportRow {
                id: PreorderId::new(9),
                username: Some("<sam>".to_string()),
                product: "Tomato Roma".to_string(),
                quantity: 2,
                base_price: Decimal::new(350, 2),
                total: Decimal::new(700, 2),
                order_date: Utc.with_ymd_and_hms(2025, 3, 14, 10, 0, 0).unwrap(),
            }]),
        }
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("leftover").unwrap(), ReportKind::Leftover);
        assert!(matches!(parse_kind("sales"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_parse_column() {
        assert_eq!(parse_column::<PreorderColumn>(None).unwrap(), PreorderColumn::Id);
        assert_eq!(
            parse_column::<LeftoverColumn>(Some("remaining_stock")).unwrap(),
            LeftoverColumn::RemainingStock
        );
        assert!(matches!(
            parse_column::<LeftoverColumn>(Some("username")),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_document_lists_headers_and_escapes_cells() {
        let html = render_document(&preorder_report()).unwrap();
        assert!(html.contains("Completed Preorders Report"));
        assert!(html.contains("2025-03-14"));
        assert!(html.contains("<th>Order ID</th>"));
        assert!(html.contains("7.00"));
        assert!(html.contains("&lt;sam&gt;"));
        assert!(!html.contains("<sam>"));
    }

    #[test]
    fn test_empty_document_says_so() {
        let report = Report {
            kind: ReportKind::Leftover,
            title: ReportKind::Leftover.title(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            rows: ReportRows::Leftover(Vec::new()),
        };
        let html = render_document(&report).unwrap();
        assert!(html.contains("<th>Remaining Stock</th>"));
        assert!(html.contains("No rows for this date."));
    }

    #[test]
    fn test_rows_serialize_for_mailer() {
        let values = preorder_report().rows.to_values().unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0]["product"], "Tomato Roma");
        assert_eq!(values[0]["total"], "7.00");
    }

    #[test]
    fn test_leftover_rows_serialize() {
        let rows = ReportRows::Leftover(vec![LeftoverReportRow {
            id: ProductId::new(1),
            name: "Kale".to_string(),
            max_quantity: 10,
            remaining_stock: 4,
            base_price: Decimal::new(200, 2),
            description: String::new(),
        }]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.cells()[0], ["Kale", "10", "4", "2.00"]);
    }
}
