//! Report email composition and the delivery seam.

use askama::Template;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use farmstand_core::{Email, ReportEmail};

/// HTML body of a report email.
#[derive(Template)]
#[template(path = "report_email.html")]
struct ReportEmailHtml<'a> {
    title: &'a str,
    date: &'a str,
    /// One compact JSON document per report row.
    items: Vec<String>,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum SendError {
    /// HTTP request to the email API failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Email API rejected the message.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// A report row could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A fully composed message, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: Email,
    pub to: Vec<Email>,
    pub subject: String,
    pub html: String,
}

/// Something that can deliver an [`OutgoingEmail`].
///
/// Returns the provider's response body, which is passed back to the caller.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver one message.
    ///
    /// # Errors
    ///
    /// Returns a [`SendError`] if the provider cannot be reached or refuses
    /// the message.
    async fn send(&self, email: &OutgoingEmail) -> Result<serde_json::Value, SendError>;
}

/// Compose the email for a report.
///
/// # Errors
///
/// Returns `SendError::Template` or `SendError::Serialization` if the body
/// cannot be produced.
pub fn compose_report(
    report: &ReportEmail,
    from: &Email,
    to: &Email,
) -> Result<OutgoingEmail, SendError> {
    let items = report
        .data
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;

    let html = ReportEmailHtml {
        title: report.title(),
        date: &report.report_date,
        items,
    }
    .render()?;

    Ok(OutgoingEmail {
        from: from.clone(),
        to: vec![to.clone()],
        subject: report.subject(),
        html,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmstand_core::ReportKind;
    use serde_json::json;

    use super::*;

    fn addresses() -> (Email, Email) {
        (
            Email::parse("reports@farm.example").unwrap(),
            Email::parse("owner@farm.example").unwrap(),
        )
    }

    #[test]
    fn test_compose_preorders_report() {
        let (from, to) = addresses();
        let report = ReportEmail {
            report_type: ReportKind::Preorders.as_str().to_string(),
            report_date: "2025-03-14".to_string(),
            data: vec![json!({"id": 1, "quantity": 2}), json!({"id": 2, "quantity": 1})],
        };

        let email = compose_report(&report, &from, &to).unwrap();
        assert_eq!(email.subject, "Report: preorders - 2025-03-14");
        assert_eq!(email.to, vec![to]);
        assert!(email.html.contains("<h2>Completed Preorders Report</h2>"));
        assert!(email.html.contains("<p>Date: 2025-03-14</p>"));
        assert_eq!(email.html.matches("<li>").count(), 2);
    }

    #[test]
    fn test_compose_leftover_report_escapes_rows() {
        let (from, to) = addresses();
        let report = ReportEmail {
            report_type: ReportKind::Leftover.as_str().to_string(),
            report_date: "2025-03-14".to_string(),
            data: vec![json!({"name": "<b>Kale</b>"})],
        };

        let email = compose_report(&report, &from, &to).unwrap();
        assert!(email.html.contains("<h2>Leftover Stock Report</h2>"));
        assert!(email.html.contains("&lt;b&gt;Kale&lt;/b&gt;"));
        assert!(!email.html.contains("<b>"));
    }

    #[test]
    fn test_compose_unrecognised_type_uses_leftover_heading() {
        let (from, to) = addresses();
        let report = ReportEmail {
            report_type: "Leftover".to_string(),
            report_date: "2025-03-14".to_string(),
            data: vec![json!({"a": 1})],
        };

        let email = compose_report(&report, &from, &to).unwrap();
        assert_eq!(email.subject, "Report: Leftover - 2025-03-14");
        assert!(email.html.contains("<h2>Leftover Stock Report</h2>"));
    }

    #[test]
    fn test_compose_empty_report() {
        let (from, to) = addresses();
        let report = ReportEmail {
            report_type: ReportKind::Leftover.as_str().to_string(),
            report_date: "2025-03-14".to_string(),
            data: Vec::new(),
        };
        let email = compose_report(&report, &from, &to).unwrap();
        assert!(!email.html.contains("<li>"));
    }
}
