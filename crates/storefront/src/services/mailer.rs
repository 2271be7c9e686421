//! Client for the report mailer service.
//!
//! The mailer owns the transactional email credentials; the storefront only
//! posts report rows to its `POST /send-email` endpoint.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use farmstand_core::ReportEmail;

/// Errors that can occur when talking to the mailer.
#[derive(Debug, Error)]
pub enum MailerError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Mailer answered with a failure.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Configured base URL cannot be joined with the endpoint path.
    #[error("Invalid mailer URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Response body of the mailer's `POST /send-email`.
#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    success: bool,
    #[serde(default)]
    message: String,
}

/// HTTP client for the report mailer.
#[derive(Debug, Clone)]
pub struct MailerClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl MailerClient {
    /// Create a client for the mailer at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build or the URL is unusable.
    pub fn new(base_url: &Url) -> Result<Self, MailerError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("send-email")?;

        Ok(Self { client, endpoint })
    }

    /// The full URL reports are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Ask the mailer to send a report email.
    ///
    /// # Errors
    ///
    /// Returns `MailerError::Api` when the mailer reports failure, and
    /// `MailerError::Http` when it cannot be reached.
    pub async fn send_report(&self, email: &ReportEmail) -> Result<(), MailerError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(email)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        match serde_json::from_str::<SendEmailResponse>(&text) {
            Ok(body) if status.is_success() && body.success => {
                tracing::info!(
                    report_type = %email.report_type,
                    report_date = %email.report_date,
                    rows = email.data.len(),
                    "Report email sent"
                );
                Ok(())
            }
            Ok(body) => Err(MailerError::Api {
                status: status.as_u16(),
                message: body.message,
            }),
            Err(_) => Err(MailerError::Api {
                status: status.as_u16(),
                message: text,
            }),
        }
    }
}
