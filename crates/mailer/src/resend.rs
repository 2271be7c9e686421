//! Resend transactional email API client.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::email::{EmailSender, OutgoingEmail, SendError};

/// Error body returned by Resend.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Resend API client.
#[derive(Debug, Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ResendClient {
    /// Create a client for the Resend API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value, the HTTP
    /// client fails to build, or the URL cannot be joined.
    pub fn new(api_key: &SecretString, base_url: &Url) -> Result<Self, SendError> {
        let mut headers = HeaderMap::new();

        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| SendError::Api {
                status: 0,
                message: format!("Invalid API key format: {e}"),
            })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        let endpoint = base_url.join("emails").map_err(|e| SendError::Api {
            status: 0,
            message: format!("Invalid API URL: {e}"),
        })?;

        Ok(Self { client, endpoint })
    }

    /// The URL messages are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, email: &OutgoingEmail) -> Result<serde_json::Value, SendError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(email)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map_or(text, |body| body.message);
            return Err(SendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let key = SecretString::from("re_Q7m2Kx9TbV4pLz8WcN3hR");
        let client = ResendClient::new(&key, &Url::parse("https://api.resend.com").unwrap()).unwrap();
        assert_eq!(client.endpoint().as_str(), "https://api.resend.com/emails");
    }

    #[test]
    fn test_key_with_newline_is_rejected() {
        let key = SecretString::from("re_abc\ndef");
        let result = ResendClient::new(&key, &Url::parse("https://api.resend.com").unwrap());
        assert!(matches!(result, Err(SendError::Api { status: 0, .. })));
    }
}
