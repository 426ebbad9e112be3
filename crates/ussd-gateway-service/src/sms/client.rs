//! SMS provider client implementation.

use reqwest::Client;
use std::fmt;
use std::time::Duration;

use super::types::{QuickSmsRequest, QuickSmsResponse};

/// Error type for SMS operations.
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("SMS API error: {status} - {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The provider answered 2xx but did not accept the message.
    #[error("SMS rejected: {status} - {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// The `status` field of the response.
        status: String,
        /// The `message` field of the response, if any.
        message: Option<String>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// SMS provider client.
#[derive(Clone)]
pub struct SmsClient {
    client: Client,
    base_url: String,
    api_key: String,
    sender: String,
}

impl fmt::Debug for SmsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("sender", &self.sender)
            .finish()
    }
}

impl SmsClient {
    /// Create a new SMS client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Provider API URL (e.g., `"https://api.mnotify.com"`)
    /// * `api_key` - Provider API key, sent as the `key` query parameter
    /// * `sender` - Sender name shown on the handset
    ///
    /// # Errors
    ///
    /// Returns `SmsError::Configuration` if the key or sender is empty or the HTTP
    /// client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        sender: impl Into<String>,
    ) -> Result<Self, SmsError> {
        let api_key = api_key.into();
        let sender = sender.into();

        if api_key.trim().is_empty() {
            return Err(SmsError::Configuration("API key is empty".into()));
        }
        if sender.trim().is_empty() {
            return Err(SmsError::Configuration("sender is empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SmsError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            sender,
        })
    }

    /// Send one message immediately.
    pub async fn send_quick(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<QuickSmsResponse, SmsError> {
        let url = format!("{}/api/sms/quick", self.base_url);
        let request = QuickSmsRequest::immediate(phone_number, &self.sender, message);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SmsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: QuickSmsResponse = response.json().await?;
        if !result.is_success() {
            return Err(SmsError::Rejected {
                status: result.status,
                message: result.message,
            });
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sms::SmsNotifier;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SmsClient {
        SmsClient::new(server.uri(), "test-key", "UniBase").unwrap()
    }

    #[tokio::test]
    async fn sends_quick_sms() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/sms/quick"))
            .and(query_param("key", "test-key"))
            .and(body_json(json!({
                "recipient": ["233241234567"],
                "sender": "UniBase",
                "message": "hello",
                "is_schedule": false,
                "schedule_date": ""
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "code": "2000",
                "message": "messages sent successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.send_quick("233241234567", "hello").await.unwrap();
        assert_eq!(result.code.as_deref(), Some("2000"));
    }

    #[tokio::test]
    async fn non_success_status_field_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/sms/quick"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "message": "insufficient balance"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.send("233241234567", "hello").await.unwrap_err();
        match err {
            SmsError::Rejected { status, message } => {
                assert_eq!(status, "error");
                assert_eq!(message.as_deref(), Some("insufficient balance"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn http_failure_is_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/sms/quick"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.send("233241234567", "hello").await.unwrap_err();
        assert!(matches!(err, SmsError::Api { status: 401, ref body } if body == "invalid key"));
    }

    #[test]
    fn empty_key_is_a_configuration_error() {
        let err = SmsClient::new("https://api.mnotify.com", "  ", "UniBase").unwrap_err();
        assert!(matches!(err, SmsError::Configuration(_)));
    }

    #[test]
    fn debug_redacts_key() {
        let client = SmsClient::new("https://api.mnotify.com/", "super-secret", "UniBase").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("https://api.mnotify.com\""));
    }
}
