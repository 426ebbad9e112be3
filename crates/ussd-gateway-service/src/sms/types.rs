//! SMS provider API types.

use serde::{Deserialize, Serialize};

/// Status value the provider returns for an accepted message.
pub const STATUS_SUCCESS: &str = "success";

/// Quick-send request body.
///
/// Sent as JSON with `recipient` as an array. The provider also accepts the
/// form-encoded shape with repeated `recipient[]` keys; this client does not use it.
#[derive(Debug, Clone, Serialize)]
pub struct QuickSmsRequest {
    /// Recipient phone numbers.
    pub recipient: Vec<String>,
    /// Sender name.
    pub sender: String,
    /// Message text.
    pub message: String,
    /// Whether the message is scheduled for later delivery.
    pub is_schedule: bool,
    /// Schedule date, empty for immediate delivery.
    pub schedule_date: String,
}

impl QuickSmsRequest {
    /// An immediate message to a single recipient.
    #[must_use]
    pub fn immediate(phone_number: &str, sender: &str, message: &str) -> Self {
        Self {
            recipient: vec![phone_number.to_string()],
            sender: sender.to_string(),
            message: message.to_string(),
            is_schedule: false,
            schedule_date: String::new(),
        }
    }
}

/// Quick-send response body.
#[derive(Debug, Clone, Deserialize)]
pub struct QuickSmsResponse {
    /// `"success"` when the message was accepted.
    pub status: String,
    /// Provider result code.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable result.
    #[serde(default)]
    pub message: Option<String>,
}

impl QuickSmsResponse {
    /// Whether the provider accepted the message.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}
