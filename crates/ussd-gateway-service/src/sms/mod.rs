//! Outbound SMS notifications.
//!
//! Notices are sent in the background after the USSD reply has gone out. The outcome
//! is only logged: nothing is retried and nothing waits on the result.

pub mod client;
pub mod types;

pub use client::{SmsClient, SmsError};
pub use types::*;

use async_trait::async_trait;

/// Delivers a single text message to one recipient.
#[async_trait]
pub trait SmsNotifier: Send + Sync {
    /// Send `message` to `phone_number`.
    async fn send(&self, phone_number: &str, message: &str) -> Result<(), SmsError>;
}

#[async_trait]
impl SmsNotifier for SmsClient {
    async fn send(&self, phone_number: &str, message: &str) -> Result<(), SmsError> {
        self.send_quick(phone_number, message).await.map(|_| ())
    }
}
