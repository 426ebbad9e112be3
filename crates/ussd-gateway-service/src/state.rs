//! Application state.

use std::sync::Arc;

use ussd_gateway_store::Store;

use crate::config::ServiceConfig;
use crate::sms::{SmsClient, SmsNotifier};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<dyn Store>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// SMS notifier for callback notices (optional).
    pub sms: Option<Arc<dyn SmsNotifier>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        // Create SMS client if configured
        let sms = config.sms_api_key.as_ref().and_then(|key| {
            match SmsClient::new(&config.sms_api_url, key, &config.sms_sender) {
                Ok(client) => {
                    tracing::info!(sms_url = %config.sms_api_url, "SMS notifications enabled");
                    Some(Arc::new(client) as Arc<dyn SmsNotifier>)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create SMS client");
                    None
                }
            }
        });

        if sms.is_none() {
            tracing::warn!("SMS not configured - callback notices will not be sent");
        }

        Self { store, config, sms }
    }

    /// Replace the SMS notifier.
    #[must_use]
    pub fn with_sms_notifier(mut self, notifier: Arc<dyn SmsNotifier>) -> Self {
        self.sms = Some(notifier);
        self
    }

    /// Check if SMS notifications are configured.
    #[must_use]
    pub fn has_sms(&self) -> bool {
        self.sms.is_some()
    }
}
