//! Service configuration.

use serde::Deserialize;
use std::path::Path;

/// Default SMS provider base URL.
pub const DEFAULT_SMS_API_URL: &str = "https://api.mnotify.com";

/// Default sender name shown on outgoing SMS.
pub const DEFAULT_SMS_SENDER: &str = "UniBase";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to `RocksDB` data directory (default: "data/ussd-gateway").
    pub data_dir: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// SMS provider base URL.
    pub sms_api_url: String,

    /// SMS provider API key (optional; notices are dropped without it).
    pub sms_api_key: Option<String>,

    /// Sender name for outgoing SMS.
    pub sms_sender: String,
}

/// SMS provider secrets file structure.
#[derive(Debug, Deserialize)]
struct SmsSecrets {
    api_key: String,
    #[serde(default)]
    api_url: Option<String>,
    #[serde(default)]
    sender: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let secrets = load_sms_secrets();

        let sms_api_url = std::env::var("SMS_API_URL")
            .ok()
            .or_else(|| secrets.as_ref().and_then(|s| s.api_url.clone()))
            .unwrap_or_else(|| DEFAULT_SMS_API_URL.into());
        let sms_sender = std::env::var("SMS_SENDER")
            .ok()
            .or_else(|| secrets.as_ref().and_then(|s| s.sender.clone()))
            .unwrap_or_else(|| DEFAULT_SMS_SENDER.into());
        let sms_api_key = secrets
            .map(|s| s.api_key)
            .or_else(|| std::env::var("SMS_API_KEY").ok())
            .filter(|key| !key.trim().is_empty());

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "data/ussd-gateway".into()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            sms_api_url,
            sms_api_key,
            sms_sender,
        }
    }
}

/// Load SMS provider secrets from the first secrets file found.
fn load_sms_secrets() -> Option<SmsSecrets> {
    let secret_paths = [
        ".secrets/mnotify.json",
        "ussd-gateway/.secrets/mnotify.json",
        "crates/ussd-gateway-service/.secrets/mnotify.json",
        "../.secrets/mnotify.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<SmsSecrets>(path) {
            tracing::info!(path = %path, "Loaded SMS secrets from file");
            return Some(secrets);
        }
    }

    tracing::debug!("SMS secrets file not found, using environment variables");
    None
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            data_dir: "data/ussd-gateway".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
            sms_api_url: DEFAULT_SMS_API_URL.into(),
            sms_api_key: None,
            sms_sender: DEFAULT_SMS_SENDER.into(),
        }
    }
}
