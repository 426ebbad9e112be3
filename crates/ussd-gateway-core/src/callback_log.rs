//! Callback log records.
//!
//! Every "request a callback" menu selection is appended to an audit log. Records are
//! never updated or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::CallbackLogId;
use crate::request::UssdRequest;

/// A callback log entry before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCallbackLog {
    /// Aggregator session identifier.
    pub session_id: String,
    /// The USSD code dialled.
    pub service_code: String,
    /// Caller's phone number.
    pub phone_number: String,
    /// Menu input at the time of the request.
    pub text: String,
    /// Mobile network code.
    pub network_code: String,
}

impl From<&UssdRequest> for NewCallbackLog {
    fn from(request: &UssdRequest) -> Self {
        Self {
            session_id: request.session_id.clone(),
            service_code: request.service_code.clone(),
            phone_number: request.phone_number.clone(),
            text: request.text.clone(),
            network_code: request.network_code.clone(),
        }
    }
}

/// A persisted callback log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackLog {
    /// Store-assigned identifier.
    pub id: CallbackLogId,
    /// Aggregator session identifier.
    pub session_id: String,
    /// The USSD code dialled.
    pub service_code: String,
    /// Caller's phone number.
    pub phone_number: String,
    /// Menu input at the time of the request.
    pub text: String,
    /// Mobile network code.
    pub network_code: String,
    /// When the entry was appended.
    pub logged_at: DateTime<Utc>,
}

impl CallbackLog {
    /// Attach an id and timestamp to a new entry.
    #[must_use]
    pub fn new(id: CallbackLogId, entry: NewCallbackLog) -> Self {
        Self {
            id,
            session_id: entry.session_id,
            service_code: entry.service_code,
            phone_number: entry.phone_number,
            text: entry.text,
            network_code: entry.network_code,
            logged_at: Utc::now(),
        }
    }
}
