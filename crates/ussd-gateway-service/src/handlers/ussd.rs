//! USSD callback handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use ussd_gateway_core::{CallbackLog, UssdRequest, UssdResponse};

use crate::dispatch::{dispatch, SmsNotice};
use crate::error::ApiError;
use crate::state::AppState;

/// Handle one aggregator callback.
///
/// Always answers 200 with a `CON`/`END` plain-text body. A body missing a required
/// field gets `END Invalid Input`.
pub async fn ussd_callback(State(state): State<Arc<AppState>>, body: Bytes) -> String {
    let request = match UssdRequest::from_form(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed USSD callback");
            return UssdResponse::invalid_input().to_string();
        }
    };

    let outcome = dispatch(state.store.as_ref(), &request);

    if let Some(notice) = outcome.notice {
        spawn_notice(&state, notice, request.session_id.clone());
    }

    tracing::debug!(
        session_id = %request.session_id,
        continues = outcome.response.continues(),
        "USSD reply ready"
    );

    outcome.response.to_string()
}

/// Send a notice in the background. The result is only logged.
fn spawn_notice(state: &AppState, notice: SmsNotice, session_id: String) {
    let Some(sms) = state.sms.clone() else {
        tracing::warn!(session_id = %session_id, "SMS not configured - notice dropped");
        return;
    };

    tokio::spawn(async move {
        match sms.send(&notice.phone_number, &notice.message).await {
            Ok(()) => {
                tracing::info!(session_id = %session_id, "SMS notice sent");
            }
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Failed to send SMS notice");
            }
        }
    });
}

// ============================================================================
// Callback Log
// ============================================================================

/// Maximum page size for the callback log listing.
pub const MAX_CALLBACK_LOG_LIMIT: usize = 500;

/// Callback log list query parameters.
#[derive(Debug, Deserialize)]
pub struct ListCallbackLogsQuery {
    /// Maximum number of entries to return (default: 50).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Offset for pagination (default: 0).
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// Callback log entry response.
#[derive(Debug, Serialize)]
pub struct CallbackLogResponse {
    /// Log entry ID.
    pub id: u64,
    /// Aggregator session ID.
    pub session_id: String,
    /// Dialled service code.
    pub service_code: String,
    /// Caller's phone number.
    pub phone_number: String,
    /// Cumulative input at the time of the request.
    pub text: String,
    /// Caller's network code.
    pub network_code: String,
    /// Timestamp.
    pub logged_at: String,
}

impl From<&CallbackLog> for CallbackLogResponse {
    fn from(log: &CallbackLog) -> Self {
        Self {
            id: log.id.value(),
            session_id: log.session_id.clone(),
            service_code: log.service_code.clone(),
            phone_number: log.phone_number.clone(),
            text: log.text.clone(),
            network_code: log.network_code.clone(),
            logged_at: log.logged_at.to_rfc3339(),
        }
    }
}

/// List callback logs response.
#[derive(Debug, Serialize)]
pub struct ListCallbackLogsResponse {
    /// Entries (newest first).
    pub callback_logs: Vec<CallbackLogResponse>,
    /// Whether there are more entries.
    pub has_more: bool,
}

/// List the callback request audit log.
pub async fn list_callback_logs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCallbackLogsQuery>,
) -> Result<Json<ListCallbackLogsResponse>, ApiError> {
    // Fetch one more than requested to determine has_more
    let limit = query.limit.min(MAX_CALLBACK_LOG_LIMIT);
    let logs = state.store.list_callback_logs(limit + 1, query.offset)?;

    let has_more = logs.len() > limit;
    let callback_logs: Vec<_> = logs
        .iter()
        .take(limit)
        .map(CallbackLogResponse::from)
        .collect();

    Ok(Json(ListCallbackLogsResponse {
        callback_logs,
        has_more,
    }))
}
