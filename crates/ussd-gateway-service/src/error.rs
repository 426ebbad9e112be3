//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use ussd_gateway_store::StoreError;

/// Message returned for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error type for the account-management surface.
///
/// The USSD callback route never produces one of these: it always answers with the
/// `CON`/`END` text grammar.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input or a write the store did not keep.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - a unique field is already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// Display label of a unique account field.
#[must_use]
pub fn field_label(field: &str) -> &str {
    match field {
        "client_id" => "Client ID",
        "phone_number" => "Phone Number",
        other => other,
    }
}

/// Conflict message naming every taken field, e.g. `"Client ID, Phone Number already exist(s)"`.
#[must_use]
pub fn conflict_message(fields: &[&str]) -> String {
    let labels: Vec<_> = fields.iter().map(|field| field_label(field)).collect();
    format!("{} already exist(s)", labels.join(", "))
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => Self::Conflict(conflict_message(&[field])),
            StoreError::NotPersisted { entity } => {
                Self::Internal(format!("{entity} was not persisted"))
            }
            StoreError::Database(msg) | StoreError::Serialization(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_message_lists_fields_in_order() {
        assert_eq!(conflict_message(&["client_id"]), "Client ID already exist(s)");
        assert_eq!(
            conflict_message(&["client_id", "phone_number"]),
            "Client ID, Phone Number already exist(s)"
        );
    }

    #[test]
    fn duplicate_maps_to_conflict() {
        let err = ApiError::from(StoreError::Duplicate {
            field: "phone_number",
        });
        assert!(matches!(err, ApiError::Conflict(ref m) if m == "Phone Number already exist(s)"));
    }

    #[test]
    fn database_error_is_internal_and_hidden() {
        let response = ApiError::from(StoreError::Database("disk on fire".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
