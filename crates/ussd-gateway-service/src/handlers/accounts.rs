//! Account management handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ussd_gateway_core::{Account, NewAccount};
use ussd_gateway_store::StoreError;

use crate::error::{conflict_message, ApiError};
use crate::state::AppState;

/// Account response.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: u64,
    /// Holder's name.
    pub name: String,
    /// Externally issued client ID.
    pub client_id: String,
    /// Registered phone number.
    pub phone_number: String,
    /// Last issued one-time code.
    pub otp: Option<String>,
    /// Current balance.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    /// Created timestamp.
    pub created_at: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.value(),
            name: account.name.clone(),
            client_id: account.client_id.clone(),
            phone_number: account.phone_number.clone(),
            otp: account.otp.as_ref().map(|otp| otp.as_str().to_string()),
            balance: account.balance,
            created_at: account.created_at.to_rfc3339(),
        }
    }
}

/// Response carrying one account.
#[derive(Debug, Serialize)]
pub struct AccountEnvelope {
    /// Outcome message.
    pub message: String,
    /// The account.
    pub account: AccountResponse,
}

/// Response carrying only a message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Outcome message.
    pub message: String,
}

/// Create account request.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Holder's name.
    pub name: String,
    /// Externally issued client ID.
    pub client_id: String,
    /// Phone number, in the form the aggregator reports it.
    pub phone_number: String,
    /// Opening balance (default: 0).
    #[serde(default, with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl From<CreateAccountRequest> for NewAccount {
    fn from(body: CreateAccountRequest) -> Self {
        Self {
            name: body.name,
            client_id: body.client_id,
            phone_number: body.phone_number,
            balance: body.balance,
        }
    }
}

/// Create a new account.
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountEnvelope>), ApiError> {
    let input = NewAccount::from(body);
    input
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // Report every taken field, not just the first
    let mut taken = Vec::new();
    if state
        .store
        .find_account_by_client_id(&input.client_id)?
        .is_some()
    {
        taken.push("client_id");
    }
    if state
        .store
        .find_account_by_phone(&input.phone_number)?
        .is_some()
    {
        taken.push("phone_number");
    }
    if !taken.is_empty() {
        return Err(ApiError::Conflict(conflict_message(&taken)));
    }

    // The store re-checks uniqueness under its write lock
    let account = match state.store.insert_account(&input) {
        Ok(account) => account,
        Err(StoreError::NotPersisted { entity }) => {
            tracing::error!(entity, "Account insert was not persisted");
            return Err(ApiError::BadRequest("Failed to add new user".into()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(account_id = %account.id, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(AccountEnvelope {
            message: "Account added successfully".into(),
            account: AccountResponse::from(&account),
        }),
    ))
}

/// Get an account by client ID.
pub async fn get_account_by_client_id(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
) -> Result<Json<AccountEnvelope>, ApiError> {
    let account = state
        .store
        .find_account_by_client_id(&client_id)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Account with Client ID `{client_id}` not found"))
        })?;

    Ok(Json(AccountEnvelope {
        message: "Account retrieved successfully".into(),
        account: AccountResponse::from(&account),
    }))
}

/// Get an account by phone number.
pub async fn get_account_by_phone(
    State(state): State<Arc<AppState>>,
    Path(phone_number): Path<String>,
) -> Result<Json<AccountEnvelope>, ApiError> {
    let account = state
        .store
        .find_account_by_phone(&phone_number)?
        .ok_or_else(|| phone_not_found(&phone_number))?;

    Ok(Json(AccountEnvelope {
        message: "Account retrieved successfully".into(),
        account: AccountResponse::from(&account),
    }))
}

/// Delete an account by phone number.
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(phone_number): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store.delete_account_by_phone(&phone_number)? {
        return Err(phone_not_found(&phone_number));
    }

    tracing::info!(phone_number = %phone_number, "Account deleted");

    Ok(Json(MessageResponse {
        message: "Account deleted successfully".into(),
    }))
}

fn phone_not_found(phone_number: &str) -> ApiError {
    ApiError::NotFound(format!(
        "Account with Phone Number `{phone_number}` not found"
    ))
}
