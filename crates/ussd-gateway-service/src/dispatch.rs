//! Session dispatcher.
//!
//! Turns one normalized callback into the reply the aggregator shows on the handset.
//! Nothing is remembered between calls: the branch comes from `MenuState::classify`
//! on the cumulative text, and every store result is checked right where it is
//! produced and mapped to that branch's fallback reply.

use ussd_gateway_core::{MenuState, NewCallbackLog, Otp, UssdRequest, UssdResponse};
use ussd_gateway_store::{Store, StoreError};

/// Text of the SMS sent after a callback request is logged.
pub const CALLBACK_NOTICE_MESSAGE: &str = "The operation has completed successfully";

/// An SMS to send once the reply has been returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsNotice {
    /// Recipient, without any `+`.
    pub phone_number: String,
    /// Message text.
    pub message: String,
}

impl SmsNotice {
    /// The notice confirming a logged callback request.
    #[must_use]
    pub fn callback_logged(phone_number: &str) -> Self {
        Self {
            phone_number: phone_number.replace('+', ""),
            message: CALLBACK_NOTICE_MESSAGE.to_string(),
        }
    }
}

/// Outcome of dispatching one callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Reply for the aggregator.
    pub response: UssdResponse,
    /// Background notice to send, if the branch scheduled one.
    pub notice: Option<SmsNotice>,
}

impl From<UssdResponse> for Dispatch {
    fn from(response: UssdResponse) -> Self {
        Self {
            response,
            notice: None,
        }
    }
}

/// Dispatch one callback against the store.
#[must_use]
pub fn dispatch(store: &dyn Store, request: &UssdRequest) -> Dispatch {
    let state = MenuState::classify(&request.text);

    tracing::debug!(
        session_id = %request.session_id,
        branch = state.name(),
        "Dispatching USSD callback"
    );

    match state {
        MenuState::SessionStart => UssdResponse::main_menu().into(),
        MenuState::OtpRequest => issue_otp(store, request).into(),
        MenuState::BalancePrompt => UssdResponse::client_id_prompt().into(),
        MenuState::BalanceCheck { client_id } => check_balance(store, request, client_id).into(),
        MenuState::CallbackRequest => request_callback(store, request),
        MenuState::Invalid => UssdResponse::invalid_input().into(),
    }
}

fn issue_otp(store: &dyn Store, request: &UssdRequest) -> UssdResponse {
    let otp = Otp::generate();

    match store.set_otp(&request.phone_number, &otp) {
        Ok(true) => {
            tracing::info!(session_id = %request.session_id, "OTP issued");
            UssdResponse::otp_issued(&otp)
        }
        Ok(false) => UssdResponse::phone_not_linked(&request.phone_number),
        Err(e) => {
            tracing::error!(
                session_id = %request.session_id,
                branch = "otp_request",
                error = %e,
                "Failed to store OTP"
            );
            UssdResponse::fatal_error()
        }
    }
}

fn check_balance(store: &dyn Store, request: &UssdRequest, client_id: &str) -> UssdResponse {
    match store.find_account_by_client_id(client_id) {
        // Unknown and foreign client IDs get the same reply
        Ok(Some(account)) if account.owned_by(&request.phone_number) => {
            UssdResponse::balance(&account)
        }
        Ok(_) => UssdResponse::invalid_client_id(client_id),
        Err(e) => {
            tracing::error!(
                session_id = %request.session_id,
                branch = "balance_check",
                error = %e,
                "Failed to look up account"
            );
            UssdResponse::fatal_error()
        }
    }
}

fn request_callback(store: &dyn Store, request: &UssdRequest) -> Dispatch {
    match store.append_callback_log(&NewCallbackLog::from(request)) {
        Ok(log) => {
            tracing::info!(
                session_id = %request.session_id,
                log_id = %log.id,
                "Callback request logged"
            );
            Dispatch {
                response: UssdResponse::sms_notice_scheduled(),
                notice: Some(SmsNotice::callback_logged(&request.phone_number)),
            }
        }
        Err(e @ StoreError::NotPersisted { .. }) => {
            tracing::error!(
                session_id = %request.session_id,
                branch = "callback_request",
                error = %e,
                "Callback log was not persisted"
            );
            UssdResponse::fatal_error().into()
        }
        Err(e) => {
            tracing::error!(
                session_id = %request.session_id,
                branch = "callback_request",
                error = %e,
                "Failed to log callback request"
            );
            UssdResponse::callback_fallback().into()
        }
    }
}
