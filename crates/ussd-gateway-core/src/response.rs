//! The aggregator's response grammar.
//!
//! A reply is plain text starting with `CON` (keep the session open and wait for more
//! input) or `END` (show the text and close the session), followed by one space and
//! the text shown on the handset.

use std::fmt;

use crate::account::Account;
use crate::otp::Otp;

/// Start-of-session menu body.
pub const MAIN_MENU: &str =
    "What do you want to do?\n1. Get OTP\n2. Check Balance\n3. Request for a callback\n";

/// A reply to one aggregator callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UssdResponse {
    /// `CON`: show the body and wait for the next input.
    Continue(String),
    /// `END`: show the body and terminate the session.
    End(String),
}

impl UssdResponse {
    /// The three-option start menu.
    #[must_use]
    pub fn main_menu() -> Self {
        Self::Continue(MAIN_MENU.to_string())
    }

    /// A freshly issued one-time code.
    #[must_use]
    pub fn otp_issued(otp: &Otp) -> Self {
        Self::End(format!("Your OTP is {otp}"))
    }

    /// The caller's number is not registered.
    #[must_use]
    pub fn phone_not_linked(phone_number: &str) -> Self {
        Self::End(format!(
            "Your phone number '{phone_number}' is not linked to any account"
        ))
    }

    /// Ask for the client ID.
    #[must_use]
    pub fn client_id_prompt() -> Self {
        Self::Continue("Enter your Client ID".to_string())
    }

    /// The balance of an account owned by the caller.
    #[must_use]
    pub fn balance(account: &Account) -> Self {
        Self::End(format!("Your balance is GHS {}", account.balance_display()))
    }

    /// Unknown client ID, or one that belongs to another phone number.
    #[must_use]
    pub fn invalid_client_id(client_id: &str) -> Self {
        Self::End(format!("Invalid ID '{client_id}'"))
    }

    /// The callback request was logged and an SMS is on its way.
    #[must_use]
    pub fn sms_notice_scheduled() -> Self {
        Self::End("You will receive an SMS notice".to_string())
    }

    /// The callback request hit an unexpected failure.
    #[must_use]
    pub fn callback_fallback() -> Self {
        Self::End("You will get a callback".to_string())
    }

    /// Generic failure.
    #[must_use]
    pub fn fatal_error() -> Self {
        Self::End("Fatal error occurred".to_string())
    }

    /// Input matched no menu branch.
    #[must_use]
    pub fn invalid_input() -> Self {
        Self::End("Invalid Input".to_string())
    }

    /// Whether the aggregator should keep the session open.
    #[must_use]
    pub const fn continues(&self) -> bool {
        matches!(self, Self::Continue(_))
    }

    /// The text shown on the handset, without the keyword.
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::Continue(body) | Self::End(body) => body,
        }
    }
}

impl fmt::Display for UssdResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue(body) => write!(f, "CON {body}"),
            Self::End(body) => write!(f, "END {body}"),
        }
    }
}
