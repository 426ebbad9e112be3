//! Menu state classification.
//!
//! The menu position is never stored. It is recovered on every callback from the
//! cumulative `text` the aggregator resends.

/// Menu inputs as they appear in the cumulative `text`.
pub mod inputs {
    /// Nothing typed yet.
    pub const START: &str = "";
    /// Option 1: issue a one-time code.
    pub const GET_OTP: &str = "1";
    /// Option 2: ask for the client ID.
    pub const CHECK_BALANCE_PROMPT: &str = "2";
    /// Option 2 followed by the client ID the user typed.
    pub const CHECK_BALANCE: &str = "2*";
    /// Option 3: request a callback.
    pub const REQUEST_CALLBACK: &str = "3";
}

/// The branch of the menu a callback belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState<'a> {
    /// First callback of a session.
    SessionStart,
    /// User picked "Get OTP".
    OtpRequest,
    /// User picked "Check Balance" and must now enter a client ID.
    BalancePrompt,
    /// User entered a client ID after picking "Check Balance".
    BalanceCheck {
        /// Everything after the `2*` prefix, verbatim.
        client_id: &'a str,
    },
    /// User picked "Request for a callback".
    CallbackRequest,
    /// Anything else.
    Invalid,
}

impl<'a> MenuState<'a> {
    /// Classify the cumulative input.
    ///
    /// Exact matches are tested before the `2*` prefix so that a bare `2` reaches the
    /// prompt rather than an empty balance lookup.
    #[must_use]
    pub fn classify(text: &'a str) -> Self {
        match text {
            inputs::START => Self::SessionStart,
            inputs::GET_OTP => Self::OtpRequest,
            inputs::CHECK_BALANCE_PROMPT => Self::BalancePrompt,
            inputs::REQUEST_CALLBACK => Self::CallbackRequest,
            _ => match text.strip_prefix(inputs::CHECK_BALANCE) {
                Some(client_id) => Self::BalanceCheck { client_id },
                None => Self::Invalid,
            },
        }
    }

    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SessionStart => "session_start",
            Self::OtpRequest => "otp_request",
            Self::BalancePrompt => "balance_prompt",
            Self::BalanceCheck { .. } => "balance_check",
            Self::CallbackRequest => "callback_request",
            Self::Invalid => "invalid",
        }
    }
}
