//! Error types for the USSD gateway domain.

/// Errors produced while decoding an aggregator callback body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// A required form field was absent. Holds the wire name of the field.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Errors produced while validating account input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    /// A required text field was empty or whitespace.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Errors produced while parsing a one-time code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OtpError {
    /// The code was not exactly four ASCII digits.
    #[error("OTP must be exactly {expected} digits, got {value:?}")]
    InvalidFormat {
        /// Required number of digits.
        expected: usize,
        /// The rejected input.
        value: String,
    },
}
