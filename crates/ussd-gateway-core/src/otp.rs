//! One-time codes issued from the USSD menu.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::OtpError;

/// Number of digits in an issued code.
pub const OTP_LENGTH: usize = 4;

/// A four-digit numeric one-time code.
///
/// Codes have no expiry. Each issuance replaces the previous code on the account.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Otp(String);

impl Otp {
    /// Draw a fresh code. Every digit is uniform over `0`-`9`, so leading zeros occur.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let code = (0..OTP_LENGTH)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect();
        Self(code)
    }

    /// Parse a stored or user-supplied code.
    ///
    /// # Errors
    ///
    /// Returns `OtpError::InvalidFormat` unless the input is exactly four ASCII digits.
    pub fn parse(value: &str) -> Result<Self, OtpError> {
        if value.len() == OTP_LENGTH && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(OtpError::InvalidFormat {
                expected: OTP_LENGTH,
                value: value.to_string(),
            })
        }
    }

    /// The code as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Otp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Otp(****)")
    }
}

impl fmt::Display for Otp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Otp {
    type Error = OtpError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Otp> for String {
    fn from(otp: Otp) -> Self {
        otp.0
    }
}
