//! Account types for the USSD gateway.
//!
//! An account links an externally issued client ID and a phone number to a balance
//! and the most recently issued one-time code.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AccountError;
use crate::ids::AccountId;
use crate::otp::Otp;

/// Input for creating an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Account holder's name.
    pub name: String,

    /// Externally issued identifier (national ID, voter ID, ...). Unique.
    pub client_id: String,

    /// Phone number the holder dials in from. Unique.
    pub phone_number: String,

    /// Opening balance.
    #[serde(default)]
    pub balance: Decimal,
}

impl NewAccount {
    /// Check that every identifying field is present.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::EmptyField` naming the first empty field.
    pub fn validate(&self) -> Result<(), AccountError> {
        for (field, value) in [
            ("name", &self.name),
            ("client_id", &self.client_id),
            ("phone_number", &self.phone_number),
        ] {
            if value.trim().is_empty() {
                return Err(AccountError::EmptyField(field));
            }
        }
        Ok(())
    }
}

/// A stored account record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier.
    pub id: AccountId,

    /// Account holder's name.
    pub name: String,

    /// Externally issued identifier.
    pub client_id: String,

    /// Registered phone number.
    pub phone_number: String,

    /// Last issued one-time code, if any.
    pub otp: Option<Otp>,

    /// Current balance in cedis.
    pub balance: Decimal,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Build the stored record for `input` under a freshly assigned id.
    #[must_use]
    pub fn new(id: AccountId, input: &NewAccount) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name.clone(),
            client_id: input.client_id.clone(),
            phone_number: input.phone_number.clone(),
            otp: None,
            balance: input.balance,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `phone_number` is the one registered on this account (exact match).
    #[must_use]
    pub fn owned_by(&self, phone_number: &str) -> bool {
        self.phone_number == phone_number
    }

    /// Replace the current one-time code.
    pub fn issue_otp(&mut self, otp: Otp) {
        self.otp = Some(otp);
        self.updated_at = Utc::now();
    }

    /// Stored balance without trailing zeros, keeping at least one decimal place
    /// (`150.5`, `100.0`, `12.345`). Never rounded.
    #[must_use]
    pub fn balance_display(&self) -> String {
        let balance = self.balance.normalize();
        if balance.scale() == 0 {
            format!("{balance}.0")
        } else {
            balance.to_string()
        }
    }
}
