//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary account records, keyed by big-endian `account_id`.
    pub const ACCOUNTS: &str = "accounts";

    /// Index: phone number to `account_id`. Also the phone uniqueness constraint.
    pub const ACCOUNTS_BY_PHONE: &str = "accounts_by_phone";

    /// Index: client ID to `account_id`. Also the client ID uniqueness constraint.
    pub const ACCOUNTS_BY_CLIENT_ID: &str = "accounts_by_client_id";

    /// Append-only callback log, keyed by big-endian `callback_log_id`.
    pub const CALLBACK_LOGS: &str = "callback_logs";

    /// Named `u64` counters used to assign record ids.
    pub const SEQUENCES: &str = "sequences";
}

/// Names of the id sequences kept in [`cf::SEQUENCES`].
pub mod seq {
    /// Last assigned account id.
    pub const ACCOUNT_ID: &str = "account_id";

    /// Last assigned callback log id.
    pub const CALLBACK_LOG_ID: &str = "callback_log_id";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::ACCOUNTS,
        cf::ACCOUNTS_BY_PHONE,
        cf::ACCOUNTS_BY_CLIENT_ID,
        cf::CALLBACK_LOGS,
        cf::SEQUENCES,
    ]
}
