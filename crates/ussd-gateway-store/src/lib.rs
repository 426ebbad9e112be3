//! `RocksDB` storage layer for the USSD session gateway.
//!
//! This crate provides persistent storage for accounts and the callback audit log
//! using `RocksDB` with column families for indexing.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `accounts`: Primary account records, keyed by `account_id`
//! - `accounts_by_phone`: Phone number index (unique)
//! - `accounts_by_client_id`: Client ID index (unique)
//! - `callback_logs`: Append-only callback log, keyed by `callback_log_id`
//! - `sequences`: Id counters
//!
//! # Example
//!
//! ```no_run
//! use ussd_gateway_store::{RocksStore, Store};
//! use ussd_gateway_core::{NewAccount, Otp};
//!
//! let store = RocksStore::open("/tmp/ussd-gateway-db").unwrap();
//!
//! let account = store
//!     .insert_account(&NewAccount {
//!         name: "Ama Mensah".into(),
//!         client_id: "GHA-123456789-0".into(),
//!         phone_number: "+233241234567".into(),
//!         balance: Default::default(),
//!     })
//!     .unwrap();
//!
//! assert!(store.set_otp(&account.phone_number, &Otp::generate()).unwrap());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use ussd_gateway_core::{Account, CallbackLog, NewAccount, NewCallbackLog, Otp};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, failure-injecting stores in tests). It is object safe and is
/// shared across request handlers as `Arc<dyn Store>`.
pub trait Store: Send + Sync {
    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Insert a new account and assign its id.
    ///
    /// Uniqueness of `client_id` and `phone_number` is checked in the same critical
    /// section as the write, so concurrent inserts cannot both succeed.
    ///
    /// # Errors
    ///
    /// - `StoreError::Duplicate` if the client ID or phone number is taken.
    /// - `StoreError::NotPersisted` if the record cannot be read back.
    fn insert_account(&self, account: &NewAccount) -> Result<Account>;

    /// Get an account by phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_account_by_phone(&self, phone_number: &str) -> Result<Option<Account>>;

    /// Get an account by client ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_account_by_client_id(&self, client_id: &str) -> Result<Option<Account>>;

    /// Overwrite the one-time code of the account registered to `phone_number`.
    ///
    /// Returns `false` without writing anything if no account has that phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn set_otp(&self, phone_number: &str, otp: &Otp) -> Result<bool>;

    /// Delete the account registered to `phone_number`.
    ///
    /// Returns `false` if there was no such account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_account_by_phone(&self, phone_number: &str) -> Result<bool>;

    // =========================================================================
    // Callback Log Operations
    // =========================================================================

    /// Append a callback log entry and assign its id.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotPersisted` if the entry cannot be read back.
    /// - Any other variant if the database operation fails.
    fn append_callback_log(&self, entry: &NewCallbackLog) -> Result<CallbackLog>;

    /// List callback log entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_callback_logs(&self, limit: usize, offset: usize) -> Result<Vec<CallbackLog>>;
}
