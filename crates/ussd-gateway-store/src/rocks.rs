//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use ussd_gateway_core::{
    Account, AccountId, CallbackLog, CallbackLogId, NewAccount, NewCallbackLog, Otp,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf, seq};
use crate::Store;

/// RocksDB-backed storage implementation.
///
/// Reads go straight to the database. Every mutation runs under `write_lock`, which
/// makes read-check-write sequences (uniqueness checks, OTP overwrite, id assignment)
/// atomic with respect to each other.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Take the writer lock.
    fn lock_writes(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::Database("write lock poisoned".into()))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Last value handed out by a sequence (0 if none yet).
    fn current_sequence(&self, name: &str) -> Result<u64> {
        let cf = self.cf(cf::SEQUENCES)?;

        self.db
            .get_cf(&cf, keys::sequence_key(name))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map_or(Ok(0), |data| keys::decode_u64(&data))
    }

    /// Resolve a unique index entry to an account id.
    fn index_lookup(&self, index: &str, key: &[u8]) -> Result<Option<AccountId>> {
        let cf = self.cf(index)?;

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| keys::decode_u64(&data).map(AccountId::new))
            .transpose()
    }

    fn get_account(&self, account_id: AccountId) -> Result<Option<Account>> {
        let cf = self.cf(cf::ACCOUNTS)?;

        self.db
            .get_cf(&cf, keys::account_key(account_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn get_callback_log(&self, log_id: CallbackLogId) -> Result<Option<CallbackLog>> {
        let cf = self.cf(cf::CALLBACK_LOGS)?;

        self.db
            .get_cf(&cf, keys::callback_log_key(log_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn find_account_via(&self, index: &str, key: &[u8]) -> Result<Option<Account>> {
        match self.index_lookup(index, key)? {
            Some(account_id) => self.get_account(account_id),
            None => Ok(None),
        }
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Account Operations
    // =========================================================================

    fn insert_account(&self, input: &NewAccount) -> Result<Account> {
        let _guard = self.lock_writes()?;

        let client_key = keys::client_id_key(&input.client_id);
        let phone_key = keys::phone_key(&input.phone_number);

        if self.index_lookup(cf::ACCOUNTS_BY_CLIENT_ID, &client_key)?.is_some() {
            return Err(StoreError::Duplicate { field: "client_id" });
        }
        if self.index_lookup(cf::ACCOUNTS_BY_PHONE, &phone_key)?.is_some() {
            return Err(StoreError::Duplicate {
                field: "phone_number",
            });
        }

        let next_id = self.current_sequence(seq::ACCOUNT_ID)? + 1;
        let account_id = AccountId::new(next_id);
        let account = Account::new(account_id, input);

        let cf_accounts = self.cf(cf::ACCOUNTS)?;
        let cf_by_phone = self.cf(cf::ACCOUNTS_BY_PHONE)?;
        let cf_by_client = self.cf(cf::ACCOUNTS_BY_CLIENT_ID)?;
        let cf_sequences = self.cf(cf::SEQUENCES)?;

        let id_bytes = account_id.to_be_bytes();
        let value = Self::serialize(&account)?;

        // Record, both indexes and the sequence bump land together
        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_accounts, keys::account_key(account_id), &value);
        batch.put_cf(&cf_by_phone, &phone_key, id_bytes);
        batch.put_cf(&cf_by_client, &client_key, id_bytes);
        batch.put_cf(&cf_sequences, keys::sequence_key(seq::ACCOUNT_ID), id_bytes);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(account_id = %account_id, "Account inserted");

        self.get_account(account_id)?
            .ok_or(StoreError::NotPersisted { entity: "account" })
    }

    fn find_account_by_phone(&self, phone_number: &str) -> Result<Option<Account>> {
        self.find_account_via(cf::ACCOUNTS_BY_PHONE, &keys::phone_key(phone_number))
    }

    fn find_account_by_client_id(&self, client_id: &str) -> Result<Option<Account>> {
        self.find_account_via(cf::ACCOUNTS_BY_CLIENT_ID, &keys::client_id_key(client_id))
    }

    fn set_otp(&self, phone_number: &str, otp: &Otp) -> Result<bool> {
        let _guard = self.lock_writes()?;

        let Some(mut account) = self.find_account_by_phone(phone_number)? else {
            return Ok(false);
        };

        account.issue_otp(otp.clone());

        let cf = self.cf(cf::ACCOUNTS)?;
        let value = Self::serialize(&account)?;

        self.db
            .put_cf(&cf, keys::account_key(account.id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(true)
    }

    fn delete_account_by_phone(&self, phone_number: &str) -> Result<bool> {
        let _guard = self.lock_writes()?;

        let Some(account) = self.find_account_by_phone(phone_number)? else {
            return Ok(false);
        };

        let cf_accounts = self.cf(cf::ACCOUNTS)?;
        let cf_by_phone = self.cf(cf::ACCOUNTS_BY_PHONE)?;
        let cf_by_client = self.cf(cf::ACCOUNTS_BY_CLIENT_ID)?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_accounts, keys::account_key(account.id));
        batch.delete_cf(&cf_by_phone, keys::phone_key(&account.phone_number));
        batch.delete_cf(&cf_by_client, keys::client_id_key(&account.client_id));

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(account_id = %account.id, "Account deleted");

        Ok(true)
    }

    // =========================================================================
    // Callback Log Operations
    // =========================================================================

    fn append_callback_log(&self, entry: &NewCallbackLog) -> Result<CallbackLog> {
        let _guard = self.lock_writes()?;

        let next_id = self.current_sequence(seq::CALLBACK_LOG_ID)? + 1;
        let log_id = CallbackLogId::new(next_id);
        let log = CallbackLog::new(log_id, entry.clone());

        let cf_logs = self.cf(cf::CALLBACK_LOGS)?;
        let cf_sequences = self.cf(cf::SEQUENCES)?;
        let value = Self::serialize(&log)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_logs, keys::callback_log_key(log_id), &value);
        batch.put_cf(
            &cf_sequences,
            keys::sequence_key(seq::CALLBACK_LOG_ID),
            log_id.to_be_bytes(),
        );

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        self.get_callback_log(log_id)?
            .ok_or(StoreError::NotPersisted {
                entity: "callback log",
            })
    }

    fn list_callback_logs(&self, limit: usize, offset: usize) -> Result<Vec<CallbackLog>> {
        let cf = self.cf(cf::CALLBACK_LOGS)?;

        // Keys are big-endian ids, so iterating from the end gives newest first
        self.db
            .iterator_cf(&cf, IteratorMode::End)
            .skip(offset)
            .take(limit)
            .map(|item| {
                let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
                Self::deserialize(&value)
            })
            .collect()
    }
}
