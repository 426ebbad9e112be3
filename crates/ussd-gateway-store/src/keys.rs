//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding and decoding keys used in column families.

use ussd_gateway_core::{AccountId, CallbackLogId};

use crate::error::{Result, StoreError};

/// Create an account key from an account ID.
#[must_use]
pub fn account_key(account_id: AccountId) -> Vec<u8> {
    account_id.to_be_bytes().to_vec()
}

/// Create a phone-number index key.
#[must_use]
pub fn phone_key(phone_number: &str) -> Vec<u8> {
    phone_number.as_bytes().to_vec()
}

/// Create a client-ID index key.
#[must_use]
pub fn client_id_key(client_id: &str) -> Vec<u8> {
    client_id.as_bytes().to_vec()
}

/// Create a callback log key from a log ID.
///
/// Big-endian encoding keeps forward iteration in append order.
#[must_use]
pub fn callback_log_key(log_id: CallbackLogId) -> Vec<u8> {
    log_id.to_be_bytes().to_vec()
}

/// Create a sequence counter key.
#[must_use]
pub fn sequence_key(name: &str) -> Vec<u8> {
    name.as_bytes().to_vec()
}

/// Decode an 8-byte big-endian value (index entries and sequence counters).
///
/// # Errors
///
/// Returns `StoreError::Serialization` if the value is not exactly 8 bytes.
pub fn decode_u64(value: &[u8]) -> Result<u64> {
    let bytes: [u8; 8] = value
        .try_into()
        .map_err(|_| StoreError::Serialization(format!("expected 8 bytes, got {}", value.len())))?;
    Ok(u64::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_key_length() {
        let key = account_key(AccountId::new(7));
        assert_eq!(key.len(), 8);
    }

    #[test]
    fn callback_log_keys_sort_by_id() {
        let keys: Vec<_> = [1u64, 255, 256, 70_000]
            .into_iter()
            .map(|id| callback_log_key(CallbackLogId::new(id)))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn decode_u64_roundtrip() {
        let key = account_key(AccountId::new(513));
        assert_eq!(decode_u64(&key).unwrap(), 513);
    }

    #[test]
    fn decode_u64_rejects_short_values() {
        assert!(matches!(decode_u64(&[1, 2, 3]), Err(StoreError::Serialization(_))));
    }
}
