//! Identifier types for the USSD gateway.
//!
//! Records are keyed by store-assigned sequence numbers. Each identifier is a
//! distinct newtype so an account id can never be passed where a callback log
//! id is expected.
//!
//! # Macro-based ID Types
//!
//! The `sequence_id_type!` macro reduces boilerplate for sequence-based identifier
//! types, ensuring consistent serialization, display and key encoding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a `u64` sequence identifier type with standard trait implementations.
///
/// This macro generates a newtype wrapper around `u64` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - `Serialize`, `Deserialize` (as a plain number)
/// - `Display`, `Debug`
/// - big-endian key bytes, so that keys sort in sequence order
///
/// # Example
///
/// ```ignore
/// sequence_id_type!(MyId, "A custom identifier type.");
/// let id = MyId::new(7);
/// assert_eq!(id.to_be_bytes(), 7u64.to_be_bytes());
/// ```
macro_rules! sequence_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create an identifier from its sequence value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Return the underlying sequence value.
            #[must_use]
            pub const fn value(&self) -> u64 {
                self.0
            }

            /// Big-endian key bytes (8 bytes).
            #[must_use]
            pub const fn to_be_bytes(&self) -> [u8; 8] {
                self.0.to_be_bytes()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

sequence_id_type!(AccountId, "An account record identifier, assigned by the store on insert.");
sequence_id_type!(CallbackLogId, "A callback log identifier, assigned by the store on append.\n\nLog ids increase with every append, so they also give the audit order.");
