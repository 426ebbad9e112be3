//! Error types for gateway storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A unique field is already taken by another account.
    #[error("duplicate {field}")]
    Duplicate {
        /// The constrained field (`client_id` or `phone_number`).
        field: &'static str,
    },

    /// The write call returned but the record could not be read back.
    #[error("{entity} was not persisted")]
    NotPersisted {
        /// The record kind.
        entity: &'static str,
    },
}
