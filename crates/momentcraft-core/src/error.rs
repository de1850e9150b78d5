//! Error types for MomentCraft

use thiserror::Error;

/// Main error type for MomentCraft operations
#[derive(Error, Debug)]
pub enum CraftError {
    /// A required form field is missing or empty
    #[error("Required field missing: {0}")]
    Validation(String),

    /// Referenced gift id has no record in storage
    #[error("Gift not found: {0}")]
    GiftNotFound(String),

    /// Write would exceed the storage quota
    #[error("Storage quota exceeded: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Uploaded file failed the MIME allow-list
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Uploaded file exceeds the category's byte ceiling
    #[error("File too large: {size} bytes (limit {limit})")]
    OversizeFile { size: usize, limit: usize },

    /// Registration conflict on an already-used email
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Share or collaboration URL could not be understood
    #[error("Invalid link: {0}")]
    InvalidLink(String),

    /// Malformed gift id string
    #[error("Invalid gift id: {0}")]
    InvalidGiftId(String),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Image decoding or re-encoding failed
    #[error("Image error: {0}")]
    Image(String),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using CraftError
pub type CraftResult<T> = Result<T, CraftError>;
