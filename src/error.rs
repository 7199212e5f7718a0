//! Error types for the banking core.

use thiserror::Error;

/// Result type alias for banking operations.
pub type Result<T> = std::result::Result<T, BankError>;

/// Every way a banking operation can fail. All of these are recoverable:
/// the shell prints the message and re-prompts.
#[derive(Error, Debug)]
pub enum BankError {
    #[error("an account with this id already exists")]
    DuplicateId,

    #[error("incorrect id or password")]
    AuthenticationFailed,

    #[error("you must be signed in to do that")]
    NotAuthenticated,

    #[error("no user is currently signed in")]
    NoActiveSession,

    #[error("invalid account type (expected savings or checking)")]
    InvalidAccountType,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("insufficient funds")]
    InsufficientFunds,

    #[error("no holding in {0}")]
    UnknownHolding(String),

    #[error("insufficient holding in {0}")]
    InsufficientHolding(String),

    #[error("credential hashing failed: {0}")]
    CredentialHash(String),

    #[error("catalog file error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("catalog parse error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
