//! Account error model.
//!
//! The `InvalidAmount` and `InsufficientFunds` Display texts are part of the
//! public contract; callers assert on them verbatim.

use thiserror::Error;

/// Result type used across the account domain.
pub type AccountResult<T> = Result<T, AccountError>;

/// Deterministic, domain-level account failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccountError {
    /// A mutation was requested with a zero or negative amount.
    #[error("Amount must be positive")]
    InvalidAmount,

    /// A withdrawal would drive the balance below zero.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// A command was addressed to an account that has not been opened.
    #[error("account is not open")]
    NotOpen,

    /// An open command reached an account that already exists.
    #[error("account is already open")]
    AlreadyOpen,

    /// A command carried an id other than the aggregate's own.
    #[error("account id mismatch")]
    IdMismatch,
}
