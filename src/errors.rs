//! Unified error types and result handling.
//!
//! All fallible operations in the crate return [`Result`]. Rejected state
//! transitions and not-found conditions are ordinary error values that the
//! calling layer surfaces as advisory messages; they never indicate a
//! corrupted state.

use thiserror::Error;

/// Unified error type for all `DoubleMoney` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation failure
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (config files, .env)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Deposit amount outside the configured limits, or not a finite number
    #[error("Invalid deposit amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// User id not present in the database
    #[error("User {id} not found")]
    UserNotFound {
        /// The missing user id
        id: i64,
    },

    /// Registration attempted with a phone number that already has an account
    #[error("Phone number {phone} is already registered")]
    PhoneAlreadyRegistered {
        /// The duplicate phone number
        phone: String,
    },

    /// Registration referenced a referral code that matches no user
    #[error("Invalid referral code: {code}")]
    InvalidReferralCode {
        /// The unmatched code
        code: String,
    },

    /// Investment id not present (or not owned by the acting user)
    #[error("Investment {id} not found")]
    InvestmentNotFound {
        /// The missing investment id
        id: i64,
    },

    /// Referral earning id not present in the database
    #[error("Referral earning {id} not found")]
    EarningNotFound {
        /// The missing earning id
        id: i64,
    },

    /// Wallet id not present in the database
    #[error("Wallet {id} not found")]
    WalletNotFound {
        /// The missing wallet id
        id: i64,
    },

    /// No active deposit wallet exists for the requested currency
    #[error("No deposit wallet available for {currency}")]
    NoWalletAvailable {
        /// The requested currency
        currency: String,
    },

    /// Deposit requested in a currency the platform does not handle
    #[error("Unsupported currency: {currency}")]
    UnsupportedCurrency {
        /// The rejected currency
        currency: String,
    },

    /// Wallet address already present in the pool
    #[error("Wallet address {address} already exists")]
    DuplicateWallet {
        /// The duplicate address
        address: String,
    },

    /// State transition not legal from the entity's current status
    #[error("Transition rejected: {message}")]
    TransitionRejected {
        /// Why the transition was refused
        message: String,
    },
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
