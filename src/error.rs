//! Error types for the wallet ledger.

use crate::account::AccountId;
use crate::amount::Amount;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors a ledger operation can return.
///
/// All variants are recoverable and caller-facing; a failed operation leaves
/// the ledger exactly as it was before the call. Each rejectable condition
/// maps to exactly one variant so callers can branch on it deterministically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Registration attempted with an id that is already taken
    #[error("account {0} already exists")]
    DuplicateAccount(AccountId),

    /// No account registered under the given id
    #[error("no account found for {0}")]
    AccountNotFound(AccountId),

    /// Supplied credential does not match the account's
    #[error("incorrect credential")]
    InvalidCredential,

    /// Transfer names the source account as its own destination
    #[error("cannot transfer to the same account")]
    SelfTransfer,

    /// Deposit or transfer amount is zero or negative
    #[error("amount must be positive, got {0}")]
    InvalidAmount(Amount),

    /// Transfer amount exceeds the source account's balance
    #[error("insufficient balance: have {balance}, need {requested}")]
    InsufficientBalance { balance: Amount, requested: Amount },
}
