//! # Wallet Ledger
//!
//! An in-memory wallet ledger: accounts registered under a normalized id
//! hold a balance and an append-only transaction history, and move funds
//! between each other through atomic transfers.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: 2 decimal places via `rust_decimal`
//! - **Strict invariants**: balances never go negative, every balance change
//!   pairs with exactly one history entry
//! - **All-or-nothing operations**: a failed operation leaves the ledger
//!   byte-for-byte unchanged
//! - **Typed errors**: every rejectable condition maps to one
//!   [`LedgerError`] variant
//!
//! ## Example
//!
//! ```
//! use std::str::FromStr;
//! use wallet_ledger::{AccountId, Amount, Credential, Ledger};
//!
//! let mut ledger = Ledger::new();
//! let alice = AccountId::new("alice@upi");
//! let bob = AccountId::new("bob@upi");
//!
//! ledger.create_account(alice.clone(), "Alice", Credential::new("1111")).unwrap();
//! ledger.create_account(bob.clone(), "Bob", Credential::new("2222")).unwrap();
//!
//! ledger.deposit(&alice, Amount::from_str("500").unwrap()).unwrap();
//! let remaining = ledger
//!     .transfer(&alice, &bob, Amount::from_str("200").unwrap(), &Credential::new("1111"))
//!     .unwrap();
//! assert_eq!(remaining.to_string(), "300.00");
//! ```

pub mod account;
pub mod amount;
pub mod entry;
pub mod error;
pub mod ledger;

pub use account::{Account, AccountId, Credential};
pub use amount::Amount;
pub use entry::{EntryKind, LedgerEntry};
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
