//! Core account ledger and transfer engine.
//!
//! The ledger is the single source of truth for accounts, balances, and
//! history. Every operation either fully succeeds with its documented side
//! effects or fails with a typed error and leaves all state untouched.

use crate::account::{Account, AccountId, Credential};
use crate::amount::Amount;
use crate::entry::EntryKind;
use crate::error::{LedgerError, Result};
use chrono::Utc;
use log::{debug, warn};
use std::collections::HashMap;

/// The wallet ledger.
///
/// Owns the full set of accounts and is their sole mutator; callers hold an
/// [`AccountId`] as a session handle and pass it back into each operation.
///
/// # Atomicity
///
/// Every operation takes `&mut self`, so Rust's aliasing rules make each one
/// a critical section: no reader can observe a transfer half-applied. A
/// concurrent deployment wraps the ledger in a `Mutex`; per-account locking
/// in deterministic id order is the upgrade path if that global section ever
/// becomes contended.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Accounts indexed by normalized id.
    accounts: HashMap<AccountId, Account>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger {
            accounts: HashMap::new(),
        }
    }

    /// Registers a new account with zero balance.
    ///
    /// The account starts with a single "account created" history entry and
    /// becomes immediately queryable by id.
    ///
    /// # Errors
    ///
    /// `DuplicateAccount` if the id is already taken.
    pub fn create_account(
        &mut self,
        id: AccountId,
        display_name: impl Into<String>,
        credential: Credential,
    ) -> Result<&Account> {
        if self.accounts.contains_key(&id) {
            debug!("rejected registration, id {} already exists", id);
            return Err(LedgerError::DuplicateAccount(id));
        }

        let account = Account::new(id.clone(), display_name, credential, Utc::now());
        debug!("registered account {}", id);
        Ok(self.accounts.entry(id).or_insert(account))
    }

    /// Resolves a session handle to its account.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if no account is registered under the id.
    pub fn account(&self, id: &AccountId) -> Result<&Account> {
        self.accounts
            .get(id)
            .ok_or_else(|| LedgerError::AccountNotFound(id.clone()))
    }

    /// Looks up an account and checks its credential. Read-only.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if the id is absent, `InvalidCredential` if the
    /// credential does not match.
    pub fn authenticate(&self, id: &AccountId, credential: &Credential) -> Result<&Account> {
        let account = self.account(id)?;
        if !account.credential_matches(credential) {
            warn!("failed authentication attempt for {}", id);
            return Err(LedgerError::InvalidCredential);
        }
        Ok(account)
    }

    /// Adds funds to an account.
    ///
    /// The balance update and the history entry recording it are applied as
    /// one unit. Returns the new balance.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` if the amount is zero or negative, `AccountNotFound`
    /// if the id is absent.
    pub fn deposit(&mut self, id: &AccountId, amount: Amount) -> Result<Amount> {
        if !amount.is_positive() {
            debug!("rejected deposit to {}: non-positive amount {}", id, amount);
            return Err(LedgerError::InvalidAmount(amount));
        }

        let account = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::AccountNotFound(id.clone()))?;

        account.credit(amount, Utc::now(), EntryKind::Deposit { amount });
        debug!("deposited {} to {}", amount, id);
        Ok(account.balance())
    }

    /// Moves funds from one account to another atomically.
    ///
    /// Validations run in a fixed order and the first failure wins:
    ///
    /// 1. destination differs from source (`SelfTransfer`)
    /// 2. destination exists (`AccountNotFound`)
    /// 3. amount is positive (`InvalidAmount`)
    /// 4. source balance covers the amount (`InsufficientBalance`)
    /// 5. credential matches the source account (`InvalidCredential`)
    ///
    /// Only when every check passes is the ledger touched: the source is
    /// debited, the destination credited, and each side gains one history
    /// entry naming the counterparty. Both entries carry the same timestamp.
    /// Any failure leaves both accounts exactly as they were.
    ///
    /// Returns the source account's new balance.
    pub fn transfer(
        &mut self,
        source_id: &AccountId,
        destination_id: &AccountId,
        amount: Amount,
        credential: &Credential,
    ) -> Result<Amount> {
        if destination_id == source_id {
            debug!("rejected transfer from {}: self-transfer", source_id);
            return Err(LedgerError::SelfTransfer);
        }

        let source = self.account(source_id)?;

        if !self.accounts.contains_key(destination_id) {
            debug!(
                "rejected transfer from {}: unknown destination {}",
                source_id, destination_id
            );
            return Err(LedgerError::AccountNotFound(destination_id.clone()));
        }

        if !amount.is_positive() {
            debug!(
                "rejected transfer from {}: non-positive amount {}",
                source_id, amount
            );
            return Err(LedgerError::InvalidAmount(amount));
        }

        let balance = source.balance();
        if amount > balance {
            debug!(
                "rejected transfer from {}: insufficient balance for {}",
                source_id, amount
            );
            return Err(LedgerError::InsufficientBalance {
                balance,
                requested: amount,
            });
        }

        if !source.credential_matches(credential) {
            warn!("rejected transfer from {}: credential mismatch", source_id);
            return Err(LedgerError::InvalidCredential);
        }

        // Commit point: no fallible step below, so debit and credit are never
        // observable apart. One instant stamps both sides.
        let at = Utc::now();

        // Safety: source was resolved above
        let source = self
            .accounts
            .get_mut(source_id)
            .expect("source account exists");
        source.debit(
            amount,
            at,
            EntryKind::Sent {
                to: destination_id.clone(),
                amount,
            },
        );
        let new_balance = source.balance();

        // Safety: destination presence was checked above
        let destination = self
            .accounts
            .get_mut(destination_id)
            .expect("destination account exists");
        destination.credit(
            amount,
            at,
            EntryKind::Received {
                from: source_id.clone(),
                amount,
            },
        );

        debug!("transferred {} from {} to {}", amount, source_id, destination_id);
        Ok(new_balance)
    }

    /// Read-only view over all accounts, in no particular order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }
}
