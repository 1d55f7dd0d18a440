//! Wallet account model: identifier, credential, balance, and history.
//!
//! Maintains the invariant: `balance >= 0`, and every balance mutation
//! appends exactly one history entry in the same operation.

use crate::amount::Amount;
use crate::entry::{EntryKind, LedgerEntry};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Case-normalized account identifier.
///
/// Construction trims surrounding whitespace and lowercases, so lookups are
/// insensitive to how the caller typed the id. Shape validation (the
/// `local@domain` format) belongs to the presentation layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AccountId(String);

impl AccountId {
    /// Creates a normalized identifier from raw caller input.
    pub fn new(raw: impl AsRef<str>) -> Self {
        AccountId(raw.as_ref().trim().to_lowercase())
    }

    /// The normalized identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque secret (PIN) authorizing sensitive operations on an account.
///
/// The ledger treats the credential as a black box: it is compared, never
/// inspected, logged, or serialized. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw secret. Format rules (4-digit PIN) are enforced by the
    /// presentation layer before the secret reaches the ledger.
    pub fn new(raw: impl Into<String>) -> Self {
        Credential(raw.into())
    }

    /// Compares two credentials without short-circuiting on the first
    /// differing byte.
    pub fn matches(&self, other: &Credential) -> bool {
        let a = self.0.as_bytes();
        let b = other.0.as_bytes();
        if a.len() != b.len() {
            return false;
        }
        a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// A wallet account: unique id, display name, balance, and append-only history.
///
/// # Invariants
///
/// - `balance >= 0` after every operation
/// - every balance mutation appends exactly one history entry
/// - history is append-only: entries are never edited, reordered, or removed
///
/// Fields are private; all mutation goes through the [`Ledger`] so the
/// invariants cannot be bypassed from outside the crate.
///
/// [`Ledger`]: crate::Ledger
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    id: AccountId,
    display_name: String,
    #[serde(skip_serializing)]
    credential: Credential,
    balance: Amount,
    history: Vec<LedgerEntry>,
}

impl Account {
    /// Creates an account with zero balance and a single "account created"
    /// history entry stamped with the given instant.
    pub(crate) fn new(
        id: AccountId,
        display_name: impl Into<String>,
        credential: Credential,
        at: DateTime<Utc>,
    ) -> Self {
        Account {
            id,
            display_name: display_name.into(),
            credential,
            balance: Amount::ZERO,
            history: vec![LedgerEntry::new(at, EntryKind::AccountCreated)],
        }
    }

    /// The account's unique identifier.
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Human-readable name chosen at registration. Not used for identity.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Current balance.
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Full history in storage (chronological) order.
    pub fn history(&self) -> &[LedgerEntry] {
        &self.history
    }

    /// Up to `limit` most recent entries, most recent first.
    ///
    /// Storage order is unaffected; this is a read-side view for display.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &LedgerEntry> {
        self.history.iter().rev().take(limit)
    }

    /// Checks the supplied credential against the account's.
    pub(crate) fn credential_matches(&self, credential: &Credential) -> bool {
        self.credential.matches(credential)
    }

    /// Adds funds and records the matching history entry as one unit.
    pub(crate) fn credit(&mut self, amount: Amount, at: DateTime<Utc>, kind: EntryKind) {
        self.balance += amount;
        self.history.push(LedgerEntry::new(at, kind));
    }

    /// Removes funds and records the matching history entry as one unit.
    ///
    /// The caller has already established `amount <= balance`.
    pub(crate) fn debit(&mut self, amount: Amount, at: DateTime<Utc>, kind: EntryKind) {
        debug_assert!(amount <= self.balance);
        self.balance -= amount;
        self.history.push(LedgerEntry::new(at, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn account(id: &str) -> Account {
        Account::new(
            AccountId::new(id),
            "Test User",
            Credential::new("1111"),
            Utc::now(),
        )
    }

    #[test]
    fn test_id_normalization() {
        assert_eq!(AccountId::new("  Alice@UPI ").as_str(), "alice@upi");
        assert_eq!(AccountId::new("bob@upi"), AccountId::new("BOB@upi"));
    }

    #[test]
    fn test_new_account_has_zero_balance_and_created_entry() {
        let account = account("alice@upi");
        assert_eq!(account.balance(), Amount::ZERO);
        assert_eq!(account.history().len(), 1);
        assert_eq!(account.history()[0].kind(), &EntryKind::AccountCreated);
    }

    #[test]
    fn test_credential_matching() {
        let credential = Credential::new("1234");
        assert!(credential.matches(&Credential::new("1234")));
        assert!(!credential.matches(&Credential::new("1243")));
        assert!(!credential.matches(&Credential::new("123")));
        assert!(!credential.matches(&Credential::new("12345")));
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let rendered = format!("{:?}", Credential::new("9999"));
        assert!(!rendered.contains("9999"));
    }

    #[test]
    fn test_credit_pairs_balance_with_entry() {
        let mut account = account("alice@upi");
        account.credit(amt("500"), Utc::now(), EntryKind::Deposit { amount: amt("500") });

        assert_eq!(account.balance().to_string(), "500.00");
        assert_eq!(account.history().len(), 2);
    }

    #[test]
    fn test_debit_pairs_balance_with_entry() {
        let mut account = account("alice@upi");
        account.credit(amt("500"), Utc::now(), EntryKind::Deposit { amount: amt("500") });
        account.debit(
            amt("200"),
            Utc::now(),
            EntryKind::Sent {
                to: AccountId::new("bob@upi"),
                amount: amt("200"),
            },
        );

        assert_eq!(account.balance().to_string(), "300.00");
        assert_eq!(account.history().len(), 3);
    }

    #[test]
    fn test_recent_is_most_recent_first_and_bounded() {
        let mut account = account("alice@upi");
        for i in 1..=5 {
            let amount = amt(&i.to_string());
            account.credit(amount, Utc::now(), EntryKind::Deposit { amount });
        }

        let recent: Vec<_> = account.recent(3).collect();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].kind(), &EntryKind::Deposit { amount: amt("5") });
        assert_eq!(recent[2].kind(), &EntryKind::Deposit { amount: amt("3") });

        // asking for more than exists returns everything
        assert_eq!(account.recent(100).count(), 6);
    }
}
