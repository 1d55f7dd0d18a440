//! Ledger history records.
//!
//! Every balance-affecting event appends one immutable, timestamped entry
//! to the owning account's history.

use crate::account::AccountId;
use crate::amount::Amount;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// The balance-affecting event a history entry describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EntryKind {
    /// Account registered with the ledger.
    AccountCreated,

    /// Funds added to the account from outside the ledger.
    Deposit { amount: Amount },

    /// Funds sent to another account as the debit side of a transfer.
    Sent { to: AccountId, amount: Amount },

    /// Funds received from another account as the credit side of a transfer.
    Received { from: AccountId, amount: Amount },
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::AccountCreated => write!(f, "account created"),
            EntryKind::Deposit { amount } => write!(f, "deposited {}", amount),
            EntryKind::Sent { to, amount } => write!(f, "sent {} to {}", amount, to),
            EntryKind::Received { from, amount } => write!(f, "received {} from {}", amount, from),
        }
    }
}

/// One immutable record in an account's history.
///
/// Entries are created only by ledger operations, always appended in
/// chronological order, and never edited or removed afterwards. Fields are
/// private so a reader holding a reference cannot alter a stored entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    at: DateTime<Utc>,
    #[serde(flatten)]
    kind: EntryKind,
}

impl LedgerEntry {
    /// Creates an entry stamped with the given instant.
    ///
    /// Both sides of a transfer share a single instant, so the debit and
    /// credit records of one transfer carry identical timestamps.
    pub(crate) fn new(at: DateTime<Utc>, kind: EntryKind) -> Self {
        LedgerEntry { at, kind }
    }

    /// When the entry was appended.
    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    /// What happened.
    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.at.format("%Y-%m-%d %H:%M:%S UTC"), self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(EntryKind::AccountCreated.to_string(), "account created");
        assert_eq!(
            EntryKind::Deposit { amount: amt("500") }.to_string(),
            "deposited 500.00"
        );
        assert_eq!(
            EntryKind::Sent {
                to: AccountId::new("bob@upi"),
                amount: amt("200")
            }
            .to_string(),
            "sent 200.00 to bob@upi"
        );
        assert_eq!(
            EntryKind::Received {
                from: AccountId::new("alice@upi"),
                amount: amt("200")
            }
            .to_string(),
            "received 200.00 from alice@upi"
        );
    }

    #[test]
    fn test_display_includes_timestamp() {
        let at = DateTime::parse_from_rfc3339("2024-05-01T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let entry = LedgerEntry::new(at, EntryKind::AccountCreated);
        assert_eq!(entry.to_string(), "2024-05-01 12:30:00 UTC - account created");
    }
}
