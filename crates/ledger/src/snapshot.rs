//! JSON snapshot of a group: participants plus balances or raw ledger entries.
//!
//! Snapshots are read-only input. A document may carry explicit balances,
//! recorded expenses and settlements, or both.

use std::path::Path;
use fate_core::{BalanceSheet, Expense, Participant, Settlement};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;
use super::{ExpenseLedger, Result};

/// Group state as exchanged with the expense tracker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Participants in wheel order
    pub participants: Vec<Participant>,

    /// Explicit balances, keyed by participant id
    #[serde(default)]
    pub balances: BalanceSheet,

    /// Expenses to replay on top of the explicit balances
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expenses: Vec<Expense>,

    /// Settlements to replay on top of the explicit balances
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub settlements: Vec<Settlement>,
}

impl Snapshot {
    /// Read a snapshot from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading snapshot from {}", path.display());
        let json = fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a ledger that serves this snapshot.
    ///
    /// Expenses and settlements are validated and replayed in order.
    pub fn into_ledger(self) -> Result<ExpenseLedger> {
        let mut ledger = ExpenseLedger::with_participants(self.participants)?
            .with_opening_balances(self.balances)?;
        for expense in self.expenses {
            ledger.record_expense(expense)?;
        }
        for settlement in self.settlements {
            ledger.record_settlement(settlement)?;
        }
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BalanceStore, LedgerError};

    const SCENARIO: &str = r#"{
        "participants": [
            { "id": "a", "name": "Ana" },
            { "id": "b", "name": "Ben" },
            { "id": "c", "name": "Cleo" }
        ],
        "balances": {
            "a": { "owes": { "x": 10 }, "isOwed": {} },
            "b": { "owes": {}, "isOwed": { "x": 5 } }
        }
    }"#;

    #[test]
    fn test_explicit_balances_are_served_verbatim() {
        let ledger = Snapshot::from_json(SCENARIO).unwrap().into_ledger().unwrap();
        let sheet = ledger.snapshot();

        assert_eq!(ledger.participants().len(), 3);
        assert_eq!(sheet.net(&"a".into()), 10.0);
        assert_eq!(sheet.net(&"b".into()), -5.0);
        assert!(sheet.get(&"c".into()).unwrap().is_settled());
    }

    #[test]
    fn test_expenses_are_replayed() {
        let json = r#"{
            "participants": [
                { "id": "a", "name": "Ana" },
                { "id": "b", "name": "Ben" }
            ],
            "expenses": [
                { "description": "Lunch", "amount": 18, "paidBy": "a", "participants": ["a", "b"] }
            ],
            "settlements": [
                { "from": "b", "to": "a", "amount": 4 }
            ]
        }"#;
        let ledger = Snapshot::from_json(json).unwrap().into_ledger().unwrap();
        assert_eq!(ledger.snapshot().net(&"b".into()), 5.0);
    }

    #[test]
    fn test_unknown_payer_is_rejected() {
        let json = r#"{
            "participants": [{ "id": "a", "name": "Ana" }],
            "expenses": [
                { "description": "Lunch", "amount": 18, "paidBy": "z", "participants": ["a"] }
            ]
        }"#;
        let err = Snapshot::from_json(json).unwrap().into_ledger().unwrap_err();
        assert!(matches!(err, LedgerError::UnknownParticipant(_)));
    }

    #[test]
    fn test_negative_balance_amount_is_rejected() {
        let json = r#"{
            "participants": [{ "id": "a", "name": "Ana" }],
            "balances": {
                "a": { "owes": { "x": 5 }, "isOwed": { "y": -10 } }
            }
        }"#;
        let err = Snapshot::from_json(json).unwrap().into_ledger().unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("group.json");
        tokio::fs::write(&path, SCENARIO).await.unwrap();

        let snapshot = Snapshot::load(&path).await.unwrap();
        assert_eq!(snapshot.participants[2].name, "Cleo");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(dir.path().join("absent.json")).await.unwrap_err();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}
