//! Balance model - who owes whom, per participant.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::id::ParticipantId;

/// Debts and credits of a single participant.
///
/// Amounts are non-negative currency values keyed by the counterparty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Counterparty -> amount this participant owes them
    #[serde(default)]
    pub owes: BTreeMap<ParticipantId, f64>,

    /// Counterparty -> amount they owe this participant
    #[serde(default)]
    pub is_owed: BTreeMap<ParticipantId, f64>,
}

impl Balance {
    /// Create an empty balance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that this participant owes `amount` to `to`.
    pub fn with_owes(mut self, to: impl Into<ParticipantId>, amount: f64) -> Self {
        *self.owes.entry(to.into()).or_insert(0.0) += amount;
        self
    }

    /// Record that `from` owes `amount` to this participant.
    pub fn with_is_owed(mut self, from: impl Into<ParticipantId>, amount: f64) -> Self {
        *self.is_owed.entry(from.into()).or_insert(0.0) += amount;
        self
    }

    /// Total amount this participant owes others.
    pub fn total_owes(&self) -> f64 {
        self.owes.values().sum()
    }

    /// Total amount others owe this participant.
    pub fn total_is_owed(&self) -> f64 {
        self.is_owed.values().sum()
    }

    /// Net balance: positive for debtors, negative for creditors.
    pub fn net(&self) -> f64 {
        self.total_owes() - self.total_is_owed()
    }

    /// Whether there is nothing owed in either direction.
    pub fn is_settled(&self) -> bool {
        self.owes.is_empty() && self.is_owed.is_empty()
    }
}

/// Snapshot of balances for a whole group, keyed by participant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceSheet(BTreeMap<ParticipantId, Balance>);

impl BalanceSheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a participant's balance. A miss is not an error.
    pub fn get(&self, id: &ParticipantId) -> Option<&Balance> {
        self.0.get(id)
    }

    /// Insert or replace a participant's balance.
    pub fn insert(&mut self, id: impl Into<ParticipantId>, balance: Balance) -> Option<Balance> {
        self.0.insert(id.into(), balance)
    }

    /// Builder form of [`BalanceSheet::insert`].
    pub fn with(mut self, id: impl Into<ParticipantId>, balance: Balance) -> Self {
        self.insert(id, balance);
        self
    }

    /// Net balance for a participant, zero when absent.
    pub fn net(&self, id: &ParticipantId) -> f64 {
        self.get(id).map(Balance::net).unwrap_or(0.0)
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &Balance)> {
        self.0.iter()
    }

    /// Number of participants with an entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sheet has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ParticipantId, Balance)> for BalanceSheet {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, Balance)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(ParticipantId, Balance)> for BalanceSheet {
    fn extend<I: IntoIterator<Item = (ParticipantId, Balance)>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_is_owes_minus_is_owed() {
        let balance = Balance::new()
            .with_owes("b", 7.5)
            .with_owes("c", 2.5)
            .with_is_owed("d", 4.0);

        assert_eq!(balance.total_owes(), 10.0);
        assert_eq!(balance.total_is_owed(), 4.0);
        assert_eq!(balance.net(), 6.0);
    }

    #[test]
    fn test_missing_entry_has_zero_net() {
        let sheet = BalanceSheet::new().with("a", Balance::new().with_owes("b", 3.0));
        assert_eq!(sheet.net(&"a".into()), 3.0);
        assert_eq!(sheet.net(&"zed".into()), 0.0);
        assert!(sheet.get(&"zed".into()).is_none());
    }

    #[test]
    fn test_deserializes_is_owed_key() {
        let json = r#"{
            "a": { "owes": { "b": 10 }, "isOwed": {} },
            "b": { "owes": {}, "isOwed": { "a": 10 } }
        }"#;
        let sheet: BalanceSheet = serde_json::from_str(json).unwrap();

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.net(&"a".into()), 10.0);
        assert_eq!(sheet.net(&"b".into()), -10.0);
    }

    #[test]
    fn test_missing_maps_default_to_empty() {
        let balance: Balance = serde_json::from_str("{}").unwrap();
        assert!(balance.is_settled());
        assert_eq!(balance.net(), 0.0);
    }
}
