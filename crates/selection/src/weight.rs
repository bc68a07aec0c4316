//! Selection weights derived from net balances.

use fate_core::{BalanceSheet, Participant, ParticipantId};
use crate::{Result, SelectionError};

/// Weight given to anyone who is not a net debtor.
pub const DEFAULT_FLOOR_WEIGHT: f64 = 1.0;

/// Turns balances into selection weights.
///
/// A net debtor's weight is what they owe; everyone else gets the floor.
/// The floor does not scale with the size of other debts, so it is kept
/// configurable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightPolicy {
    floor: f64,
}

impl WeightPolicy {
    /// Create a policy with a custom floor.
    pub fn new(floor: f64) -> Result<Self> {
        if !floor.is_finite() || floor <= 0.0 {
            return Err(SelectionError::InvalidFloor(floor));
        }
        Ok(Self { floor })
    }

    /// The floor weight.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Weight for a single participant.
    pub fn weight(&self, id: &ParticipantId, balances: &BalanceSheet) -> f64 {
        let Some(balance) = balances.get(id) else {
            return self.floor;
        };
        let net = balance.net();
        if net > 0.0 { net } else { self.floor }
    }

    /// Weights for each participant, in the same order.
    pub fn weights_for(&self, participants: &[Participant], balances: &BalanceSheet) -> Vec<f64> {
        participants
            .iter()
            .map(|p| self.weight(&p.id, balances))
            .collect()
    }
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self { floor: DEFAULT_FLOOR_WEIGHT }
    }
}

/// Weight for a participant under the default floor of 1.
pub fn compute_weight(id: &ParticipantId, balances: &BalanceSheet) -> f64 {
    WeightPolicy::default().weight(id, balances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fate_core::Balance;

    fn sheet() -> BalanceSheet {
        BalanceSheet::new()
            .with("debtor", Balance::new().with_owes("x", 12.5).with_is_owed("y", 2.5))
            .with("even", Balance::new().with_owes("x", 4.0).with_is_owed("y", 4.0))
            .with("creditor", Balance::new().with_is_owed("x", 5.0))
    }

    #[test]
    fn test_debtor_weight_is_net() {
        assert_eq!(compute_weight(&"debtor".into(), &sheet()), 10.0);
    }

    #[test]
    fn test_non_debtors_get_floor() {
        let sheet = sheet();
        assert_eq!(compute_weight(&"even".into(), &sheet), 1.0);
        assert_eq!(compute_weight(&"creditor".into(), &sheet), 1.0);
        assert_eq!(compute_weight(&"absent".into(), &sheet), 1.0);
    }

    #[test]
    fn test_custom_floor() {
        let policy = WeightPolicy::new(2.5).unwrap();
        let sheet = sheet();
        assert_eq!(policy.weight(&"creditor".into(), &sheet), 2.5);
        assert_eq!(policy.weight(&"debtor".into(), &sheet), 10.0);
    }

    #[test]
    fn test_rejects_bad_floor() {
        assert_eq!(WeightPolicy::new(0.0), Err(SelectionError::InvalidFloor(0.0)));
        assert!(WeightPolicy::new(-1.0).is_err());
        assert!(WeightPolicy::new(f64::NAN).is_err());
        assert!(WeightPolicy::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_weights_follow_participant_order() {
        let participants = vec![
            Participant::new("creditor", "C"),
            Participant::new("debtor", "D"),
        ];
        let weights = WeightPolicy::default().weights_for(&participants, &sheet());
        assert_eq!(weights, vec![1.0, 10.0]);
    }
}
