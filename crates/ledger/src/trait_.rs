//! Balance store trait abstraction.

use std::sync::Arc;
use fate_core::{BalanceSheet, Participant, ParticipantId};

/// Error type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while recording or loading balances.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Participant is not part of the group
    #[error("Unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    /// Participant id already registered
    #[error("Duplicate participant: {0}")]
    DuplicateParticipant(ParticipantId),

    /// Amount is negative, NaN or infinite
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// Expense shared by nobody
    #[error("Expense '{0}' has no participants")]
    NoParticipants(String),

    /// Settlement from a participant to themselves
    #[error("Cannot settle with self: {0}")]
    SelfSettlement(ParticipantId),
}

/// Handle returned by [`BalanceStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Receives the new balance sheet after every change.
pub trait BalanceListener: Send + Sync {
    /// Called synchronously once the store has applied a change.
    fn on_balances_changed(&self, sheet: &BalanceSheet);
}

impl<F> BalanceListener for F
where
    F: Fn(&BalanceSheet) + Send + Sync,
{
    fn on_balances_changed(&self, sheet: &BalanceSheet) {
        self(sheet)
    }
}

/// Source of participants and their balances.
///
/// Callers query [`BalanceStore::snapshot`] right before each draw; listeners
/// are told about changes explicitly instead of through a global event bus.
pub trait BalanceStore: Send + Sync {
    /// All participants known to the store, in registration order.
    fn participants(&self) -> Vec<Participant>;

    /// Current balances for every participant.
    fn snapshot(&self) -> BalanceSheet;

    /// Register a listener for balance changes.
    fn subscribe(&mut self, listener: Arc<dyn BalanceListener>) -> SubscriptionId;

    /// Remove a listener. Returns false if the id was not registered.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}
