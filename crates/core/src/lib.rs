//! Wheel of Fate core data models.
//!
//! This crate defines the participants, balances and ledger entries that the
//! fairness selector and the balance store exchange.

#![warn(missing_docs)]

// Core identities
mod id;

// Who takes part
mod participant;

// Money owed between participants
mod balance;
mod expense;

// Re-exports
pub use id::*;

pub use participant::Participant;
pub use balance::{Balance, BalanceSheet};
pub use expense::{Expense, Settlement, SettlementMethod};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
