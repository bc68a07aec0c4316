//! Balance store abstraction and implementations for Wheel of Fate.
//!
//! This crate provides a trait-based balance store with an in-memory expense
//! ledger and a JSON snapshot loader as reference implementations.

#![warn(missing_docs)]

pub mod trait_;
pub mod memory;
pub mod snapshot;

pub use trait_::{BalanceStore, BalanceListener, SubscriptionId, LedgerError, Result};
pub use memory::ExpenseLedger;
pub use snapshot::Snapshot;
