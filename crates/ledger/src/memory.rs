//! In-memory expense ledger.
//!
//! Balances are derived from recorded expenses and settlements. Every
//! mutation recomputes the sheet and pushes it to subscribers before
//! returning, so a caller that queries [`BalanceStore::snapshot`] afterwards
//! always sees the same state the listeners saw.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use fate_core::{
    Balance, BalanceSheet, Expense, Participant, ParticipantId, Settlement,
};
use tracing::{debug, info};
use super::{BalanceListener, BalanceStore, LedgerError, Result, SubscriptionId};

/// Amounts below this are treated as settled.
const SETTLED_EPSILON: f64 = 1e-9;

/// Expense-tracking store that derives who owes whom.
pub struct ExpenseLedger {
    participants: Vec<Participant>,
    known: HashSet<ParticipantId>,
    expenses: Vec<Expense>,
    settlements: Vec<Settlement>,
    opening: BalanceSheet,
    balances: BalanceSheet,
    listeners: Vec<(SubscriptionId, Arc<dyn BalanceListener>)>,
    next_subscription: u64,
}

impl ExpenseLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
            known: HashSet::new(),
            expenses: Vec::new(),
            settlements: Vec::new(),
            opening: BalanceSheet::new(),
            balances: BalanceSheet::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a ledger with the given participants already registered.
    pub fn with_participants(participants: impl IntoIterator<Item = Participant>) -> Result<Self> {
        let mut ledger = Self::new();
        for participant in participants {
            ledger.register(participant)?;
        }
        ledger.recompute();
        Ok(ledger)
    }

    /// Seed the ledger with balances carried over from elsewhere.
    ///
    /// Opening balances are served as given and derived debts are added on
    /// top of them. Every amount must be finite and non-negative.
    pub fn with_opening_balances(mut self, opening: BalanceSheet) -> Result<Self> {
        for (_, balance) in opening.iter() {
            for amount in balance.owes.values().chain(balance.is_owed.values()) {
                validate_amount(*amount)?;
            }
        }
        self.opening = opening;
        self.recompute();
        Ok(self)
    }

    /// Register a new participant.
    pub fn add_participant(&mut self, participant: Participant) -> Result<()> {
        info!("Adding participant {} ({})", participant.id, participant.name);
        self.register(participant)?;
        self.apply();
        Ok(())
    }

    /// Record a shared expense, split equally among its participants.
    pub fn record_expense(&mut self, expense: Expense) -> Result<()> {
        validate_amount(expense.amount)?;
        if expense.participants.is_empty() {
            return Err(LedgerError::NoParticipants(expense.description));
        }
        self.ensure_known(&expense.paid_by)?;
        for id in &expense.participants {
            self.ensure_known(id)?;
        }

        info!(
            "Recording expense '{}' of {:.2} paid by {}",
            expense.description, expense.amount, expense.paid_by
        );
        self.expenses.push(expense);
        self.apply();
        Ok(())
    }

    /// Record a repayment between two participants.
    pub fn record_settlement(&mut self, settlement: Settlement) -> Result<()> {
        validate_amount(settlement.amount)?;
        self.ensure_known(&settlement.from)?;
        self.ensure_known(&settlement.to)?;
        if settlement.from == settlement.to {
            return Err(LedgerError::SelfSettlement(settlement.from));
        }

        info!(
            "Recording settlement of {:.2} from {} to {}",
            settlement.amount, settlement.from, settlement.to
        );
        self.settlements.push(settlement);
        self.apply();
        Ok(())
    }

    /// Recorded expenses, oldest first.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Recorded settlements, oldest first.
    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn register(&mut self, participant: Participant) -> Result<()> {
        if !self.known.insert(participant.id.clone()) {
            return Err(LedgerError::DuplicateParticipant(participant.id));
        }
        self.participants.push(participant);
        Ok(())
    }

    fn ensure_known(&self, id: &ParticipantId) -> Result<()> {
        if self.known.contains(id) {
            Ok(())
        } else {
            Err(LedgerError::UnknownParticipant(id.clone()))
        }
    }

    fn apply(&mut self) {
        self.recompute();
        self.notify();
    }

    fn recompute(&mut self) {
        // (low id, high id) -> signed amount, positive when low owes high
        let mut pairs: BTreeMap<(ParticipantId, ParticipantId), f64> = BTreeMap::new();
        let mut add_debt = |debtor: &ParticipantId, creditor: &ParticipantId, amount: f64| {
            if debtor < creditor {
                *pairs.entry((debtor.clone(), creditor.clone())).or_insert(0.0) += amount;
            } else {
                *pairs.entry((creditor.clone(), debtor.clone())).or_insert(0.0) -= amount;
            }
        };

        for expense in &self.expenses {
            let share = expense.share();
            for id in expense.participants.iter().filter(|id| **id != expense.paid_by) {
                add_debt(id, &expense.paid_by, share);
            }
        }

        // Repaying is a debt in the other direction that nets against the one it repays.
        for settlement in &self.settlements {
            add_debt(&settlement.to, &settlement.from, settlement.amount);
        }

        let mut sheet = self.opening.clone();
        for participant in &self.participants {
            if sheet.get(&participant.id).is_none() {
                sheet.insert(participant.id.clone(), Balance::new());
            }
        }

        let mut derived: BTreeMap<ParticipantId, Balance> = BTreeMap::new();
        for ((low, high), net) in pairs {
            if net.abs() <= SETTLED_EPSILON {
                continue;
            }
            let (from, to, owed) = if net > 0.0 {
                (low, high, net)
            } else {
                (high, low, -net)
            };
            let entry = derived.entry(to.clone()).or_default();
            *entry.is_owed.entry(from.clone()).or_insert(0.0) += owed;
            let entry = derived.entry(from).or_default();
            *entry.owes.entry(to).or_insert(0.0) += owed;
        }

        for (id, extra) in derived {
            let mut balance = sheet.get(&id).cloned().unwrap_or_default();
            for (to, amount) in extra.owes {
                *balance.owes.entry(to).or_insert(0.0) += amount;
            }
            for (from, amount) in extra.is_owed {
                *balance.is_owed.entry(from).or_insert(0.0) += amount;
            }
            sheet.insert(id, balance);
        }

        self.balances = sheet;
    }

    fn notify(&self) {
        debug!("Notifying {} balance listeners", self.listeners.len());
        for (_, listener) in &self.listeners {
            listener.on_balances_changed(&self.balances);
        }
    }
}

impl std::fmt::Debug for ExpenseLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseLedger")
            .field("participants", &self.participants)
            .field("expenses", &self.expenses.len())
            .field("settlements", &self.settlements.len())
            .field("balances", &self.balances)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for ExpenseLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceStore for ExpenseLedger {
    fn participants(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    fn snapshot(&self) -> BalanceSheet {
        self.balances.clone()
    }

    fn subscribe(&mut self, listener: Arc<dyn BalanceListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        debug!("Registered balance listener {}", id);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(amount))
    }
}
