//! Expense and settlement records - the inputs balances are derived from.

use serde::{Deserialize, Serialize};
use crate::id::{ExpenseId, ParticipantId, SettlementId};
use crate::Time;

/// A shared expense paid by one participant and split among several.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier
    #[serde(default)]
    pub id: ExpenseId,

    /// What the money was spent on
    pub description: String,

    /// Total amount paid
    pub amount: f64,

    /// Who paid
    pub paid_by: ParticipantId,

    /// Who shares the cost (the payer may or may not be included)
    pub participants: Vec<ParticipantId>,

    /// When it happened
    #[serde(default = "chrono::Utc::now")]
    pub date: Time,

    /// Free-form category such as "food" or "travel"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Expense {
    /// Create a new expense dated now.
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        paid_by: impl Into<ParticipantId>,
        participants: Vec<ParticipantId>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            participants,
            date: chrono::Utc::now(),
            category: None,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Equal share owed by each participant.
    pub fn share(&self) -> f64 {
        if self.participants.is_empty() {
            return 0.0;
        }
        self.amount / self.participants.len() as f64
    }
}

/// How a debt was settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementMethod {
    /// Paid back directly
    #[default]
    Normal,
    /// Cleared by playing a debt game
    Game,
}

/// A repayment from one participant to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    /// Unique identifier
    #[serde(default)]
    pub id: SettlementId,

    /// Who paid back
    pub from: ParticipantId,

    /// Who received the money
    pub to: ParticipantId,

    /// Amount repaid
    pub amount: f64,

    /// When it happened
    #[serde(default = "chrono::Utc::now")]
    pub date: Time,

    /// Settlement method
    #[serde(default)]
    pub method: SettlementMethod,
}

impl Settlement {
    /// Create a normal settlement dated now.
    pub fn new(from: impl Into<ParticipantId>, to: impl Into<ParticipantId>, amount: f64) -> Self {
        Self {
            id: SettlementId::new(),
            from: from.into(),
            to: to.into(),
            amount,
            date: chrono::Utc::now(),
            method: SettlementMethod::Normal,
        }
    }

    /// Set the settlement method.
    pub fn with_method(mut self, method: SettlementMethod) -> Self {
        self.method = method;
        self
    }
}
