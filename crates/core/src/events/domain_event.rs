//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::expenses::Expense;

/// Domain events emitted by core services after successful mutations.
///
/// Runtime adapters translate them into follow-up work such as the
/// budget warning check.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// An expense was durably recorded.
    ExpenseCreated { user_id: String, expense: Expense },
}

impl DomainEvent {
    pub fn expense_created(user_id: impl Into<String>, expense: Expense) -> Self {
        DomainEvent::ExpenseCreated {
            user_id: user_id.into(),
            expense,
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            DomainEvent::ExpenseCreated { user_id, .. } => user_id,
        }
    }
}
