//! Budget warning evaluation run after an expense is recorded.

mod budget_warning_evaluator;

#[cfg(test)]
mod budget_warning_evaluator_tests;

pub use budget_warning_evaluator::{
    budget_link, exceeds_threshold, rounded_percent, spending_ratio, warning_message,
    BudgetWarningEvaluator, BudgetWarningOutcome,
};
