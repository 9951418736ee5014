//! BudgetWise Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules for BudgetWise: categories,
//! budgets, expenses, notifications, reports, and the budget warning check
//! that runs after each recorded expense. It is database-agnostic and
//! defines traits that are implemented by the `storage-sqlite` crate.

pub mod budget_warning;
pub mod budgets;
pub mod categories;
pub mod constants;
pub mod errors;
pub mod events;
pub mod expenses;
pub mod notifications;
pub mod reports;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
