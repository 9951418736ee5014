use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::expenses::expenses_model::{Expense, ExpenseFilter, ExpenseUpdate, NewExpense};
use async_trait::async_trait;

/// Trait for expense repository operations
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    fn get_expense_by_id(&self, user_id: &str, expense_id: &str) -> Result<Option<Expense>>;

    /// Expenses matching the filter, newest first
    fn list_expenses(&self, user_id: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>>;

    fn list_recent_expenses(&self, user_id: &str, limit: i64) -> Result<Vec<Expense>>;

    /// Expenses in one category dated within `[start, end]`
    fn list_category_expenses_between(
        &self,
        user_id: &str,
        category_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Expense>>;

    /// Total of the category's expenses dated within `[start, end]`
    fn sum_category_expenses_between(
        &self,
        user_id: &str,
        category_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Decimal> {
        Ok(self
            .list_category_expenses_between(user_id, category_id, start, end)?
            .iter()
            .map(|e| e.amount)
            .sum())
    }

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense>;

    async fn update_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        update: ExpenseUpdate,
    ) -> Result<Expense>;

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<usize>;
}

/// Trait for expense service operations
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense>;

    fn list_expenses(&self, user_id: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>>;

    fn list_recent_expenses(&self, user_id: &str) -> Result<Vec<Expense>>;

    /// Records an expense and announces it to the domain event sink.
    async fn create_expense(&self, user_id: &str, new_expense: NewExpense) -> Result<Expense>;

    async fn update_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        update: ExpenseUpdate,
    ) -> Result<Expense>;

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<usize>;
}
