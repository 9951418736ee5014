use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use crate::categories::CategoryRepositoryTrait;
use crate::constants::{
    EXPENSE_DESCRIPTION_MAX_LEN, EXPENSE_DESCRIPTION_MIN_LEN, RECENT_EXPENSES_LIMIT,
};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::expenses::expenses_model::{Expense, ExpenseFilter, ExpenseUpdate, NewExpense};
use crate::expenses::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};

pub struct ExpenseService {
    expense_repo: Arc<dyn ExpenseRepositoryTrait>,
    category_repo: Arc<dyn CategoryRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl ExpenseService {
    pub fn new(
        expense_repo: Arc<dyn ExpenseRepositoryTrait>,
        category_repo: Arc<dyn CategoryRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        ExpenseService {
            expense_repo,
            category_repo,
            event_sink,
        }
    }

    fn normalize_description(description: &str) -> Result<String> {
        let trimmed = description.trim();
        let len = trimmed.chars().count();
        if !(EXPENSE_DESCRIPTION_MIN_LEN..=EXPENSE_DESCRIPTION_MAX_LEN).contains(&len) {
            return Err(Error::invalid_input(format!(
                "Description must be between {} and {} characters",
                EXPENSE_DESCRIPTION_MIN_LEN, EXPENSE_DESCRIPTION_MAX_LEN
            )));
        }
        Ok(trimmed.to_string())
    }

    fn validate_amount(amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::invalid_input("Amount must be greater than zero"));
        }
        Ok(())
    }

    fn ensure_category(&self, user_id: &str, category_id: &str) -> Result<()> {
        match self.category_repo.get_category_by_id(user_id, category_id)? {
            Some(_) => Ok(()),
            None => Err(Error::NotFound(format!("Category {}", category_id))),
        }
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense> {
        self.expense_repo
            .get_expense_by_id(user_id, expense_id)?
            .ok_or_else(|| Error::NotFound(format!("Expense {}", expense_id)))
    }

    fn list_expenses(&self, user_id: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        if let (Some(start), Some(end)) = (filter.start, filter.end) {
            if end < start {
                return Err(Error::invalid_input("'to' must not be before 'from'"));
            }
        }
        self.expense_repo.list_expenses(user_id, filter)
    }

    fn list_recent_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        self.expense_repo
            .list_recent_expenses(user_id, RECENT_EXPENSES_LIMIT)
    }

    async fn create_expense(&self, user_id: &str, new_expense: NewExpense) -> Result<Expense> {
        let description = Self::normalize_description(&new_expense.description)?;
        Self::validate_amount(new_expense.amount)?;
        self.ensure_category(user_id, &new_expense.category_id)?;

        let created = self
            .expense_repo
            .create_expense(NewExpense {
                user_id: user_id.to_string(),
                description,
                ..new_expense
            })
            .await?;
        debug!(
            "Created expense {} of {} in category {}",
            created.id, created.amount, created.category_id
        );

        self.event_sink
            .emit(DomainEvent::expense_created(user_id, created.clone()));
        Ok(created)
    }

    async fn update_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        update: ExpenseUpdate,
    ) -> Result<Expense> {
        self.get_expense(user_id, expense_id)?;

        let description = update
            .description
            .as_deref()
            .map(Self::normalize_description)
            .transpose()?;
        if let Some(amount) = update.amount {
            Self::validate_amount(amount)?;
        }
        if let Some(ref category_id) = update.category_id {
            self.ensure_category(user_id, category_id)?;
        }

        self.expense_repo
            .update_expense(
                user_id,
                expense_id,
                ExpenseUpdate {
                    description,
                    ..update
                },
            )
            .await
    }

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<usize> {
        self.get_expense(user_id, expense_id)?;
        self.expense_repo.delete_expense(user_id, expense_id).await
    }
}
