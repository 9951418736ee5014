//! In-memory repositories shared by the service tests.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::budgets::{Budget, BudgetRepositoryTrait, BudgetUpdate, NewBudget};
use crate::categories::{Category, CategoryRepositoryTrait, CategoryUpdate, NewCategory};
use crate::errors::{DatabaseError, Error, Result};
use crate::expenses::{Expense, ExpenseFilter, ExpenseRepositoryTrait, ExpenseUpdate, NewExpense};
use crate::notifications::{
    NewNotification, Notification, NotificationRepositoryTrait, NotificationType,
};

pub fn dt(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn seeded_at() -> NaiveDateTime {
    dt("2024-01-01 00:00:00")
}

#[derive(Default)]
pub struct InMemoryStore {
    categories: Mutex<Vec<Category>>,
    budgets: Mutex<Vec<Budget>>,
    expenses: Mutex<Vec<Expense>>,
    notifications: Mutex<Vec<Notification>>,
    next_id: AtomicU64,
    failing: AtomicBool,
}

impl InMemoryStore {
    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Makes every repository call fail with a database error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryFailed("store unavailable".into()).into());
        }
        Ok(())
    }

    pub fn seed_category(&self, user_id: &str, name: &str) -> Category {
        let category = Category {
            id: self.next_id("cat"),
            user_id: user_id.to_string(),
            name: name.to_string(),
            icon_name: None,
            created_at: seeded_at(),
            updated_at: seeded_at(),
        };
        self.categories.lock().unwrap().push(category.clone());
        category
    }

    pub fn seed_budget(&self, user_id: &str, category_id: &str, amount: &str) -> Budget {
        let budget = Budget {
            id: self.next_id("budget"),
            user_id: user_id.to_string(),
            category_id: category_id.to_string(),
            amount: dec(amount),
            created_at: seeded_at(),
            updated_at: seeded_at(),
        };
        self.budgets.lock().unwrap().push(budget.clone());
        budget
    }

    pub fn seed_expense(&self, user_id: &str, category_id: &str, amount: &str, date: &str) -> Expense {
        let date = dt(date);
        let expense = Expense {
            id: self.next_id("exp"),
            user_id: user_id.to_string(),
            description: "Seeded expense".to_string(),
            amount: dec(amount),
            category_id: category_id.to_string(),
            date,
            created_at: date,
            updated_at: date,
        };
        self.expenses.lock().unwrap().push(expense.clone());
        expense
    }

    pub fn seed_budget_warning(&self, user_id: &str, link: &str, created_at: &str) -> Notification {
        let notification = Notification {
            id: self.next_id("notif"),
            user_id: user_id.to_string(),
            message: "Seeded warning".to_string(),
            notification_type: NotificationType::BudgetWarning,
            read: false,
            created_at: dt(created_at),
            link: Some(link.to_string()),
        };
        self.notifications.lock().unwrap().push(notification.clone());
        notification
    }

    pub fn notifications_for(&self, user_id: &str) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    fn find_warning(&self, user_id: &str, link: &str, since: NaiveDateTime) -> Option<Notification> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| {
                n.user_id == user_id
                    && n.notification_type == NotificationType::BudgetWarning
                    && n.link.as_deref() == Some(link)
                    && n.created_at >= since
            })
            .max_by_key(|n| n.created_at)
            .cloned()
    }

    fn insert_notification(&self, new_notification: NewNotification) -> Notification {
        let notification = Notification {
            id: new_notification
                .id
                .unwrap_or_else(|| self.next_id("notif")),
            user_id: new_notification.user_id,
            message: new_notification.message,
            notification_type: new_notification.notification_type,
            read: false,
            created_at: new_notification.created_at,
            link: new_notification.link,
        };
        self.notifications.lock().unwrap().push(notification.clone());
        notification
    }
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryStore {
    fn get_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.check()?;
        let mut categories: Vec<Category> = self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    fn get_category_by_id(&self, user_id: &str, category_id: &str) -> Result<Option<Category>> {
        self.check()?;
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user_id == user_id && c.id == category_id)
            .cloned())
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        self.check()?;
        let category = Category {
            id: new_category.id.unwrap_or_else(|| self.next_id("cat")),
            user_id: new_category.user_id,
            name: new_category.name,
            icon_name: new_category.icon_name,
            created_at: seeded_at(),
            updated_at: seeded_at(),
        };
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        user_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category> {
        self.check()?;
        let mut categories = self.categories.lock().unwrap();
        let category = categories
            .iter_mut()
            .find(|c| c.user_id == user_id && c.id == category_id)
            .ok_or_else(|| Error::NotFound(format!("Category {}", category_id)))?;
        if let Some(name) = update.name {
            category.name = name;
        }
        if update.icon_name.is_some() {
            category.icon_name = update.icon_name;
        }
        Ok(category.clone())
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<usize> {
        self.check()?;
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| !(c.user_id == user_id && c.id == category_id));
        Ok(before - categories.len())
    }

    fn count_references(&self, user_id: &str, category_id: &str) -> Result<i64> {
        self.check()?;
        let expenses = self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id && e.category_id == category_id)
            .count();
        let budgets = self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id && b.category_id == category_id)
            .count();
        Ok((expenses + budgets) as i64)
    }
}

#[async_trait]
impl BudgetRepositoryTrait for InMemoryStore {
    fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        self.check()?;
        Ok(self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    fn get_budget_by_id(&self, user_id: &str, budget_id: &str) -> Result<Option<Budget>> {
        self.check()?;
        Ok(self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.user_id == user_id && b.id == budget_id)
            .cloned())
    }

    fn get_budget_for_category(&self, user_id: &str, category_id: &str) -> Result<Option<Budget>> {
        self.check()?;
        Ok(self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.user_id == user_id && b.category_id == category_id)
            .cloned())
    }

    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        self.check()?;
        let budget = Budget {
            id: new_budget.id.unwrap_or_else(|| self.next_id("budget")),
            user_id: new_budget.user_id,
            category_id: new_budget.category_id,
            amount: new_budget.amount,
            created_at: seeded_at(),
            updated_at: seeded_at(),
        };
        self.budgets.lock().unwrap().push(budget.clone());
        Ok(budget)
    }

    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget> {
        self.check()?;
        let mut budgets = self.budgets.lock().unwrap();
        let budget = budgets
            .iter_mut()
            .find(|b| b.user_id == user_id && b.id == budget_id)
            .ok_or_else(|| Error::NotFound(format!("Budget {}", budget_id)))?;
        budget.amount = update.amount;
        Ok(budget.clone())
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<usize> {
        self.check()?;
        let mut budgets = self.budgets.lock().unwrap();
        let before = budgets.len();
        budgets.retain(|b| !(b.user_id == user_id && b.id == budget_id));
        Ok(before - budgets.len())
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for InMemoryStore {
    fn get_expense_by_id(&self, user_id: &str, expense_id: &str) -> Result<Option<Expense>> {
        self.check()?;
        Ok(self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.user_id == user_id && e.id == expense_id)
            .cloned())
    }

    fn list_expenses(&self, user_id: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        self.check()?;
        let mut expenses: Vec<Expense> = self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id && filter.matches(e))
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    fn list_recent_expenses(&self, user_id: &str, limit: i64) -> Result<Vec<Expense>> {
        let mut expenses = self.list_expenses(user_id, &ExpenseFilter::default())?;
        expenses.truncate(limit.max(0) as usize);
        Ok(expenses)
    }

    fn list_category_expenses_between(
        &self,
        user_id: &str,
        category_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Expense>> {
        self.list_expenses(
            user_id,
            &ExpenseFilter {
                category_id: Some(category_id.to_string()),
                start: Some(start),
                end: Some(end),
            },
        )
    }

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        self.check()?;
        let expense = Expense {
            id: new_expense.id.unwrap_or_else(|| self.next_id("exp")),
            user_id: new_expense.user_id,
            description: new_expense.description,
            amount: new_expense.amount,
            category_id: new_expense.category_id,
            date: new_expense.date,
            created_at: new_expense.date,
            updated_at: new_expense.date,
        };
        self.expenses.lock().unwrap().push(expense.clone());
        Ok(expense)
    }

    async fn update_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        update: ExpenseUpdate,
    ) -> Result<Expense> {
        self.check()?;
        let mut expenses = self.expenses.lock().unwrap();
        let expense = expenses
            .iter_mut()
            .find(|e| e.user_id == user_id && e.id == expense_id)
            .ok_or_else(|| Error::NotFound(format!("Expense {}", expense_id)))?;
        if let Some(description) = update.description {
            expense.description = description;
        }
        if let Some(amount) = update.amount {
            expense.amount = amount;
        }
        if let Some(category_id) = update.category_id {
            expense.category_id = category_id;
        }
        if let Some(date) = update.date {
            expense.date = date;
        }
        Ok(expense.clone())
    }

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<usize> {
        self.check()?;
        let mut expenses = self.expenses.lock().unwrap();
        let before = expenses.len();
        expenses.retain(|e| !(e.user_id == user_id && e.id == expense_id));
        Ok(before - expenses.len())
    }
}

#[async_trait]
impl NotificationRepositoryTrait for InMemoryStore {
    fn get_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        self.check()?;
        let mut notifications = self.notifications_for(user_id);
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    fn count_unread(&self, user_id: &str) -> Result<i64> {
        self.check()?;
        Ok(self
            .notifications_for(user_id)
            .iter()
            .filter(|n| !n.read)
            .count() as i64)
    }

    fn find_budget_warning_since(
        &self,
        user_id: &str,
        link: &str,
        since: NaiveDateTime,
    ) -> Result<Option<Notification>> {
        self.check()?;
        Ok(self.find_warning(user_id, link, since))
    }

    async fn create_notification(&self, new_notification: NewNotification) -> Result<Notification> {
        self.check()?;
        Ok(self.insert_notification(new_notification))
    }

    async fn create_budget_warning_if_absent(
        &self,
        new_notification: NewNotification,
        since: NaiveDateTime,
    ) -> Result<Option<Notification>> {
        self.check()?;
        let link = new_notification.link.clone().unwrap_or_default();
        if self
            .find_warning(&new_notification.user_id, &link, since)
            .is_some()
        {
            return Ok(None);
        }
        Ok(Some(self.insert_notification(new_notification)))
    }

    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<usize> {
        self.check()?;
        let mut notifications = self.notifications.lock().unwrap();
        let mut updated = 0;
        for n in notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && n.id == notification_id)
        {
            n.read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        self.check()?;
        let mut notifications = self.notifications.lock().unwrap();
        let mut updated = 0;
        for n in notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.read)
        {
            n.read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete_notification(&self, user_id: &str, notification_id: &str) -> Result<usize> {
        self.check()?;
        let mut notifications = self.notifications.lock().unwrap();
        let before = notifications.len();
        notifications.retain(|n| !(n.user_id == user_id && n.id == notification_id));
        Ok(before - notifications.len())
    }
}
