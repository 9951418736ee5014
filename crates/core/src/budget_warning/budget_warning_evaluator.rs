use std::sync::Arc;

use log::{debug, error, info, warn};
use num_traits::ToPrimitive;
use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::budgets::BudgetRepositoryTrait;
use crate::categories::CategoryRepositoryTrait;
use crate::constants::{BUDGET_LINK_PREFIX, BUDGET_WARNING_THRESHOLD, UNKNOWN_CATEGORY_LABEL};
use crate::errors::Result;
use crate::expenses::{Expense, ExpenseRepositoryTrait};
use crate::notifications::{
    NewNotification, Notification, NotificationRepositoryTrait, NotificationType,
};
use crate::utils::time_utils::{local_now, MonthWindow};

/// What a single evaluation decided.
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetWarningOutcome {
    /// The expense's category has no budget.
    NoBudget,
    /// The expense is dated outside the current calendar month.
    OutsideCurrentMonth,
    /// The budget's ceiling is zero or negative, so no ratio exists.
    InvalidBudgetAmount,
    /// A warning for this budget was already raised this month.
    AlreadyWarned,
    BelowThreshold { percent: i64 },
    Created(Notification),
}

/// `spent / amount`, or `None` when the ceiling is not positive.
pub fn spending_ratio(spent: Decimal, amount: Decimal) -> Option<Decimal> {
    if amount <= Decimal::ZERO {
        return None;
    }
    spent.checked_div(amount)
}

/// Strictly above the threshold; exactly 90% does not warn.
pub fn exceeds_threshold(ratio: Decimal) -> bool {
    ratio > BUDGET_WARNING_THRESHOLD
}

/// Ratio as a whole percentage, halves rounded away from zero.
pub fn rounded_percent(ratio: Decimal) -> i64 {
    (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}

pub fn warning_message(percent: i64, category_name: &str) -> String {
    format!(
        "You have spent {}% of your budget for '{}'.",
        percent, category_name
    )
}

pub fn budget_link(budget_id: &str) -> String {
    format!("{}{}", BUDGET_LINK_PREFIX, budget_id)
}

type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Raises at most one budget warning per budget and calendar month.
///
/// Only expenses dated in the current month are checked. Warnings are
/// stamped with the time they are raised.
pub struct BudgetWarningEvaluator {
    budget_repo: Arc<dyn BudgetRepositoryTrait>,
    category_repo: Arc<dyn CategoryRepositoryTrait>,
    expense_repo: Arc<dyn ExpenseRepositoryTrait>,
    notification_repo: Arc<dyn NotificationRepositoryTrait>,
    clock: Clock,
}

impl BudgetWarningEvaluator {
    pub fn new(
        budget_repo: Arc<dyn BudgetRepositoryTrait>,
        category_repo: Arc<dyn CategoryRepositoryTrait>,
        expense_repo: Arc<dyn ExpenseRepositoryTrait>,
        notification_repo: Arc<dyn NotificationRepositoryTrait>,
    ) -> Self {
        Self {
            budget_repo,
            category_repo,
            expense_repo,
            notification_repo,
            clock: Arc::new(local_now),
        }
    }

    /// Replaces the source of "now" used for the current month and for
    /// stamping new warnings.
    pub fn with_clock(
        mut self,
        clock: impl Fn() -> NaiveDateTime + Send + Sync + 'static,
    ) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Checks the expense's category budget for the current month.
    pub async fn evaluate(&self, user_id: &str, expense: &Expense) -> Result<BudgetWarningOutcome> {
        let Some(budget) = self
            .budget_repo
            .get_budget_for_category(user_id, &expense.category_id)?
        else {
            return Ok(BudgetWarningOutcome::NoBudget);
        };

        let now = (self.clock)();
        let window = MonthWindow::containing(now);
        if !window.contains(expense.date) {
            debug!(
                "Expense {} dated {} is outside {}; skipping budget check",
                expense.id,
                expense.date,
                window.month_key()
            );
            return Ok(BudgetWarningOutcome::OutsideCurrentMonth);
        }

        let category_name = match self
            .category_repo
            .get_category_by_id(user_id, &expense.category_id)
        {
            Ok(Some(category)) => category.name,
            Ok(None) => UNKNOWN_CATEGORY_LABEL.to_string(),
            Err(e) => {
                warn!(
                    "Could not resolve category {} for budget warning: {}",
                    expense.category_id, e
                );
                UNKNOWN_CATEGORY_LABEL.to_string()
            }
        };

        let spent = self.expense_repo.sum_category_expenses_between(
            user_id,
            &expense.category_id,
            window.start,
            window.end,
        )?;

        let link = budget_link(&budget.id);
        if self
            .notification_repo
            .find_budget_warning_since(user_id, &link, window.start)?
            .is_some()
        {
            return Ok(BudgetWarningOutcome::AlreadyWarned);
        }

        let Some(ratio) = spending_ratio(spent, budget.amount) else {
            warn!(
                "Budget {} has non-positive amount {}; skipping warning check",
                budget.id, budget.amount
            );
            return Ok(BudgetWarningOutcome::InvalidBudgetAmount);
        };

        let percent = rounded_percent(ratio);
        if !exceeds_threshold(ratio) {
            return Ok(BudgetWarningOutcome::BelowThreshold { percent });
        }

        let created = self
            .notification_repo
            .create_budget_warning_if_absent(
                NewNotification {
                    id: None,
                    user_id: user_id.to_string(),
                    message: warning_message(percent, &category_name),
                    notification_type: NotificationType::BudgetWarning,
                    created_at: now,
                    link: Some(link),
                },
                window.start,
            )
            .await?;

        Ok(match created {
            Some(notification) => BudgetWarningOutcome::Created(notification),
            None => BudgetWarningOutcome::AlreadyWarned,
        })
    }

    /// Runs [`evaluate`](Self::evaluate) as a side effect: failures are logged
    /// and never returned to the caller.
    pub async fn check_and_notify(&self, user_id: &str, expense: &Expense) -> Option<Notification> {
        match self.evaluate(user_id, expense).await {
            Ok(BudgetWarningOutcome::Created(notification)) => {
                info!(
                    "Budget warning {} raised for user {}: {}",
                    notification.id, user_id, notification.message
                );
                Some(notification)
            }
            Ok(outcome) => {
                debug!(
                    "No budget warning for expense {}: {:?}",
                    expense.id, outcome
                );
                None
            }
            Err(e) => {
                error!(
                    "Budget warning check failed for expense {}: {}",
                    expense.id, e
                );
                None
            }
        }
    }
}
