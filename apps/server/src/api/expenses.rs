use std::sync::Arc;

use crate::{
    auth::UserId,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use budgetwise_core::{
    expenses::{Expense, ExpenseFilter, ExpenseUpdate, NewExpense},
    utils::time_utils::{end_of_day, start_of_day},
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseQuery {
    category_id: Option<String>,
    /// Inclusive `YYYY-MM-DD` bounds
    from: Option<String>,
    to: Option<String>,
}

fn parse_day(value: &str, field: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ApiError::BadRequest(format!("'{}' must be a YYYY-MM-DD date, got '{}'", field, value))
    })
}

impl ExpenseQuery {
    fn into_filter(self) -> ApiResult<ExpenseFilter> {
        let start = self
            .from
            .as_deref()
            .map(|d| parse_day(d, "from"))
            .transpose()?
            .map(start_of_day);
        let end = self
            .to
            .as_deref()
            .map(|d| parse_day(d, "to"))
            .transpose()?
            .map(end_of_day);
        Ok(ExpenseFilter {
            category_id: self.category_id.filter(|c| !c.is_empty()),
            start,
            end,
        })
    }
}

async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Query(q): Query<ExpenseQuery>,
) -> ApiResult<Json<Vec<Expense>>> {
    let filter = q.into_filter()?;
    let expenses = state
        .expense_service
        .list_expenses(user.as_str(), &filter)?;
    Ok(Json(expenses))
}

async fn list_recent_expenses(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<Json<Vec<Expense>>> {
    let expenses = state.expense_service.list_recent_expenses(user.as_str())?;
    Ok(Json(expenses))
}

async fn get_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<Json<Expense>> {
    let expense = state.expense_service.get_expense(user.as_str(), &id)?;
    Ok(Json(expense))
}

/// Records the expense; the budget check runs afterwards on the event worker.
async fn create_expense(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Json(expense): Json<NewExpense>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let created = state
        .expense_service
        .create_expense(user.as_str(), expense)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Json(update): Json<ExpenseUpdate>,
) -> ApiResult<Json<Expense>> {
    let updated = state
        .expense_service
        .update_expense(user.as_str(), &id, update)
        .await?;
    Ok(Json(updated))
}

async fn delete_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<StatusCode> {
    let _ = state
        .expense_service
        .delete_expense(user.as_str(), &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/recent", get(list_recent_expenses))
        .route(
            "/expenses/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}
