use std::sync::Arc;

use crate::{auth::UserId, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use budgetwise_core::{
    budgets::{Budget, BudgetUpdate, BudgetWithSpent, NewBudget},
    utils::time_utils::MonthWindow,
};
use serde::Deserialize;

async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<Json<Vec<Budget>>> {
    let budgets = state.budget_service.get_budgets(user.as_str())?;
    Ok(Json(budgets))
}

#[derive(Deserialize)]
struct MonthQuery {
    /// `YYYY-MM`; the current month when absent
    month: Option<String>,
}

/// Resolves an optional `YYYY-MM` query value into a month window.
pub(crate) fn month_or_current(month: Option<&str>) -> ApiResult<MonthWindow> {
    match month {
        Some(m) => Ok(MonthWindow::parse_month(m)?),
        None => Ok(MonthWindow::current()),
    }
}

async fn list_budgets_with_spent(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Query(q): Query<MonthQuery>,
) -> ApiResult<Json<Vec<BudgetWithSpent>>> {
    let month = month_or_current(q.month.as_deref())?;
    let budgets = state
        .budget_service
        .get_budgets_with_spent(user.as_str(), month)?;
    Ok(Json(budgets))
}

async fn get_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<Json<Budget>> {
    let budget = state.budget_service.get_budget(user.as_str(), &id)?;
    Ok(Json(budget))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Json(budget): Json<NewBudget>,
) -> ApiResult<(StatusCode, Json<Budget>)> {
    let created = state
        .budget_service
        .create_budget(user.as_str(), budget)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Json(update): Json<BudgetUpdate>,
) -> ApiResult<Json<Budget>> {
    let updated = state
        .budget_service
        .update_budget(user.as_str(), &id, update)
        .await?;
    Ok(Json(updated))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<StatusCode> {
    let _ = state.budget_service.delete_budget(user.as_str(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/with-spent", get(list_budgets_with_spent))
        .route(
            "/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
}
