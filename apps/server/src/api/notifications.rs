use std::sync::Arc;

use crate::{auth::UserId, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use budgetwise_core::notifications::Notification;
use serde::Serialize;

#[derive(Serialize)]
struct UnreadCount {
    count: i64,
}

#[derive(Serialize)]
struct MarkAllReadResult {
    updated: usize,
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = state.notification_service.get_notifications(user.as_str())?;
    Ok(Json(notifications))
}

async fn unread_count(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<Json<UnreadCount>> {
    let count = state.notification_service.count_unread(user.as_str())?;
    Ok(Json(UnreadCount { count }))
}

async fn mark_read(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<StatusCode> {
    state
        .notification_service
        .mark_read(user.as_str(), &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<Json<MarkAllReadResult>> {
    let updated = state
        .notification_service
        .mark_all_read(user.as_str())
        .await?;
    Ok(Json(MarkAllReadResult { updated }))
}

async fn delete_notification(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<StatusCode> {
    state
        .notification_service
        .delete_notification(user.as_str(), &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/read-all", post(mark_all_read))
        .route("/notifications/{id}/read", post(mark_read))
        .route("/notifications/{id}", delete(delete_notification))
}
