use std::sync::Arc;

use crate::{auth::UserId, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use budgetwise_core::categories::{Category, CategoryUpdate, NewCategory};

async fn list_categories(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.category_service.get_categories(user.as_str())?;
    Ok(Json(categories))
}

async fn get_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<Json<Category>> {
    let category = state.category_service.get_category(user.as_str(), &id)?;
    Ok(Json(category))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Json(category): Json<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let created = state
        .category_service
        .create_category(user.as_str(), category)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Json(update): Json<CategoryUpdate>,
) -> ApiResult<Json<Category>> {
    let updated = state
        .category_service
        .update_category(user.as_str(), &id, update)
        .await?;
    Ok(Json(updated))
}

async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
) -> ApiResult<StatusCode> {
    let _ = state
        .category_service
        .delete_category(user.as_str(), &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}
