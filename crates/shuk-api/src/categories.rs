use axum::{
    Json,
    extract::{Path, State},
};

use shuk_types::Category;

use crate::error::ApiError;
use crate::state::{AppState, run_db};

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    run_db(&state, "Failed to fetch categories", |db| db.list_categories())
        .await
        .map(Json)
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Category>, ApiError> {
    run_db(&state, "Failed to fetch category", move |db| db.get_category_by_slug(&slug))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Category"))
}
