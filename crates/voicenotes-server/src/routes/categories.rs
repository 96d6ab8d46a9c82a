//! Category endpoints.

use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use voicenotes_store::Category;

use crate::extract::JsonBody;
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories_handler(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.storage.list_categories())
}

/// POST /api/categories
///
/// `id` and `color` are optional in the body; `name` is required.
pub async fn create_category_handler(
    State(state): State<AppState>,
    JsonBody(category): JsonBody<Category>,
) -> (StatusCode, Json<Category>) {
    let category = state.storage.add_category(category);
    info!(category_id = %category.id, name = %category.name, "Category created");
    (StatusCode::CREATED, Json(category))
}
