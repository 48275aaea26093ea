use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Item;
use crate::state::AppState;

use super::utils::candidate_from_body;

/// GET /items/ - List every item
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Item>> {
    let items = state.items.list_all().await?;
    Ok(ApiResponse::success(items))
}

/// POST /items/ - Create one item, returning it with its store-assigned id
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Item> {
    let candidate: Item = candidate_from_body(payload)?;
    let created = state.items.create_one(&candidate).await?;
    Ok(ApiResponse::created(created))
}
