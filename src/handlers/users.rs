use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::middleware::{ApiResponse, ApiResult};
use crate::models::User;
use crate::state::AppState;

use super::utils::candidate_from_body;

/// GET /users/
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.users.list_all().await?;
    Ok(ApiResponse::success(users))
}

/// POST /user/
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<User> {
    let candidate: User = candidate_from_body(payload)?;
    let created = state.users.create_one(&candidate).await?;
    Ok(ApiResponse::created(created))
}
