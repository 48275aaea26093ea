use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub const WELCOME_MESSAGE: &str = "Hello from FastAPI with Supabase!";

/// GET / - Welcome message
pub async fn root() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

/// GET /health - Liveness probe; does not touch the store
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "app": &*state.app_name,
        "timestamp": chrono::Utc::now(),
    }))
}
