use axum::{
    extract::OriginalUri,
    middleware,
    response::Redirect,
    routing::{any, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::not_found_middleware;
use crate::state::AppState;

/// Full HTTP surface with its global middleware
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health))
        .merge(item_routes())
        .merge(user_routes())
        // Global middleware
        .layer(middleware::from_fn(not_found_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn item_routes() -> Router<AppState> {
    use handlers::items;

    Router::new()
        .route("/items/", get(items::list).post(items::create))
        .route("/items", any(add_trailing_slash))
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new()
        .route("/users/", get(users::list))
        .route("/users", any(add_trailing_slash))
        .route("/user/", post(users::create))
        .route("/user", any(add_trailing_slash))
}

/// 307 to the slash form of the requested path, query string kept
async fn add_trailing_slash(OriginalUri(uri): OriginalUri) -> Redirect {
    match uri.query() {
        Some(query) => Redirect::temporary(&format!("{}/?{}", uri.path(), query)),
        None => Redirect::temporary(&format!("{}/", uri.path())),
    }
}
