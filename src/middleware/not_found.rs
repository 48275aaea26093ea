use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const NOT_FOUND_BODY: &str = "Sorry, wrong query";

/// Replace any 404 produced further down the stack with a short plain-text body
pub async fn not_found_middleware(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    if response.status() == StatusCode::NOT_FOUND {
        return (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response();
    }
    response
}
