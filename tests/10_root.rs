mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn root_says_hello() {
    let (_, app) = common::memory_app();
    let res = common::get_path(&app, "/").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "message": "Hello from FastAPI with Supabase!" }));
}

#[tokio::test]
async fn health_reports_app_name() {
    let (_, app) = common::memory_app();
    let res = common::get_path(&app, "/health").await;

    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["app"], "Test App");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn unknown_paths_get_plain_text_404() {
    let (_, app) = common::memory_app();
    let res = common::get_path(&app, "/nope").await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.text(), "Sorry, wrong query");
    let content_type = res.headers["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"), "got {}", content_type);
}

#[tokio::test]
async fn missing_trailing_slash_redirects() {
    let (_, app) = common::memory_app();

    for (path, target) in [("/items", "/items/"), ("/users", "/users/"), ("/user", "/user/")] {
        let res = common::get_path(&app, path).await;
        assert_eq!(res.status, StatusCode::TEMPORARY_REDIRECT, "{}", path);
        assert_eq!(res.headers["location"], target);
    }
}

#[tokio::test]
async fn redirect_keeps_the_query_string() {
    let (_, app) = common::memory_app();

    let res = common::get_path(&app, "/items?x=1").await;
    assert_eq!(res.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers["location"], "/items/?x=1");

    let res = common::get_path(&app, "/users?select=name&limit=2").await;
    assert_eq!(res.headers["location"], "/users/?select=name&limit=2");
}

#[tokio::test]
async fn wrong_method_is_not_allowed() {
    let (_, app) = common::memory_app();
    let res = common::post_json(&app, "/users/", json!({ "name": "Ada" })).await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
}
