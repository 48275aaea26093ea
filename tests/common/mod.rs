#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::{Body, Bytes},
    extract::{Path, Query, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use url::Url;

use items_api::config::StoreConfig;
use items_api::database::{MemoryStore, RestStore};
use items_api::{app, AppState};

pub const API_KEY: &str = "test-anon-key";

/// Router backed by a fresh in-memory store
pub fn memory_app() -> (MemoryStore, Router) {
    let store = MemoryStore::new();
    let router = app(AppState::new(Arc::new(store.clone()), "Test App"));
    (store, router)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({}): {:?}", e, self.body))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse { status, headers, body }
}

pub async fn get_path(router: &Router, path: &str) -> TestResponse {
    send(router, Request::builder().uri(path).body(Body::empty()).unwrap()).await
}

pub async fn post_json(router: &Router, path: &str, body: Value) -> TestResponse {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// How the fake PostgREST server answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeMode {
    Normal,
    DenyInserts,
    Outage,
    Garbage,
    EmptyInsert,
}

#[derive(Debug)]
pub struct FakeState {
    pub mode: FakeMode,
    pub rows: Vec<Value>,
    pub last_id: i64,
    pub requests: Vec<SeenRequest>,
}

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: &'static str,
    pub table: String,
    pub apikey: Option<String>,
    pub authorization: Option<String>,
    pub prefer: Option<String>,
    pub select: Option<String>,
    pub body: Option<Value>,
}

pub type SharedFake = Arc<Mutex<FakeState>>;

/// Minimal PostgREST look-alike on an ephemeral port
pub struct FakePostgrest {
    pub addr: SocketAddr,
    pub state: SharedFake,
}

impl FakePostgrest {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(FakeState {
            mode: FakeMode::Normal,
            rows: Vec::new(),
            last_id: 0,
            requests: Vec::new(),
        }));

        let router = Router::new()
            .route("/rest/v1/:table", get(fake_select).post(fake_insert))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn set_mode(&self, mode: FakeMode) {
        self.state.lock().unwrap().mode = mode;
    }

    pub fn push_row(&self, row: Value) {
        self.state.lock().unwrap().rows.push(row);
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn store(&self) -> RestStore {
        rest_store(&format!("http://{}", self.addr))
    }
}

pub fn rest_store(url: &str) -> RestStore {
    RestStore::new(&StoreConfig {
        url: Url::parse(url).unwrap(),
        api_key: API_KEY.to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

fn record(
    state: &mut FakeState,
    method: &'static str,
    table: &str,
    headers: &HeaderMap,
    select: Option<String>,
    body: Option<Value>,
) {
    state.requests.push(SeenRequest {
        method,
        table: table.to_string(),
        apikey: header(headers, "apikey"),
        authorization: header(headers, "authorization"),
        prefer: header(headers, "prefer"),
        select,
        body,
    });
}

fn outage() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "upstream connect error").into_response()
}

async fn fake_select(
    State(state): State<SharedFake>,
    Path(table): Path<String>,
    Query(query): Query<std::collections::HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, "GET", &table, &headers, query.get("select").cloned(), None);

    match state.mode {
        FakeMode::Outage => outage(),
        FakeMode::Garbage => (StatusCode::OK, "{\"rows\": 3}").into_response(),
        _ => Json(Value::Array(state.rows.clone())).into_response(),
    }
}

async fn fake_insert(
    State(state): State<SharedFake>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    record(&mut state, "POST", &table, &headers, None, Some(body.clone()));

    match state.mode {
        FakeMode::Outage => outage(),
        FakeMode::Garbage => (StatusCode::CREATED, "not json").into_response(),
        FakeMode::EmptyInsert => (StatusCode::CREATED, Json(json!([]))).into_response(),
        FakeMode::DenyInserts => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "code": "42501",
                "details": null,
                "hint": null,
                "message": format!("new row violates row-level security policy for table \"{}\"", table)
            })),
        )
            .into_response(),
        FakeMode::Normal => {
            let mut row = body.as_object().cloned().unwrap_or_default();
            state.last_id += 1;
            row.insert("id".to_string(), json!(state.last_id));
            row.insert("created_at".to_string(), json!("2024-05-01T12:00:00+00:00"));
            let row = Value::Object(row);
            state.rows.push(row.clone());
            (StatusCode::CREATED, Json(json!([row]))).into_response()
        }
    }
}
