#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use roadtest_admin_client::session::{MemorySessionStore, Navigator};
use roadtest_admin_client::{ApiClient, Config};

/// In-process stand-in for the admin API, with knobs for session and
/// refresh behaviour and counters the tests assert on.
pub struct MockApi {
    pub session_valid: AtomicBool,
    pub refresh_ok: bool,
    pub refresh_delay_ms: u64,
    /// Protected routes 401 no matter what; models a session the server
    /// refuses to honour even after a successful refresh.
    pub always_unauthorized: bool,
    pub distance_ok: bool,
    pub refresh_calls: AtomicUsize,
    pub protected_hits: AtomicUsize,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            session_valid: AtomicBool::new(true),
            refresh_ok: true,
            refresh_delay_ms: 25,
            always_unauthorized: false,
            distance_ok: true,
            refresh_calls: AtomicUsize::new(0),
            protected_hits: AtomicUsize::new(0),
        }
    }
}

impl MockApi {
    pub fn with_expired_session() -> Self {
        Self {
            session_valid: AtomicBool::new(false),
            // long enough that concurrent 401s all land inside one cycle
            refresh_delay_ms: 150,
            ..Default::default()
        }
    }

    pub fn with_broken_refresh() -> Self {
        Self {
            refresh_ok: false,
            ..Self::with_expired_session()
        }
    }
}

/// Login-redirect hook that just counts invocations.
#[derive(Default)]
pub struct RecordingNavigator {
    pub redirects: AtomicUsize,
}

impl Navigator for RecordingNavigator {
    fn at_login(&self) -> bool {
        false
    }

    fn goto_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

pub async fn spawn_api(api: MockApi) -> (String, Arc<MockApi>) {
    let state = Arc::new(api);
    let app = Router::new()
        .route("/customers", get(list_customers))
        .route("/distance", post(distance))
        .route("/auth/admin/login", post(login))
        .route("/auth/admin/logout", post(logout))
        .route("/auth/admin/refresh", post(refresh))
        .route("/auth/admin/me", get(me))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock API");
    let addr = listener.local_addr().expect("mock API has no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock API died");
    });

    (format!("http://{}", addr), state)
}

pub fn client_for(
    base_url: &str,
) -> (ApiClient, Arc<MemorySessionStore>, Arc<RecordingNavigator>) {
    let store = Arc::new(MemorySessionStore::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClient::with_hooks(
        Config::for_base_url(base_url),
        store.clone(),
        navigator.clone(),
    )
    .expect("failed to build client");
    (client, store, navigator)
}

pub fn identity_json() -> Value {
    json!({
        "id": "6f2c1f6e-8a3c-4f0e-9a1d-2b6d8f3a9c11",
        "email": "admin@roadtest.example",
        "name": "Dispatch Admin",
        "role": "admin"
    })
}

fn customers_page() -> Value {
    json!({
        "items": [{
            "id": "0b9d5c3a-41e7-4d22-8c9f-7a1e5b2d6f88",
            "name": "Avery Tran",
            "email": "avery@example.com",
            "phone": "+1-416-555-0188",
            "created_at": "2026-05-12T14:30:00Z"
        }],
        "page": 1,
        "per_page": 20,
        "total": 1
    })
}

fn expired() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "session expired"})),
    )
}

async fn list_customers(State(api): State<Arc<MockApi>>) -> (StatusCode, Json<Value>) {
    api.protected_hits.fetch_add(1, Ordering::SeqCst);
    if api.always_unauthorized || !api.session_valid.load(Ordering::SeqCst) {
        return expired();
    }
    (StatusCode::OK, Json(customers_page()))
}

async fn distance(State(api): State<Arc<MockApi>>) -> (StatusCode, Json<Value>) {
    if !api.session_valid.load(Ordering::SeqCst) {
        return expired();
    }
    if api.distance_ok {
        (StatusCode::OK, Json(json!({"distance": 42.5})))
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "routing backend down"})),
        )
    }
}

async fn login(
    State(api): State<Arc<MockApi>>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if payload["password"] == "secret" {
        api.session_valid.store(true, Ordering::SeqCst);
        (StatusCode::OK, Json(json!({"user": identity_json()})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "invalid email or password"})),
        )
    }
}

async fn logout(State(api): State<Arc<MockApi>>) -> (StatusCode, Json<Value>) {
    api.session_valid.store(false, Ordering::SeqCst);
    (StatusCode::OK, Json(json!({})))
}

async fn refresh(State(api): State<Arc<MockApi>>) -> (StatusCode, Json<Value>) {
    api.refresh_calls.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(api.refresh_delay_ms)).await;
    if api.refresh_ok {
        api.session_valid.store(true, Ordering::SeqCst);
        (StatusCode::OK, Json(json!({})))
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "refresh denied"})),
        )
    }
}

async fn me(State(api): State<Arc<MockApi>>) -> (StatusCode, Json<Value>) {
    if api.session_valid.load(Ordering::SeqCst) {
        (StatusCode::OK, Json(identity_json()))
    } else {
        expired()
    }
}
