//! Fake iTunes Search API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `GET /search` — the configured search response
//! - `GET /lookup` — the configured lookup response
//!
//! Every request's query string is recorded so tests can assert on the
//! parameters the client sent.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeItunesApi::start().await.unwrap();
//! api.respond_search(200, notes_search_body()).await;
//!
//! // Point the client at api.base_url()
//! let url = api.base_url();
//! ```

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A canned response for one endpoint.
#[derive(Clone)]
struct Canned {
    status: u16,
    body: String,
    delay: Duration,
}

impl Default for Canned {
    fn default() -> Self {
        Self {
            status: 200,
            body: r#"{"resultCount":0,"results":[]}"#.to_string(),
            delay: Duration::ZERO,
        }
    }
}

/// State shared between the router and test code.
#[derive(Default)]
struct ApiState {
    search: Canned,
    lookup: Canned,
    /// `(path, query params)` for every request, in arrival order.
    requests: Vec<(String, HashMap<String, String>)>,
}

type Shared = Arc<Mutex<ApiState>>;

/// Handle to the running fake iTunes API server.
pub struct FakeItunesApi {
    addr: SocketAddr,
    state: Shared,
}

impl FakeItunesApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state: Shared = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/search", get(search))
            .route("/lookup", get(lookup))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Serve `body` with `status` from `/search`.
    pub async fn respond_search(&self, status: u16, body: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.search.status = status;
        state.search.body = body.into();
    }

    /// Serve `body` with `status` from `/lookup`.
    pub async fn respond_lookup(&self, status: u16, body: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.lookup.status = status;
        state.lookup.body = body.into();
    }

    /// Hold every `/search` response for `delay` before sending it.
    pub async fn delay_search(&self, delay: Duration) {
        self.state.lock().await.search.delay = delay;
    }

    /// All requests received so far.
    pub async fn requests(&self) -> Vec<(String, HashMap<String, String>)> {
        self.state.lock().await.requests.clone()
    }

    /// Query params of the most recent request.
    pub async fn last_params(&self) -> HashMap<String, String> {
        self.requests()
            .await
            .pop()
            .map(|(_, params)| params)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn search(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let canned = {
        let mut state = state.lock().await;
        state.requests.push(("/search".to_string(), params));
        state.search.clone()
    };
    reply(canned).await
}

async fn lookup(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let canned = {
        let mut state = state.lock().await;
        state.requests.push(("/lookup".to_string(), params));
        state.lookup.clone()
    };
    reply(canned).await
}

async fn reply(canned: Canned) -> impl IntoResponse {
    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }
    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        canned.body,
    )
}
