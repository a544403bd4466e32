//! Mock App Store Connect API for exercising the CLI binary end to end.
//!
//! Routes are keyed by `"METHOD /path"` or `"METHOD /path?query"`; the
//! exact path-and-query key wins over the bare path. The literal `{base}`
//! inside a canned body is replaced with the server's own origin so
//! `links.next` URLs point back at the mock. Every request is recorded.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Router;
use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::Response;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;

/// Recorded request for test verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Decoded value of one query parameter.
    pub fn query_value(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct MockState {
    base: Arc<Mutex<String>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    routes: Arc<Mutex<HashMap<String, MockResponse>>>,
}

pub struct MockApi {
    addr: SocketAddr,
    state: MockState,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API");
        let addr = listener.local_addr().expect("Failed to read mock API address");
        *state.base.lock().unwrap() = format!("http://{addr}");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock API stopped");
        });
        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_response(&self, route: &str, status: u16, body: Value) {
        self.state.routes.lock().unwrap().insert(
            route.to_string(),
            MockResponse {
                status,
                body: Some(body),
            },
        );
    }

    pub fn set_empty_response(&self, route: &str, status: u16) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(route.to_string(), MockResponse { status, body: None });
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.state.requests.lock().unwrap().clear();
    }
}

async fn handle(
    axum::extract::State(state): axum::extract::State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let query = uri.query().map(str::to_string);
    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: query.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let exact = match &query {
        Some(q) => format!("{method} {path}?{q}"),
        None => format!("{method} {path}"),
    };
    let bare = format!("{method} {path}");
    let response = {
        let routes = state.routes.lock().unwrap();
        routes.get(&exact).or_else(|| routes.get(&bare)).cloned()
    };

    match response {
        Some(MockResponse { status, body }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            match body {
                Some(body) => {
                    let base = state.base.lock().unwrap().clone();
                    let text = body.to_string().replace("{base}", &base);
                    (status, [(header::CONTENT_TYPE, "application/json")], text).into_response()
                }
                None => status.into_response(),
            }
        }
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            json!({
                "errors": [{
                    "status": "404",
                    "code": "NOT_FOUND",
                    "title": "The specified resource does not exist",
                    "detail": format!("No mock route for {bare}")
                }]
            })
            .to_string(),
        )
            .into_response(),
    }
}
