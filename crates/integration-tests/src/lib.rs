//! In-process integration-test harness for the admin panel.
//!
//! Tests drive the real router with `tower::ServiceExt::oneshot` while a
//! stub upstream API runs on an ephemeral local port, recording every
//! request it receives and replying with canned responses. No external
//! services are required.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use secrecy::SecretString;
use tempfile::TempDir;
use tower::ServiceExt;
use url::Url;

use fakestore_admin::{app, config::AdminConfig, state::AppState};

/// One request the stub upstream received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// The recorded body parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

/// A stub upstream API on an ephemeral port.
pub struct StubUpstream {
    addr: SocketAddr,
    state: StubState,
}

impl StubUpstream {
    /// Start the stub server.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub upstream");
        let addr = listener.local_addr().expect("stub upstream address");
        let state = StubState::default();
        let router = Router::new().fallback(record).with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("stub upstream server");
        });
        Self { addr, state }
    }

    /// The origin the admin panel should be pointed at.
    ///
    /// # Panics
    ///
    /// Panics if the address does not form a valid URL.
    #[must_use]
    pub fn base_url(&self) -> Url {
        format!("http://{}", self.addr)
            .parse()
            .expect("stub upstream url")
    }

    /// Register a canned response for a method and path. Unregistered
    /// routes answer 404.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: &str) {
        self.state
            .responses
            .lock()
            .expect("responses lock")
            .insert(
                (method.to_string(), path.to_string()),
                (status, body.to_string()),
            );
    }

    /// All requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }
}

async fn record(State(state): State<StubState>, request: Request) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    let body = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .expect("read stub request body");

    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            authorization,
            body: String::from_utf8_lossy(&body).into_owned(),
        });

    let canned = state
        .responses
        .lock()
        .expect("responses lock")
        .get(&(method, path))
        .cloned();
    match canned {
        Some((status, body)) => (
            StatusCode::from_u16(status).expect("canned status"),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "{}").into_response(),
    }
}

/// One admin panel under test, wired to its own stub upstream and its
/// own temporary session file.
pub struct TestContext {
    pub upstream: StubUpstream,
    pub state: AppState,
    _session_dir: TempDir,
}

impl TestContext {
    /// Start a stub upstream and build the panel around it.
    ///
    /// # Panics
    ///
    /// Panics if the stub or the application state cannot be set up.
    pub async fn new() -> Self {
        let upstream = StubUpstream::start().await;
        let base_url = upstream.base_url();
        Self::with_upstream(upstream, base_url)
    }

    /// Build the panel against an address nothing listens on, so every
    /// upstream call fails at the connection level.
    ///
    /// # Panics
    ///
    /// Panics if the probe listener cannot be bound.
    pub async fn with_dead_upstream() -> Self {
        // Bind then drop, leaving the port unserved.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind probe listener");
        let addr = listener.local_addr().expect("probe listener address");
        drop(listener);

        let upstream = StubUpstream::start().await;
        let base_url = format!("http://{addr}").parse().expect("dead upstream url");
        Self::with_upstream(upstream, base_url)
    }

    fn with_upstream(upstream: StubUpstream, base_url: Url) -> Self {
        let session_dir = tempfile::tempdir().expect("session dir");
        let config = AdminConfig {
            api_base_url: base_url,
            host: "127.0.0.1".parse().expect("host"),
            port: 0,
            session_file: session_dir.path().join("session"),
        };
        let state = AppState::new(config).expect("app state");
        Self {
            upstream,
            state,
            _session_dir: session_dir,
        }
    }

    /// A fresh router over the shared state.
    #[must_use]
    pub fn router(&self) -> Router {
        app(self.state.clone())
    }

    /// Put a bearer token into the session, as a successful login does.
    ///
    /// # Panics
    ///
    /// Panics if the token cannot be persisted.
    pub fn login(&self, token: &str) {
        self.state
            .session()
            .set(SecretString::from(token.to_string()))
            .expect("set session token");
    }

    /// Issue a GET request against the panel.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or routed.
    pub async fn get(&self, path: &str) -> Response {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("build request");
        self.router().oneshot(request).await.expect("route request")
    }

    /// Issue an empty-bodied POST request against the panel.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or routed.
    pub async fn post(&self, path: &str) -> Response {
        self.post_form(path, "").await
    }

    /// Issue a urlencoded form POST against the panel.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or routed.
    pub async fn post_form(&self, path: &str, body: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .expect("build request");
        self.router().oneshot(request).await.expect("route request")
    }
}

/// Read a response body to a string.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    String::from_utf8(bytes.to_vec()).expect("response body is not UTF-8")
}

/// The `Location` header of a redirect response.
///
/// # Panics
///
/// Panics if the header is missing or not a string.
#[must_use]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .expect("Location header is not a string")
}

/// The rendered `value` of the first input named `name` in a form page.
///
/// # Panics
///
/// Panics if no such input is rendered or it carries no value.
#[must_use]
pub fn input_value(body: &str, name: &str) -> String {
    input_values(body, name)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("no input named {name} rendered"))
}

/// The rendered `value`s of every input named `name`, in page order.
/// Form pages render repeated line fields under one name.
#[must_use]
pub fn input_values(body: &str, name: &str) -> Vec<String> {
    let needle = format!("name=\"{name}\"");
    let mut values = Vec::new();
    let mut rest = body;
    while let Some(at) = rest.find(&needle) {
        let tag_rest = &rest[at..];
        let tag_end = tag_rest.find('>').expect("unterminated input tag");
        let tag = &tag_rest[..tag_end];
        let value_at = tag.find("value=\"").expect("input has no value") + "value=\"".len();
        let value = &tag[value_at..];
        let end = value.find('"').expect("unterminated value attribute");
        values.push(value[..end].to_string());
        rest = &tag_rest[tag_end..];
    }
    values
}

/// The `value` of the selected option in a form page's only select with
/// a marked selection.
///
/// # Panics
///
/// Panics if no selected option is rendered.
#[must_use]
pub fn selected_value(body: &str) -> String {
    let at = body.find(" selected").expect("no selected option rendered");
    let before = &body[..at];
    let value_at = before.rfind("value=\"").expect("selected option has no value") + "value=\"".len();
    let value = &before[value_at..];
    let end = value.find('"').expect("unterminated value attribute");
    value[..end].to_string()
}
