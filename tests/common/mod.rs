//! Shared utilities for integration testing.

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use chat_insights_gateway::{GatewayConfig, HttpServer, Shutdown};

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub async fn unreachable_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// A backend that reads requests but never answers.
///
/// Each time a client closes its connection a `()` is sent on the returned
/// channel, which lets tests observe that timed-out attempts are aborted.
#[allow(dead_code)]
pub async fn start_hanging_backend() -> (String, mpsc::UnboundedReceiver<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 64 * 1024];
                loop {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => {
                            let _ = tx.send(());
                            break;
                        }
                        Ok(_) => continue,
                    }
                }
            });
        }
    });

    (format!("http://{}", addr), rx)
}

/// Mock `/health` endpoint with a fixed answer.
#[allow(dead_code)]
pub struct MockHealth {
    pub status: StatusCode,
    pub body: Value,
    pub hits: AtomicUsize,
}

#[allow(dead_code)]
impl MockHealth {
    pub fn new(status: StatusCode, body: Value) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            hits: AtomicUsize::new(0),
        })
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn router(self: &Arc<Self>) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .with_state(self.clone())
    }
}

async fn health_handler(State(mock): State<Arc<MockHealth>>) -> impl IntoResponse {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    (mock.status, Json(mock.body.clone()))
}

/// What a mock `/analyze/` endpoint received.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct SeenUpload {
    pub api_key: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Mock `/analyze/` endpoint with a fixed answer.
#[allow(dead_code)]
pub struct MockAnalyze {
    pub status: StatusCode,
    pub body: String,
    pub hits: AtomicUsize,
    pub seen: Mutex<Vec<SeenUpload>>,
}

#[allow(dead_code)]
impl MockAnalyze {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.into(),
            hits: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn router(self: &Arc<Self>) -> Router {
        Router::new()
            .route("/analyze/", post(analyze_handler))
            .with_state(self.clone())
    }
}

async fn analyze_handler(
    State(mock): State<Arc<MockAnalyze>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    mock.hits.fetch_add(1, Ordering::SeqCst);

    let api_key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        mock.seen.lock().unwrap().push(SeenUpload {
            api_key: api_key.clone(),
            file_name,
            content_type,
            data,
        });
    }

    (
        mock.status,
        [(header::CONTENT_TYPE, "application/json")],
        mock.body.clone(),
    )
}

/// Configuration pointing at `urls` with short test timeouts.
#[allow(dead_code)]
pub fn config_for<S: AsRef<str>>(urls: &[S], api_key: Option<&str>) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.backends.urls = urls.iter().map(|u| u.as_ref().to_string()).collect();
    config.backends.api_key = api_key.map(str::to_string);
    config.timeouts.health_probe_ms = 500;
    config.timeouts.upload_ms = 2_000;
    config
}

/// Start the gateway on an ephemeral port.
///
/// Keep the returned `Shutdown` alive for the duration of the test; dropping
/// it stops the server.
pub async fn start_gateway(config: GatewayConfig) -> (String, Shutdown) {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (format!("http://{}", addr), shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
