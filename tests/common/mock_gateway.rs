use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Scripted reply for the mock chat completions endpoint
#[derive(Clone, Debug)]
pub enum UpstreamMode {
    /// 200 with `choices[0].message.content` set to the given text
    Content(String),
    /// Non-success status with the given body
    Error(StatusCode, String),
}

#[derive(Clone)]
pub struct MockGatewayConfig {
    pub port: u16,
    pub mode: UpstreamMode,
}

/// One request seen by the completion endpoint
#[derive(Clone, Debug)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct GatewayState {
    mode: UpstreamMode,
    hits: Arc<AtomicUsize>,
    requests: Arc<RwLock<Vec<CapturedRequest>>>,
}

/// Mock upstream AI gateway for integration tests
pub struct MockGateway {
    config: MockGatewayConfig,
    hits: Arc<AtomicUsize>,
    requests: Arc<RwLock<Vec<CapturedRequest>>>,
    shutdown_handle: Option<tokio::task::JoinHandle<()>>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockGateway {
    pub fn new(config: MockGatewayConfig) -> Self {
        Self {
            config,
            hits: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(RwLock::new(Vec::new())),
            shutdown_handle: None,
            shutdown_tx: None,
        }
    }

    /// Start the mock gateway server
    pub async fn start(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        // If port is 0, find an available port
        let port = if self.config.port == 0 {
            let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
            let port = listener.local_addr()?.port();
            drop(listener);
            self.config.port = port;
            port
        } else {
            self.config.port
        };

        let state = GatewayState {
            mode: self.config.mode.clone(),
            hits: self.hits.clone(),
            requests: self.requests.clone(),
        };

        let app = Router::new()
            .route("/v1/chat/completions", post(chat_completions_handler))
            .with_state(state);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        self.shutdown_tx = Some(shutdown_tx);

        // Spawn the server in a separate task
        let handle = tokio::spawn(async move {
            let listener = match tokio::net::TcpListener::bind(("127.0.0.1", port)).await {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Failed to bind to port {}: {}", port, e);
                    return;
                }
            };

            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });

            if let Err(e) = server.await {
                eprintln!("Server error: {}", e);
            }
        });

        self.shutdown_handle = Some(handle);

        // Wait for the server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(format!("http://127.0.0.1:{}", port))
    }

    /// Stop the mock gateway server
    pub async fn stop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }

        if let Some(handle) = self.shutdown_handle.take() {
            let _ = tokio::time::timeout(tokio::time::Duration::from_secs(5), handle).await;
        }
    }

    /// Completion calls received so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Requests captured by the completion endpoint, oldest first
    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.read().await.clone()
    }
}

impl Drop for MockGateway {
    fn drop(&mut self) {
        // Clean shutdown when dropped
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
    }
}

async fn chat_completions_handler(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.requests.write().await.push(CapturedRequest {
        authorization: headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string()),
        body,
    });

    match &state.mode {
        UpstreamMode::Content(text) => Json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "model": "google/gemini-2.5-flash",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": text },
                "finish_reason": "stop"
            }]
        }))
        .into_response(),
        UpstreamMode::Error(status, body) => (*status, body.clone()).into_response(),
    }
}
