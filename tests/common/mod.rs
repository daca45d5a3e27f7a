//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    http::{Method, Request, StatusCode},
    Router,
};
use product_service::config::ServiceConfig;
use product_service::http::{build_router, AppState, HttpServer};
use product_service::lifecycle::Shutdown;
use product_service::repository::InMemoryProductRepository;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// Router over a fresh repository, plus a handle on that repository.
#[allow(dead_code)]
pub fn test_app(config: &ServiceConfig) -> (Router, Arc<InMemoryProductRepository>) {
    let repo = Arc::new(InMemoryProductRepository::new());
    let router = build_router(config, AppState::new(repo.clone()));
    (router, repo)
}

/// Drive one request through the router and collect the response.
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Bytes) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes)
}

/// A server running on an ephemeral local port.
#[allow(dead_code)]
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

/// Bind 127.0.0.1:0 and serve a fresh repository in the background.
#[allow(dead_code)]
pub async fn start_server() -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(
        ServiceConfig::default(),
        Arc::new(InMemoryProductRepository::new()),
    );
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, rx).await });

    RunningServer {
        addr,
        shutdown,
        handle,
    }
}
