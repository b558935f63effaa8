//! Shared helpers for the router and database tests.
#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use testcontainers::core::IntoContainerPort;
use testcontainers::{core::WaitFor, runners::AsyncRunner, ContainerAsync, GenericImage, ImageExt};
use tower::ServiceExt;

/// JSON request; `None` sends an empty body without a content type.
pub fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Request with a verbatim body and an optional content type.
pub fn raw_request(method: Method, uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Run one request through the router; the body must be JSON or empty.
pub async fn call(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|e| panic!("response is not JSON ({}): {}", e, String::from_utf8_lossy(&bytes)))
    };
    (status, value)
}

/// Throwaway PostgreSQL 16 server. Requires a running Docker daemon.
pub async fn postgres_container() -> (ContainerAsync<GenericImage>, PgPool) {
    let container = GenericImage::new("postgres", "16-alpine")
        .with_exposed_port(5432.tcp())
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_startup_timeout(Duration::from_secs(120))
        .with_env_var("POSTGRES_HOST_AUTH_METHOD", "trust")
        .start()
        .await
        .expect("postgres container should start");

    let mut port = None;
    for attempt in 0..5u64 {
        match container.get_host_port_ipv4(5432).await {
            Ok(p) => {
                port = Some(p);
                break;
            }
            Err(_) => tokio::time::sleep(Duration::from_millis(100 * (attempt + 1))).await,
        }
    }
    let port = port.expect("postgres port should be mapped");
    let url = format!("postgres://postgres@localhost:{}/postgres?sslmode=disable", port);

    // the server restarts once after init; retry until it accepts connections
    let mut last_err = None;
    for attempt in 0..10u64 {
        match PgPoolOptions::new().max_connections(5).connect(&url).await {
            Ok(pool) => return (container, pool),
            Err(e) => {
                last_err = Some(e);
                tokio::time::sleep(Duration::from_millis(200 * (attempt + 1))).await;
            }
        }
    }
    panic!("could not connect to {}: {:?}", url, last_err);
}
