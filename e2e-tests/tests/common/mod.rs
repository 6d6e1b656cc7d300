//! Shared wiring: producer router and consumer subscriptions on one bus

#![allow(dead_code)]

use api_producer_rs::{router, AppState, StaticProbe};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use event_bus::{EventBus, Publisher};
use event_consumer::{DedupPolicy, InMemoryProjectionStore};
use http_body_util::BodyExt;
use price_consumer_rs::{build_dispatcher, start_consumers};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tower::ServiceExt;

pub struct Pipeline {
    pub bus: Arc<dyn EventBus>,
    pub store: Arc<InMemoryProjectionStore>,
    pub app: axum::Router,
    handles: Vec<JoinHandle<()>>,
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

pub async fn start_pipeline(bus: Arc<dyn EventBus>, dedup: DedupPolicy) -> Pipeline {
    init_tracing();

    let store = Arc::new(InMemoryProjectionStore::new());
    let dispatcher = Arc::new(build_dispatcher(store.clone(), dedup));
    let handles = start_consumers(bus.clone(), dispatcher)
        .await
        .expect("consumers should start");

    let app = router(AppState::new(
        Publisher::new(bus.clone()),
        Arc::new(StaticProbe::default()),
    ));

    Pipeline {
        bus,
        store,
        app,
        handles,
    }
}

/// Send one request through the producer router, returning status and JSON body
pub async fn call(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub fn create_product(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub fn ping() -> Request<Body> {
    Request::builder().uri("/ping").body(Body::empty()).unwrap()
}

/// Poll the projection until it holds `len` entries
pub async fn wait_for_len(store: &InMemoryProjectionStore, len: usize, timeout: Duration) {
    tokio::time::timeout(timeout, async {
        while store.len() < len {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("projection never reached {} entries", len));
}
