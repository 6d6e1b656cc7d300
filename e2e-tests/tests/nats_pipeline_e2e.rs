//! Producer → NATS → consumer
//!
//! Requires a running NATS server (NATS_URL, default nats://localhost:4222).
//! Run with: cargo test -p e2e-tests --test nats_pipeline_e2e -- --ignored

mod common;

use axum::http::StatusCode;
use common::{call, create_product, start_pipeline, wait_for_len};
use event_bus::NatsBus;
use event_consumer::{DedupPolicy, ProjectionStore};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[tokio::test]
#[ignore]
async fn test_product_request_over_nats() {
    let url = std::env::var("NATS_URL").unwrap_or_else(|_| "nats://localhost:4222".to_string());
    let bus = NatsBus::connect(&url)
        .await
        .expect("NATS must be running for this test");

    let pipeline = start_pipeline(Arc::new(bus), DedupPolicy::Disabled).await;

    // Give the server a moment to register the subscriptions
    tokio::time::sleep(Duration::from_millis(200)).await;

    let (status, body) = call(
        &pipeline.app,
        create_product(json!({ "name": "Widget", "amount": 500, "currency": "USD" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    wait_for_len(&pipeline.store, 1, Duration::from_secs(5)).await;

    let product_id: Uuid = body["product_id"].as_str().unwrap().parse().unwrap();
    assert!(pipeline.store.get(&product_id).is_ok());
}
