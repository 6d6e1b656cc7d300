use api_producer_rs::{router, AppState, StaticProbe};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use event_bus::{BusError, BusMessage, BusResult, EventBus, EventEnvelope, InMemoryBus, Publisher};
use futures::stream::BoxStream;
use futures::StreamExt;
use http_body_util::BodyExt;
use platform_contracts::{HealthStatus, PriceCreatedV1, StatusReportV1};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

#[derive(Default)]
struct DownBus {
    calls: AtomicUsize,
}

#[async_trait]
impl EventBus for DownBus {
    async fn publish(&self, _subject: &str, _payload: Vec<u8>) -> BusResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(BusError::PublishError("no responders".to_string()))
    }

    async fn subscribe(&self, subject: &str) -> BusResult<BoxStream<'static, BusMessage>> {
        Err(BusError::SubscribeError(subject.to_string()))
    }
}

fn app_with(bus: Arc<dyn EventBus>) -> axum::Router {
    router(AppState::new(
        Publisher::new(bus),
        Arc::new(StaticProbe::default()),
    ))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn next_envelope(stream: &mut BoxStream<'static, BusMessage>) -> (String, EventEnvelope) {
    let msg = tokio::time::timeout(Duration::from_secs(2), stream.next())
        .await
        .expect("timeout waiting for message")
        .expect("stream closed");
    let envelope = EventEnvelope::decode(&msg.payload).unwrap();
    (msg.subject, envelope)
}

fn post_products(body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .body(body)
        .unwrap()
}

#[tokio::test]
async fn test_root() {
    let app = app_with(Arc::new(InMemoryBus::new()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "message": "Success" }));
}

#[tokio::test]
async fn test_health() {
    let app = app_with(Arc::new(InMemoryBus::new()));

    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "api-producer");
}

#[tokio::test]
async fn test_ping_publishes_one_report_per_component() {
    let bus = Arc::new(InMemoryBus::new());
    let mut stream = bus.subscribe("ping.*.status").await.unwrap();
    let app = app_with(bus.clone());

    let response = app
        .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "Healthy" }));

    let mut seen = Vec::new();
    for _ in 0..3 {
        let (subject, envelope) = next_envelope(&mut stream).await;
        assert_eq!(envelope.event_type, subject);
        assert_eq!(envelope.version, StatusReportV1::VERSION);
        let report: StatusReportV1 = envelope.decode_payload().unwrap();
        seen.push((subject, report.status));
    }

    assert_eq!(
        seen,
        vec![
            ("ping.api.status".to_string(), HealthStatus::Healthy),
            ("ping.db.status".to_string(), HealthStatus::Healthy),
            ("ping.cache.status".to_string(), HealthStatus::Down),
        ]
    );
}

#[tokio::test]
async fn test_ping_reports_unavailable_bus() {
    let bus = Arc::new(DownBus::default());
    let app = app_with(bus.clone());

    let response = app
        .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_json(response).await["error"].is_string());
    assert_eq!(bus.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_create_product_publishes_price_created() {
    let bus = Arc::new(InMemoryBus::new());
    let mut stream = bus.subscribe("price.created").await.unwrap();
    let app = app_with(bus.clone());

    let body = json!({ "name": "Widget", "amount": 500, "currency": "USD" });
    let response = app
        .oneshot(post_products(Body::from(serde_json::to_vec(&body).unwrap())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "OK");

    let (subject, envelope) = next_envelope(&mut stream).await;
    assert_eq!(subject, "price.created");
    assert_eq!(envelope.version, PriceCreatedV1::VERSION);
    assert_eq!(json["event_id"], envelope.id.to_string());

    let event: PriceCreatedV1 = envelope.decode_payload().unwrap();
    assert_eq!(json["product_id"], event.product_id.to_string());
    assert_eq!(event.name, "Widget");
    assert_eq!(event.amount, 500);
    assert_eq!(event.currency, "USD");
}

#[tokio::test]
async fn test_create_product_rejects_bad_input() {
    let bus = Arc::new(DownBus::default());

    let cases = vec![
        Body::from("{not json"),
        Body::from(r#"{"name":"Widget"}"#),
        Body::from(r#"{"name":"","amount":500,"currency":"USD"}"#),
        Body::from(r#"{"name":"Widget","amount":-5,"currency":"USD"}"#),
        Body::from(r#"{"name":"Widget","amount":500,"currency":"DOLLARS"}"#),
    ];

    for body in cases {
        let response = app_with(bus.clone())
            .oneshot(post_products(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    assert_eq!(bus.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_create_product_reports_unavailable_bus() {
    let bus = Arc::new(DownBus::default());

    let body = json!({ "name": "Widget", "amount": 500, "currency": "USD" });
    let response = app_with(bus.clone())
        .oneshot(post_products(Body::from(serde_json::to_vec(&body).unwrap())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(bus.calls.load(Ordering::SeqCst), 1);
}
