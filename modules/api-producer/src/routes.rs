use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use event_bus::Publisher;
use platform_contracts::{HealthStatus, MonitoredComponent, PriceCreatedV1, StatusReportV1};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::error::ApiError;
use crate::health::health;
use crate::models::{
    MessageResponse, PingResponse, PriceCreateRequest, ProductCreatedResponse,
};
use crate::probe::StatusProbe;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub publisher: Publisher,
    pub probe: Arc<dyn StatusProbe>,
}

impl AppState {
    pub fn new(publisher: Publisher, probe: Arc<dyn StatusProbe>) -> Self {
        Self { publisher, probe }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/ping", get(ping))
        .route("/products", post(create_product))
        .route("/api/health", get(health))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// GET /
async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Success".to_string(),
    })
}

/// GET /ping - Publish one status report per monitored component
///
/// All three reports are attempted even if an earlier one fails; the first
/// failure is returned.
async fn ping(State(state): State<AppState>) -> Result<Json<PingResponse>, ApiError> {
    // Answering this request is the api health check
    let api_status = HealthStatus::Healthy;
    let mut first_error = None;

    for component in MonitoredComponent::ALL {
        let status = match component {
            MonitoredComponent::Api => api_status,
            other => state.probe.check(other),
        };

        let report = StatusReportV1::new(status);
        if let Err(e) = state
            .publisher
            .publish_event(&component.subject(), &report)
            .await
        {
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(Json(PingResponse { status: api_status })),
    }
}

/// POST /products - Publish a price created event
async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<PriceCreateRequest>, JsonRejection>,
) -> Result<Json<ProductCreatedResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected product request body");
        ApiError::BadRequest(rejection.body_text())
    })?;

    req.validate().map_err(ApiError::BadRequest)?;

    let event = req.into_event();
    tracing::info!(
        product_id = %event.product_id,
        name = %event.name,
        amount = event.amount,
        currency = %event.currency,
        "Publishing price created event"
    );

    let envelope = state
        .publisher
        .publish_event(PriceCreatedV1::EVENT_TYPE, &event)
        .await?;

    Ok(Json(ProductCreatedResponse {
        status: "OK".to_string(),
        event_id: envelope.id,
        product_id: event.product_id,
    }))
}
