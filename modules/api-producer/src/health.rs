use axum::Json;

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "api-producer",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
