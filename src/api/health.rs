use axum::response::Json;
use serde_json::{Value, json};

/// Liveness of the redirect server, handy when checking the redirect URI setup.
pub async fn health() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "routes": ["/callback", "/token", "/health"]
    }))
}
