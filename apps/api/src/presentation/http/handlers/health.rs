use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    bucket: &'static str,
    version: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    // Check bucket reachability with a fresh client, like any request would
    let bucket_status = match state.storage.create().await {
        Ok(store) => match store.bucket_exists(state.bucket_name()).await {
            Ok(true) => "up",
            Ok(false) => {
                tracing::error!("Health check failed: bucket {} missing", state.bucket_name());
                "missing"
            }
            Err(e) => {
                tracing::error!("Health check failed: bucket unreachable: {}", e);
                "down"
            }
        },
        Err(e) => {
            tracing::error!("Health check failed: storage client unavailable: {}", e);
            "down"
        }
    };

    let status = if bucket_status == "up" {
        "healthy"
    } else {
        "unhealthy"
    };

    let response = HealthResponse {
        status,
        bucket: bucket_status,
        version: env!("CARGO_PKG_VERSION"),
    };

    let code = if status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}
