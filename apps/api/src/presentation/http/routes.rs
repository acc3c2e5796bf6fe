use super::{
    handlers::{docs, health, methods, ui},
    middleware::{logging::logging_middleware, request_id::request_id_middleware},
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        // Upload page
        .route("/", get(ui::index))
        // Health
        .route("/health", get(health::health_check))
        // Docs
        .route("/api/v1/docs", get(docs::api_docs))
        // Named methods
        .route("/api/v1/methods/{name}", post(methods::call_method))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
