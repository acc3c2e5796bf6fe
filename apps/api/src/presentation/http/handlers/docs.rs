use axum::Json;

pub async fn api_docs() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Upload API",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/": { "get": { "summary": "Upload page" } },
            "/health": { "get": { "summary": "Health check (bucket reachability)" } },
            "/api/v1/docs": { "get": { "summary": "API description" } },
            "/api/v1/methods/googleStorage.signFile": {
                "post": { "summary": "Signed read URL for an object, valid 180 minutes. Body: [fileReference]" }
            },
            "/api/v1/methods/googleStorage.uploadFile": {
                "post": { "summary": "Store a base64 or data-URL payload and sign it. Body: [fileData, fileName, contentType]" }
            }
        }
    }))
}
