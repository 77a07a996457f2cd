use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Json, Router,
};
use punchlist_store::{sanitize_filename, StoreError};
use serde_json::{json, Value};

use super::AppState;

/// Serves attachment bytes for the local backend's relative URLs. With the
/// Spaces backend the public URLs are absolute, so nothing links here.
pub fn routes() -> Router<AppState> {
    Router::new().route("/files/{name}", get(serve_file))
}

async fn serve_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    // Stored keys are already sanitized, so anything that changes under
    // sanitization cannot name a stored object.
    if sanitize_filename(&name) != name {
        return Err(not_found(&name));
    }
    match state.store.get(&name).await {
        Ok(data) => Ok(Response::builder()
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(Body::from(data))
            .unwrap()),
        Err(StoreError::NotFound(_)) => Err(not_found(&name)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

fn not_found(name: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("not found: {name}") })),
    )
}
