use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Redirect,
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use punchlist_core::item::CreateItem;
use punchlist_db::DbError;
use punchlist_store::{sanitize_filename, StoreError};
use serde_json::{json, Value};
use tracing::warn;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(submit_item))
        .route("/delete/{id}", get(delete_item))
}

type ErrorResponse = (StatusCode, Json<Value>);

async fn list_items(State(state): State<AppState>) -> Result<Json<Value>, ErrorResponse> {
    state
        .db
        .list_items()
        .map(|items| Json(json!(items)))
        .map_err(db_error)
}

struct Upload {
    filename: String,
    content_type: String,
    data: Bytes,
}

/// Handle a form submission: upload the attachment first (if any), then
/// insert the item row. Redirects back to the list so a refresh cannot
/// resubmit the form.
async fn submit_item(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, ErrorResponse> {
    let mut text: Option<String> = None;
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "text" => text = Some(field.text().await.map_err(multipart_error)?),
            "file" => {
                // Browsers send an empty file part when no file was chosen.
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    continue;
                }
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                upload = Some(Upload {
                    filename,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    let text = text.ok_or_else(|| bad_request("missing 'text' field"))?;

    let mut uploaded_key: Option<String> = None;
    let attachment_url = match upload {
        Some(upload) => {
            let key = sanitize_filename(&upload.filename);
            if key.is_empty() {
                return Err(bad_request("attachment filename has no safe characters"));
            }
            state
                .store
                .put(&key, upload.data, &upload.content_type)
                .await
                .map_err(store_error)?;
            let url = state.store.public_url(&key);
            uploaded_key = Some(key);
            Some(url)
        }
        None => None,
    };

    let input = CreateItem {
        text,
        attachment_url,
    };
    if let Err(e) = state.db.create_item(&input) {
        // The object is already in the store; clean it up so the failed
        // submission leaves nothing behind. The insert error is what the
        // client sees either way.
        if let Some(key) = uploaded_key {
            if let Err(cleanup) = state.store.delete(&key).await {
                warn!("orphan cleanup failed for {key}: {cleanup}");
            }
        }
        return Err(db_error(e));
    }

    Ok(Redirect::to("/"))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, ErrorResponse> {
    state
        .db
        .delete_item(id)
        .map(|()| Redirect::to("/"))
        .map_err(db_error)
}

fn db_error(e: DbError) -> ErrorResponse {
    let status = match &e {
        DbError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() })))
}

fn store_error(e: StoreError) -> ErrorResponse {
    let status = match &e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() })))
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> ErrorResponse {
    bad_request(&format!("malformed multipart body: {e}"))
}

fn bad_request(msg: &str) -> ErrorResponse {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": msg })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_item_maps_to_404() {
        let (status, _) = db_error(DbError::NotFound("item 7".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_db_errors_map_to_500() {
        let (status, _) = db_error(DbError::LockPoisoned);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_transport_errors_map_to_500() {
        let (status, _) = store_error(StoreError::Internal("s3: timeout".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
