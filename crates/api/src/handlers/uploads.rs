//! Public photo upload endpoint.
//!
//! Accepts a multipart `photo` part, sniffs the content type (the client
//! filename and Content-Type are never trusted), enforces the size cap,
//! and stores the file under the date-partitioned public tree.

use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use formgate_core::upload::{self, UploadError};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/upload-photo (public)
///
/// Validation order: part presence, transport, sniffed MIME, size.
/// Success returns the public URL plus an opaque id distinct from the
/// stored filename.
pub async fn upload_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    let mut bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Transport(e.to_string()))?
    {
        if field.name() == Some("photo") {
            bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| UploadError::Transport(e.to_string()))?,
            );
            break;
        }
    }

    let bytes = bytes.ok_or(UploadError::NoFile)?;
    let mime = upload::validate_photo(&bytes)?;

    let subdir = upload::storage_subdir(chrono::Utc::now());
    let dir = state.config.upload_dir.join("photos").join(&subdir);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let filename = upload::random_filename(mime);
    let path = dir.join(&filename);
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store photo: {e}")))?;

    // The tree is served as static content, so files must be world-readable.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644))
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to set permissions: {e}")))?;
    }

    let url = format!(
        "{}/uploads/photos/{subdir}/{filename}",
        state.config.public_base_url
    );
    tracing::info!(
        filename = %filename,
        size = bytes.len(),
        mime = mime.as_str(),
        "Photo stored"
    );

    Ok(Json(json!({
        "success": true,
        "url": url,
        "filename": filename,
        "id": Uuid::new_v4().to_string(),
    })))
}
