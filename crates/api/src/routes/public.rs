//! Route definitions for the public, unauthenticated surface.
//!
//! These endpoints exist to collect input from anonymous visitors, so
//! they deliberately take no auth.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use formgate_core::upload::MAX_PHOTO_BYTES;

use crate::handlers::{render, submissions, uploads};
use crate::state::AppState;

/// Body limit for the upload route, well above the photo size cap.
/// Oversized photos must reach the handler so it can answer with the
/// proper FILE_TOO_LARGE body instead of a bare 413; only bodies too
/// big to even buffer are cut off at the transport level.
const UPLOAD_BODY_LIMIT: usize = 4 * MAX_PHOTO_BYTES;

/// Public routes mounted directly under `/api/v1`.
///
/// ```text
/// POST   /submit         -> submit
/// POST   /upload-photo   -> upload_photo
/// GET    /render/{id}    -> render_form
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submissions::submit))
        .route(
            "/upload-photo",
            post(uploads::upload_photo).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/render/{id}", get(render::render_form))
}
