//! Route definitions for the form management surface.
//!
//! Every handler mounted here takes the `AdminUser` extractor, so the
//! whole subtree is admin-only.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{forms, submissions};
use crate::state::AppState;

/// Routes mounted at `/forms`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// DELETE /{id}               -> delete
/// POST   /{id}/clone         -> clone_form
/// GET    /{id}/submissions   -> list_by_form
/// POST   /export             -> export
/// POST   /import             -> import
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(forms::list).post(forms::create))
        .route(
            "/{id}",
            get(forms::get_by_id)
                .put(forms::update)
                .delete(forms::delete),
        )
        .route("/{id}/clone", post(forms::clone_form))
        .route("/{id}/submissions", get(submissions::list_by_form))
        .route("/export", post(forms::export))
        .route("/import", post(forms::import))
}
