pub mod forms;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /forms                        list, create (admin only)
/// /forms/{id}                   get, update, delete
/// /forms/{id}/clone             duplicate (POST)
/// /forms/{id}/submissions       paginated submissions (GET)
/// /forms/export                 export bundle (POST)
/// /forms/import                 import bundle (POST)
///
/// /submit                       public submission (POST)
/// /upload-photo                 public photo upload (POST, multipart)
/// /render/{id}                  public form markup (GET, ?theme=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/forms", forms::router())
        .merge(public::router())
}
