//! Public form rendering endpoint.

use axum::extract::{Path, Query, State};
use axum::response::Html;
use serde::Deserialize;

use formgate_core::error::CoreError;
use formgate_core::render;
use formgate_core::settings::FormSettings;
use formgate_core::types::DbId;
use formgate_db::repositories::FormRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for the render endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct RenderParams {
    /// Embed-level theme override; takes precedence over the form setting.
    pub theme: Option<String>,
}

/// GET /api/v1/render/{id} (public)
///
/// Renders the stored definition to embeddable markup. 404 for unknown
/// forms, 400 when the field list is empty or malformed.
pub async fn render_form(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RenderParams>,
) -> AppResult<Html<String>> {
    let form = FormRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Form", id }))?;

    let settings = FormSettings::from_value(&form.settings);
    let markup = render::render(form.id, &form.fields, &settings, params.theme.as_deref())?;

    Ok(Html(markup))
}
