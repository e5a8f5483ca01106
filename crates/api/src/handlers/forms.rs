//! Handlers for the `/forms` management resource.
//!
//! All endpoints here require an [`AdminUser`]. Response bodies are the
//! fixed action-result shapes the management UI consumes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use formgate_core::error::CoreError;
use formgate_core::types::DbId;
use formgate_db::models::form::{CreateForm, Form, FormSummary, UpdateForm};
use formgate_db::repositories::FormRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::state::AppState;

/// Version tag written into export bundles.
const EXPORT_VERSION: &str = "1.0";

/// GET /api/v1/forms
pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<FormSummary>>> {
    let forms = FormRepo::list_with_counts(&state.pool).await?;
    Ok(Json(forms))
}

/// GET /api/v1/forms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Form>> {
    let form = find_form(&state, id).await?;
    Ok(Json(form))
}

/// POST /api/v1/forms
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(input): Json<CreateForm>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let form = FormRepo::create(&state.pool, &input).await?;
    tracing::info!(form_id = form.id, title = %form.title, "Form created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": form.id,
            "title": form.title,
            "status": form.status,
            "message": "Form created successfully.",
        })),
    ))
}

/// PUT /api/v1/forms/{id}
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateForm>,
) -> AppResult<Json<Value>> {
    let form = FormRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Form", id }))?;
    tracing::info!(form_id = form.id, "Form updated");

    Ok(Json(json!({
        "id": form.id,
        "message": "Form updated successfully.",
    })))
}

/// DELETE /api/v1/forms/{id}
///
/// Cascades: the form's submissions are removed first, then the
/// definition.
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let deleted = FormRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Form", id }));
    }
    tracing::info!(form_id = id, "Form deleted");

    Ok(Json(json!({"message": "Form deleted successfully."})))
}

/// POST /api/v1/forms/{id}/clone
pub async fn clone_form(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let copy = FormRepo::clone_form(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Form", id }))?;
    tracing::info!(source_id = id, clone_id = copy.id, "Form duplicated");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": copy.id,
            "title": copy.title,
            "message": "Form duplicated successfully.",
        })),
    ))
}

/// Body of `POST /forms/export`.
#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    /// Specific form ids; empty or missing exports everything.
    #[serde(default)]
    pub ids: Vec<DbId>,
}

/// POST /api/v1/forms/export
///
/// Exported forms carry no ids or timestamps so a bundle can be
/// re-imported without collisions.
pub async fn export(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(input): Json<ExportRequest>,
) -> AppResult<Json<Value>> {
    let forms = if input.ids.is_empty() {
        FormRepo::export_all(&state.pool).await?
    } else {
        FormRepo::export_by_ids(&state.pool, &input.ids).await?
    };
    tracing::info!(count = forms.len(), "Exported forms");

    Ok(Json(json!({
        "version": EXPORT_VERSION,
        "exportedAt": chrono::Utc::now().to_rfc3339(),
        "count": forms.len(),
        "forms": forms,
    })))
}

/// POST /api/v1/forms/import
///
/// Each bundle entry is imported independently; failures are collected
/// per title and do not abort the rest. The whole operation fails only
/// when the `forms` key is missing or not a list.
pub async fn import(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(bundle): Json<Value>,
) -> AppResult<Json<Value>> {
    let entries = bundle
        .get("forms")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::InvalidData("Import bundle must contain a forms list".to_string())
        })?;

    let mut imported = 0usize;
    let mut errors: Vec<String> = Vec::new();

    for entry in entries {
        let title = entry
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("Untitled Form")
            .to_string();

        let result = match serde_json::from_value::<CreateForm>(entry.clone()) {
            Ok(input) => FormRepo::create(&state.pool, &input).await.map(|_| ()),
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Malformed import entry");
                errors.push(format!("Failed to import: {title}"));
                continue;
            }
        };

        match result {
            Ok(()) => imported += 1,
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Import entry failed");
                errors.push(format!("Failed to import: {title}"));
            }
        }
    }

    let total = entries.len();
    tracing::info!(imported, total, "Imported form bundle");

    Ok(Json(json!({
        "imported": imported,
        "total": total,
        "errors": errors,
        "message": format!("Imported {imported} of {total} forms."),
    })))
}

async fn find_form(state: &AppState, id: DbId) -> AppResult<Form> {
    FormRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Form", id }))
}
