//! The public submission pipeline and admin submission browsing.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use formgate_core::error::CoreError;
use formgate_core::field::FieldSchema;
use formgate_core::identity::extract_contact;
use formgate_core::pagination::{clamp_limit, clamp_offset};
use formgate_core::settings::DEFAULT_SUCCESS_MESSAGE;
use formgate_core::types::DbId;
use formgate_db::models::submission::{NewSubmission, SubmissionMeta};
use formgate_db::repositories::{FormRepo, SubmissionRepo};
use formgate_events::{FormEvent, FORM_SUBMITTED};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::state::AppState;

/// Cookie carrying the visitor id when the body has none.
const VISITOR_COOKIE: &str = "fg_visitor_id";

/// Default page size for admin submission browsing.
const DEFAULT_PAGE_SIZE: i64 = 50;
/// Hard cap on the admin page size.
const MAX_PAGE_SIZE: i64 = 200;

/// Body of the public `POST /submit` endpoint.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub form_id: Option<DbId>,
    pub data: Option<Value>,
    pub visitor_id: Option<String>,
}

/// POST /api/v1/submit (public)
///
/// Validates the payload, persists the submission with request metadata,
/// then runs the best-effort tail: visitor-identity enrichment (failures
/// logged, never surfaced) and a fire-and-forget `form.submitted` event.
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SubmitRequest>,
) -> AppResult<Json<Value>> {
    let form_id = payload
        .form_id
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::InvalidData("Invalid form ID".to_string()))?;

    let data = payload
        .data
        .as_ref()
        .and_then(Value::as_object)
        .filter(|map| !map.is_empty())
        .cloned()
        .ok_or_else(|| AppError::InvalidData("No submission data provided".to_string()))?;

    let form = FormRepo::find_by_id(&state.pool, form_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Form",
            id: form_id,
        }))?;

    let visitor_id = payload
        .visitor_id
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| cookie_value(&headers, VISITOR_COOKIE).unwrap_or_default());

    let meta = SubmissionMeta {
        ip: client_ip(&headers),
        user_agent: header_string(&headers, "user-agent"),
        referer: header_string(&headers, "referer"),
        visitor_id: visitor_id.clone(),
    };

    let submission = SubmissionRepo::insert(
        &state.pool,
        &NewSubmission {
            form_id: form.id,
            data: Value::Object(data.clone()),
            meta,
        },
    )
    .await?;
    tracing::info!(form_id = form.id, submission_id = submission.id, "Submission stored");

    // Best-effort enrichment; nothing past this point can fail the write.
    if let Some(identity) = &state.identity {
        if !visitor_id.is_empty() {
            let fields: Vec<FieldSchema> =
                serde_json::from_value(form.fields.clone()).unwrap_or_default();
            let contact = extract_contact(&data, &fields);

            if !contact.is_empty() {
                if let Err(e) = identity.identify(&visitor_id, &contact).await {
                    tracing::warn!(error = %e, "Visitor identify failed");
                }
            }
            if let Err(e) = identity.increment_form_count(&visitor_id).await {
                tracing::warn!(error = %e, "Visitor form-count increment failed");
            }
        }
    }

    let mut event = FormEvent::new(FORM_SUBMITTED, form.id)
        .with_submission(submission.id)
        .with_payload(json!({"title": form.title, "data": data}));
    if !visitor_id.is_empty() {
        event = event.with_visitor(visitor_id);
    }
    state.event_bus.publish(event);

    Ok(Json(json!({
        "success": true,
        "message": DEFAULT_SUCCESS_MESSAGE,
    })))
}

/// Query parameters for admin submission browsing.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/forms/{id}/submissions
pub async fn list_by_form(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(form_id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Value>> {
    FormRepo::find_by_id(&state.pool, form_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Form",
            id: form_id,
        }))?;

    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);

    let submissions = SubmissionRepo::list_by_form(&state.pool, form_id, limit, offset).await?;
    let total = SubmissionRepo::count_by_form(&state.pool, form_id).await?;

    Ok(Json(json!({
        "submissions": submissions,
        "total": total,
        "limit": limit,
        "offset": offset,
    })))
}

/// First address of `x-forwarded-for`, or empty when not proxied.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

fn header_string(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Extract a cookie value from the `Cookie` header.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get("cookie")?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}
