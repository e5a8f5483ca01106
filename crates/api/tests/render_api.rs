//! Integration tests for the public render endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_string, create_form, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_render_unknown_form_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/render/123456").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_render_empty_form_is_400(pool: PgPool) {
    let id = create_form(&pool, serde_json::json!({"title": "No Fields"})).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/render/{id}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "EMPTY_FORM");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_render_malformed_fields_is_invalid_config(pool: PgPool) {
    let id = create_form(
        &pool,
        serde_json::json!({"title": "Broken", "fields": {"not": "a list"}}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/render/{id}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_CONFIG");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_render_emits_wrapper_and_fields(pool: PgPool) {
    let id = create_form(
        &pool,
        serde_json::json!({
            "title": "Render Me",
            "fields": [
                {"id": "email", "type": "email", "label": "Email", "required": true},
                {"id": "color", "type": "select", "label": "Color", "options": "Red, Blue"},
            ],
            "settings": {"theme": "dark", "deliveryType": "download", "downloadUrl": "https://x/d.pdf"},
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/render/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("fg-form-wrapper"));
    assert!(html.contains(&format!("data-form-id=\"{id}\"")));
    assert!(html.contains("data-theme=\"dark\""));
    assert!(html.contains("data-delivery=\"download\""));
    assert!(html.contains("name=\"email\""));
    assert!(html.contains("<option value=\"Red\">"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_render_theme_query_overrides_setting(pool: PgPool) {
    let id = create_form(
        &pool,
        serde_json::json!({
            "title": "Themed",
            "fields": [{"id": "a", "type": "text", "label": "A"}],
            "settings": {"theme": "dark"},
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/render/{id}?theme=auto")).await;
    let html = body_string(response).await;
    assert!(html.contains("data-theme=\"auto\""));
}
