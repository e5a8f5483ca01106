//! Integration tests for the public submission pipeline.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{auth_get, body_json, create_form, get, post_json};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Validation matrix
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_without_form_id_is_invalid_data(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/submit",
        serde_json::json!({"data": {"a": "b"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_DATA");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_with_zero_form_id_is_invalid_data(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/submit",
        serde_json::json!({"form_id": 0, "data": {"a": "b"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_DATA");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_with_empty_data_is_invalid_data(pool: PgPool) {
    let id = create_form(&pool, serde_json::json!({"title": "Empty Data"})).await;

    for body in [
        serde_json::json!({"form_id": id}),
        serde_json::json!({"form_id": id, "data": {}}),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/v1/submit", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "INVALID_DATA");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_to_unknown_form_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/submit",
        serde_json::json!({"form_id": 987654, "data": {"a": "b"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_persists_data_and_returns_thank_you(pool: PgPool) {
    let id = create_form(&pool, serde_json::json!({"title": "Feedback"})).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/submit",
        serde_json::json!({"form_id": id, "data": {"x": "y"}, "visitor_id": "v-77"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Thank you! Your submission has been received.");

    let (data, meta): (serde_json::Value, serde_json::Value) = sqlx::query_as(
        "SELECT data, meta FROM form_submissions WHERE form_id = $1",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(data["x"], "y");
    assert_eq!(meta["visitor_id"], "v-77");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_falls_back_to_visitor_cookie(pool: PgPool) {
    let id = create_form(&pool, serde_json::json!({"title": "Cookied"})).await;

    let app = common::build_test_app(pool.clone());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/submit")
        .header("content-type", "application/json")
        .header("cookie", "session=abc; fg_visitor_id=cookie-visitor")
        .header("user-agent", "integration-test")
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .body(Body::from(
            serde_json::json!({"form_id": id, "data": {"a": "b"}}).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (meta,): (serde_json::Value,) =
        sqlx::query_as("SELECT meta FROM form_submissions WHERE form_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(meta["visitor_id"], "cookie-visitor");
    assert_eq!(meta["ua"], "integration-test");
    assert_eq!(meta["ip"], "203.0.113.7");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_publishes_event_with_data(pool: PgPool) {
    let id = create_form(&pool, serde_json::json!({"title": "Notified"})).await;

    let bus = std::sync::Arc::new(formgate_events::EventBus::default());
    let mut rx = bus.subscribe();

    let app = common::build_test_app_with_bus(pool, bus);
    let response = post_json(
        app,
        "/api/v1/submit",
        serde_json::json!({"form_id": id, "data": {"x": "y"}, "visitor_id": "v-9"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Published before the response is returned, so it is already queued.
    let event = rx.try_recv().unwrap();
    assert_eq!(event.event_type, formgate_events::FORM_SUBMITTED);
    assert_eq!(event.form_id, id);
    assert!(event.submission_id.is_some());
    assert_eq!(event.visitor_id.as_deref(), Some("v-9"));
    assert_eq!(event.payload["title"], "Notified");
    assert_eq!(event.payload["data"]["x"], "y");
}

// ---------------------------------------------------------------------------
// Admin submission browsing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_submissions_paginates_newest_first(pool: PgPool) {
    let id = create_form(&pool, serde_json::json!({"title": "Paged"})).await;

    for i in 0..3 {
        let app = common::build_test_app(pool.clone());
        post_json(
            app,
            "/api/v1/submit",
            serde_json::json!({"form_id": id, "data": {"n": i}}),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let response = auth_get(app, &format!("/api/v1/forms/{id}/submissions?limit=2")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["limit"], 2);
    let rows = json["submissions"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Newest first.
    assert_eq!(rows[0]["data"]["n"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_submissions_requires_auth(pool: PgPool) {
    let id = create_form(&pool, serde_json::json!({"title": "Guarded"})).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/forms/{id}/submissions")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_submissions_for_unknown_form_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = auth_get(app, "/api/v1/forms/55555/submissions").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
