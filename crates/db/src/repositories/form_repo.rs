//! Repository for form definitions.
//!
//! Covers CRUD, clone, export, and the cascading delete. Input
//! normalization (title fallback, slug derivation, defaults) happens here
//! so create, import, and clone all behave identically.

use sqlx::PgPool;

use formgate_core::naming::slugify;
use formgate_core::types::DbId;

use crate::models::form::{CreateForm, ExportedForm, Form, FormSummary, UpdateForm};
use crate::repositories::SubmissionRepo;

/// Column list for `forms` queries.
const FORM_COLUMNS: &str = "id, title, slug, status, fields, settings, created_at, updated_at";

/// Columns included in export bundles (no id/timestamps).
const EXPORT_COLUMNS: &str = "title, slug, status, fields, settings";

/// Title substituted when a create payload has no usable title.
const UNTITLED: &str = "Untitled Form";

/// Provides CRUD operations for form definitions.
pub struct FormRepo;

impl FormRepo {
    /// List all forms ordered by recency, each annotated with its
    /// submission count.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<FormSummary>, sqlx::Error> {
        sqlx::query_as::<_, FormSummary>(
            "SELECT f.id, f.title, f.slug, f.status, f.created_at, f.updated_at, \
                    COUNT(s.id) AS submissions \
             FROM forms f \
             LEFT JOIN form_submissions s ON s.form_id = f.id \
             GROUP BY f.id \
             ORDER BY f.updated_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Find a form by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Form>, sqlx::Error> {
        let query = format!("SELECT {FORM_COLUMNS} FROM forms WHERE id = $1");
        sqlx::query_as::<_, Form>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new form with normalized inputs: trimmed title falling
    /// back to "Untitled Form", derived slug, `[]`/`{}`/draft defaults.
    pub async fn create(pool: &PgPool, input: &CreateForm) -> Result<Form, sqlx::Error> {
        let title = match input.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => UNTITLED.to_string(),
        };
        let slug = slugify(&title);
        let status = match input.status.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => "draft".to_string(),
        };
        let fields = input
            .fields
            .clone()
            .unwrap_or_else(|| serde_json::json!([]));
        let settings = input
            .settings
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));

        let query = format!(
            "INSERT INTO forms (title, slug, status, fields, settings) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {FORM_COLUMNS}"
        );
        sqlx::query_as::<_, Form>(&query)
            .bind(&title)
            .bind(&slug)
            .bind(&status)
            .bind(&fields)
            .bind(&settings)
            .fetch_one(pool)
            .await
    }

    /// Partially update a form. Only the provided keys change; a new
    /// title also re-derives the slug; `updated_at` is always refreshed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateForm,
    ) -> Result<Option<Form>, sqlx::Error> {
        let slug = input.title.as_deref().map(slugify);
        let query = format!(
            "UPDATE forms SET \
                title = COALESCE($2, title), \
                slug = COALESCE($3, slug), \
                fields = COALESCE($4, fields), \
                settings = COALESCE($5, settings), \
                status = COALESCE($6, status), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {FORM_COLUMNS}"
        );
        sqlx::query_as::<_, Form>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&slug)
            .bind(&input.fields)
            .bind(&input.settings)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a form and its submissions.
    ///
    /// Submissions go first, then the definition; the two steps are
    /// deliberately sequential, not transactional. A crash in between
    /// leaves an empty form (harmless); the reverse ordering would orphan
    /// submissions and is forbidden. Returns `true` if the form existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let removed = SubmissionRepo::delete_by_form(pool, id).await?;
        if removed > 0 {
            tracing::debug!(form_id = id, removed, "Deleted submissions before form");
        }

        let result = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Duplicate a form: same fields/settings, title suffixed " (Copy)",
    /// status reset to draft. Returns `None` if the source is missing.
    pub async fn clone_form(pool: &PgPool, id: DbId) -> Result<Option<Form>, sqlx::Error> {
        let Some(source) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let input = CreateForm {
            title: Some(format!("{} (Copy)", source.title)),
            fields: Some(source.fields),
            settings: Some(source.settings),
            status: Some("draft".to_string()),
        };
        Self::create(pool, &input).await.map(Some)
    }

    /// Export specific forms. Order follows the underlying query
    /// (ascending id), not the order ids were given.
    pub async fn export_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<ExportedForm>, sqlx::Error> {
        let query = format!("SELECT {EXPORT_COLUMNS} FROM forms WHERE id = ANY($1) ORDER BY id ASC");
        sqlx::query_as::<_, ExportedForm>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Export every form, ordered by id.
    pub async fn export_all(pool: &PgPool) -> Result<Vec<ExportedForm>, sqlx::Error> {
        let query = format!("SELECT {EXPORT_COLUMNS} FROM forms ORDER BY id ASC");
        sqlx::query_as::<_, ExportedForm>(&query)
            .fetch_all(pool)
            .await
    }
}
