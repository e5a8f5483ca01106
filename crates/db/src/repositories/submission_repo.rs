//! Repository for public form submissions.

use sqlx::PgPool;

use formgate_core::types::DbId;

use crate::models::submission::{NewSubmission, Submission};

/// Column list for `form_submissions` queries.
const SUBMISSION_COLUMNS: &str = "id, form_id, data, meta, created_at";

/// Provides insert/query operations for submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Persist a submission. The data map is stored as given; it is not
    /// re-validated against the field schema.
    pub async fn insert(pool: &PgPool, input: &NewSubmission) -> Result<Submission, sqlx::Error> {
        let meta = serde_json::to_value(&input.meta).unwrap_or_else(|_| serde_json::json!({}));
        let query = format!(
            "INSERT INTO form_submissions (form_id, data, meta) \
             VALUES ($1, $2, $3) \
             RETURNING {SUBMISSION_COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(input.form_id)
            .bind(&input.data)
            .bind(&meta)
            .fetch_one(pool)
            .await
    }

    /// List a form's submissions, newest first, paginated.
    pub async fn list_by_form(
        pool: &PgPool,
        form_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Submission>, sqlx::Error> {
        let query = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM form_submissions \
             WHERE form_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(form_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count submissions for one form.
    pub async fn count_by_form(pool: &PgPool, form_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM form_submissions WHERE form_id = $1")
                .bind(form_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Delete all submissions for a form. Returns the number removed.
    pub async fn delete_by_form(pool: &PgPool, form_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM form_submissions WHERE form_id = $1")
            .bind(form_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
