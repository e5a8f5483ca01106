//! Submission models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use formgate_core::types::{DbId, Timestamp};

/// A row from the `form_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: DbId,
    pub form_id: DbId,
    /// Field id -> submitted value (string, or list for multi-value fields).
    pub data: serde_json::Value,
    /// Request metadata captured at submit time.
    pub meta: serde_json::Value,
    pub created_at: Timestamp,
}

/// Request metadata derived when a submission is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionMeta {
    pub ip: String,
    #[serde(rename = "ua")]
    pub user_agent: String,
    pub referer: String,
    /// Cookie-scoped visitor id; empty means anonymous.
    pub visitor_id: String,
}

/// Insert payload for a new submission.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub form_id: DbId,
    pub data: serde_json::Value,
    pub meta: SubmissionMeta,
}
