//! Form definition models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use formgate_core::types::{DbId, Timestamp};

/// A row from the `forms` table. `fields` and `settings` are stored as
/// JSON documents and decoded by the core layer when interpreted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Form {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub fields: serde_json::Value,
    pub settings: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List-view row: no field/settings payloads, plus the submission count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FormSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Count of submissions referencing this form.
    pub submissions: i64,
}

/// DTO for creating a form. Every part is optional; the store substitutes
/// "Untitled Form", `[]`, `{}`, and `"draft"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateForm {
    pub title: Option<String>,
    pub fields: Option<serde_json::Value>,
    pub settings: Option<serde_json::Value>,
    pub status: Option<String>,
}

/// DTO for partially updating a form. Only provided keys are touched;
/// `updated_at` is always refreshed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateForm {
    pub title: Option<String>,
    pub fields: Option<serde_json::Value>,
    pub settings: Option<serde_json::Value>,
    pub status: Option<String>,
}

/// One form inside an export bundle: no id or timestamps, so a bundle can
/// be re-imported without collisions.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExportedForm {
    pub title: String,
    pub slug: String,
    pub status: String,
    pub fields: serde_json::Value,
    pub settings: serde_json::Value,
}
