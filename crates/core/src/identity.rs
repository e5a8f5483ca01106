//! Visitor-identity collaborator seam.
//!
//! An optional external system correlates a cookie-scoped visitor id with
//! contact/profile data across the hosting site. The submission pipeline
//! calls it best-effort after the submission row is committed; failures
//! are logged by the caller and never surface to the submitter.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::field::{FieldKind, FieldSchema};

/// Failure talking to the visitor-identity collaborator.
#[derive(Debug, thiserror::Error)]
#[error("Visitor identity error: {0}")]
pub struct IdentityError(pub String);

/// External visitor-identity collaborator.
#[async_trait]
pub trait VisitorIdentity: Send + Sync {
    /// Attach extracted contact data to a visitor record.
    async fn identify(&self, visitor_id: &str, contact: &Map<String, Value>)
        -> Result<(), IdentityError>;

    /// Bump the visitor's form-submission counter (also for repeat
    /// submitters).
    async fn increment_form_count(&self, visitor_id: &str) -> Result<(), IdentityError>;
}

/// Extract a contact record from submitted data using the form's schema.
///
/// Detection uses the field type first (email/phone/name) and falls back
/// to id/label keywords for generic text fields. Name composites
/// contribute their `_first`/`_last` sub-keys. Returns an empty map when
/// nothing contact-like was submitted.
pub fn extract_contact(data: &Map<String, Value>, fields: &[FieldSchema]) -> Map<String, Value> {
    let mut contact = Map::new();

    for field in fields {
        match field.kind {
            FieldKind::Email => {
                copy_if_present(data, &field.id, "email", &mut contact);
            }
            FieldKind::Phone => {
                copy_if_present(data, &field.id, "phone", &mut contact);
            }
            FieldKind::Name => {
                copy_if_present(data, &format!("{}_first", field.id), "first_name", &mut contact);
                copy_if_present(data, &format!("{}_last", field.id), "last_name", &mut contact);
            }
            FieldKind::Text | FieldKind::Textarea | FieldKind::Custom => {
                if let Some(key) = keyword_contact_key(field) {
                    copy_if_present(data, &field.id, key, &mut contact);
                }
            }
            _ => {}
        }
    }

    contact
}

/// Keyword-based detection for fields whose type alone is not telling.
fn keyword_contact_key(field: &FieldSchema) -> Option<&'static str> {
    let haystack = format!("{} {}", field.id, field.label).to_lowercase();
    if haystack.contains("email") {
        Some("email")
    } else if haystack.contains("phone") {
        Some("phone")
    } else if haystack.contains("name") {
        Some("name")
    } else {
        None
    }
}

fn copy_if_present(
    data: &Map<String, Value>,
    data_key: &str,
    contact_key: &str,
    contact: &mut Map<String, Value>,
) {
    if let Some(value) = data.get(data_key) {
        let is_blank = value.as_str().is_some_and(|s| s.trim().is_empty());
        if !value.is_null() && !is_blank && !contact.contains_key(contact_key) {
            contact.insert(contact_key.to_string(), value.clone());
        }
    }
}
