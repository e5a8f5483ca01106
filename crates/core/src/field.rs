//! Field schema: the typed definition of a single form field.
//!
//! Field lists are stored as JSON on the form row and deserialized into
//! `Vec<FieldSchema>` at render/submit time. Deserialization is lenient:
//! unknown field types map to [`FieldKind::Unknown`] so old data keeps
//! rendering (as a generic input) while [`validate`] rejects them on write.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Substituted when an options-bearing field has no usable options.
pub const DEFAULT_OPTIONS: [&str; 2] = ["Option 1", "Option 2"];

/// Upper bound on photos per photo field.
pub const MAX_PHOTOS_CAP: u32 = 10;

/// The closed set of field types.
///
/// `Unknown` is a forward-compatibility arm for persisted data only; new
/// first-class types get their own variant and renderer arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Name,
    Email,
    Phone,
    Address,
    Url,
    Textarea,
    Number,
    Select,
    Checkbox,
    Radio,
    Date,
    Photo,
    Custom,
    #[serde(other)]
    Unknown,
}

impl FieldKind {
    /// Structural types ignore the `placeholder` property.
    pub fn ignores_placeholder(self) -> bool {
        matches!(
            self,
            FieldKind::Name
                | FieldKind::Address
                | FieldKind::Checkbox
                | FieldKind::Radio
                | FieldKind::Photo
        )
    }
}

/// One field's definition within a form.
///
/// `id` is assigned by the editor at creation, unique within the owning
/// form, and immutable; list order is render order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Raw comma-delimited option string for select/checkbox/radio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Input type for `custom` fields; defaults to `"text"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_type: Option<String>,
    /// Photo field capacity, clamped to 1..=10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_photos: Option<u32>,
}

impl FieldSchema {
    /// Parsed option list with the two-item default substituted when the
    /// raw string yields nothing. Never blocks rendering.
    pub fn option_list(&self) -> Vec<String> {
        parse_options(self.options.as_deref().unwrap_or(""))
    }

    /// Effective photo capacity for a photo field.
    pub fn photo_capacity(&self) -> u32 {
        clamp_max_photos(self.max_photos.unwrap_or(1))
    }

    /// Effective input type for a `custom` field.
    pub fn effective_html_type(&self) -> &str {
        self.html_type.as_deref().unwrap_or("text")
    }

    /// Submission keys this field contributes to the data map.
    ///
    /// Composite fields submit as suffixed keys; everything else submits
    /// under the field id itself (checkbox values are collected into a list
    /// keyed by the plain id).
    pub fn submission_keys(&self) -> Vec<String> {
        match self.kind {
            FieldKind::Name => vec![format!("{}_first", self.id), format!("{}_last", self.id)],
            FieldKind::Address => vec![
                format!("{}_street", self.id),
                format!("{}_city", self.id),
                format!("{}_state", self.id),
                format!("{}_zip", self.id),
            ],
            _ => vec![self.id.clone()],
        }
    }
}

/// Split a raw comma-delimited option string into trimmed entries.
///
/// Empty entries are dropped; an empty result substitutes the two-item
/// default placeholder list.
pub fn parse_options(raw: &str) -> Vec<String> {
    let options: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if options.is_empty() {
        DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect()
    } else {
        options
    }
}

/// Clamp a photo-field capacity into `1..=10`.
pub fn clamp_max_photos(value: u32) -> u32 {
    value.clamp(1, MAX_PHOTOS_CAP)
}

/// Validate a single field definition.
///
/// Rejects empty ids and unknown types. Renderable leniency (option
/// defaults, clamps) is handled by the accessors, not here.
pub fn validate(field: &FieldSchema) -> Result<(), CoreError> {
    if field.id.trim().is_empty() {
        return Err(CoreError::Validation("Field id must not be empty".into()));
    }
    if field.kind == FieldKind::Unknown {
        return Err(CoreError::Validation(format!(
            "Field '{}' has an unknown type",
            field.id
        )));
    }
    Ok(())
}

/// Validate a whole field list: per-field rules plus id uniqueness.
pub fn validate_all(fields: &[FieldSchema]) -> Result<(), CoreError> {
    let mut seen = std::collections::HashSet::new();
    for field in fields {
        validate(field)?;
        if !seen.insert(field.id.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate field id '{}'",
                field.id
            )));
        }
    }
    Ok(())
}
