//! Public form renderer.
//!
//! Deterministically maps a stored field list + settings to the public
//! form markup. The emitted wrapper carries the resolved theme and all
//! delivery/gate settings as `data-*` attributes; the client-side flow
//! machine ([`crate::flow`]) reads those and drives everything after
//! submit. The renderer itself never touches the network or database.

use crate::field::{FieldKind, FieldSchema};
use crate::settings::{FormSettings, Theme};
use crate::types::DbId;

/// Renderer-side failures.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The form has no fields to render.
    #[error("Form has no fields")]
    EmptyForm,

    /// The stored fields document is not a list of field objects.
    #[error("Invalid form configuration: {0}")]
    InvalidConfig(String),
}

/// Escape text for HTML text/attribute positions.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a form definition to public markup.
///
/// `override_theme` is the embed-level theme override (takes precedence
/// over the form's own setting; invalid values fall back to light).
///
/// Fails with [`RenderError::EmptyForm`] when the field list is empty and
/// [`RenderError::InvalidConfig`] when the stored document is not a list
/// of well-formed field objects.
pub fn render(
    form_id: DbId,
    fields_json: &serde_json::Value,
    settings: &FormSettings,
    override_theme: Option<&str>,
) -> Result<String, RenderError> {
    let fields: Vec<FieldSchema> = match fields_json {
        serde_json::Value::Array(_) => serde_json::from_value(fields_json.clone())
            .map_err(|e| RenderError::InvalidConfig(e.to_string()))?,
        _ => {
            return Err(RenderError::InvalidConfig(
                "fields must be a list".to_string(),
            ))
        }
    };

    if fields.is_empty() {
        return Err(RenderError::EmptyForm);
    }

    let theme = settings.resolve_theme(override_theme);
    let mut html = String::with_capacity(2048);

    render_wrapper_open(&mut html, form_id, theme, settings);

    if settings.enable_social_login {
        render_social_login(&mut html, settings);
    }

    html.push_str(&format!(
        "<form class=\"fg-form\" data-form-id=\"{form_id}\">\n<div class=\"fg-form-message\"></div>\n"
    ));
    for field in &fields {
        render_field(&mut html, field);
    }
    html.push_str("<button type=\"submit\">Submit</button>\n</form>\n");

    if settings.gate_type != crate::settings::GateType::None {
        render_gate(&mut html, settings);
    }

    // Download section, hidden until the flow machine unlocks it.
    html.push_str(
        "<div class=\"fg-form-download\" hidden>\
         <a href=\"\" class=\"fg-form-download-btn\" download>Download Your File</a></div>\n",
    );

    html.push_str("</div>\n");
    Ok(html)
}

fn attr(name: &str, value: &str) -> String {
    format!(" data-{name}=\"{}\"", escape_html(value))
}

fn flag(name: &str, value: bool) -> String {
    format!(" data-{name}=\"{}\"", if value { "1" } else { "0" })
}

fn render_wrapper_open(html: &mut String, form_id: DbId, theme: Theme, settings: &FormSettings) {
    html.push_str("<div class=\"fg-form-wrapper\"");
    html.push_str(&format!(" data-form-id=\"{form_id}\""));
    html.push_str(&attr("theme", theme.as_str()));
    html.push_str(&attr(
        "delivery",
        &serde_json::to_value(settings.delivery_type)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "message".to_string()),
    ));
    html.push_str(&attr(
        "gate",
        &serde_json::to_value(settings.gate_type)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "none".to_string()),
    ));
    html.push_str(&attr("download", settings.download_url.as_deref().unwrap_or("")));
    html.push_str(&attr("redirect", settings.redirect_url.as_deref().unwrap_or("")));
    html.push_str(&attr("success-msg", settings.success_message_or_default()));
    html.push_str(&attr("share-text", settings.share_text.as_deref().unwrap_or("")));
    html.push_str(&attr("share-url", settings.share_url.as_deref().unwrap_or("")));
    html.push_str(&flag("share-facebook", settings.share_facebook));
    html.push_str(&flag("share-twitter", settings.share_twitter));
    html.push_str(&flag("share-linkedin", settings.share_linkedin));
    html.push_str(&flag("social-login", settings.enable_social_login));
    html.push_str(&flag("social-google", settings.social_google));
    html.push_str(&flag("social-facebook", settings.social_facebook));
    html.push_str(&flag("social-instagram", settings.social_instagram));
    html.push_str(">\n");
}

fn render_social_login(html: &mut String, settings: &FormSettings) {
    html.push_str("<div class=\"fg-form-social-login\"><p class=\"fg-form-social-label\">Quick fill with:</p><div class=\"fg-form-social-buttons\">");
    for (enabled, provider, label) in [
        (settings.social_google, "google", "Google"),
        (settings.social_facebook, "facebook", "Facebook"),
        (settings.social_instagram, "instagram", "Instagram"),
    ] {
        if enabled {
            html.push_str(&format!(
                "<button type=\"button\" class=\"fg-form-social-btn fg-social-{provider}\" data-provider=\"{provider}\">{label}</button>"
            ));
        }
    }
    html.push_str("</div><div class=\"fg-form-divider\"><span>or fill manually</span></div></div>\n");
}

fn required_attr(field: &FieldSchema) -> &'static str {
    if field.required {
        " required"
    } else {
        ""
    }
}

fn placeholder_attr(field: &FieldSchema, fallback: &str) -> String {
    let text = if field.kind.ignores_placeholder() {
        fallback
    } else {
        field.placeholder.as_deref().unwrap_or(fallback)
    };
    if text.is_empty() {
        String::new()
    } else {
        format!(" placeholder=\"{}\"", escape_html(text))
    }
}

fn render_field(html: &mut String, field: &FieldSchema) {
    let kind_class = serde_json::to_value(field.kind)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());
    let id = escape_html(&field.id);
    let req = required_attr(field);

    html.push_str(&format!("<div class=\"fg-form-field field-{kind_class}\">"));
    html.push_str(&format!("<label>{}", escape_html(&field.label)));
    if field.required {
        html.push_str("<span class=\"required\">*</span>");
    }
    html.push_str("</label>");

    match field.kind {
        FieldKind::Textarea => {
            html.push_str(&format!(
                "<textarea name=\"{id}\"{}{req}></textarea>",
                placeholder_attr(field, "")
            ));
        }
        FieldKind::Select => {
            html.push_str(&format!("<select name=\"{id}\"{req}>"));
            html.push_str("<option value=\"\">Select...</option>");
            for opt in field.option_list() {
                let opt = escape_html(&opt);
                html.push_str(&format!("<option value=\"{opt}\">{opt}</option>"));
            }
            html.push_str("</select>");
        }
        FieldKind::Checkbox => {
            html.push_str("<div class=\"fg-form-options\">");
            for opt in field.option_list() {
                let opt = escape_html(&opt);
                // Multi-value: collected server-side into a list keyed by the id.
                html.push_str(&format!(
                    "<label class=\"fg-form-check\"><input type=\"checkbox\" name=\"{id}[]\" value=\"{opt}\">{opt}</label>"
                ));
            }
            html.push_str("</div>");
        }
        FieldKind::Radio => {
            html.push_str("<div class=\"fg-form-options\">");
            for opt in field.option_list() {
                let opt = escape_html(&opt);
                html.push_str(&format!(
                    "<label class=\"fg-form-check\"><input type=\"radio\" name=\"{id}\" value=\"{opt}\">{opt}</label>"
                ));
            }
            html.push_str("</div>");
        }
        FieldKind::Name => {
            html.push_str(&format!(
                "<div class=\"fg-form-name-row\">\
                 <input type=\"text\" name=\"{id}_first\" placeholder=\"First Name\"{req}>\
                 <input type=\"text\" name=\"{id}_last\" placeholder=\"Last Name\"{req}></div>"
            ));
        }
        FieldKind::Address => {
            html.push_str(&format!(
                "<div class=\"fg-form-address\">\
                 <input type=\"text\" name=\"{id}_street\" placeholder=\"Street Address\"{req}>\
                 <input type=\"text\" name=\"{id}_city\" placeholder=\"City\"{req}>\
                 <div class=\"fg-form-address-row\">\
                 <input type=\"text\" name=\"{id}_state\" placeholder=\"State\"{req}>\
                 <input type=\"text\" name=\"{id}_zip\" placeholder=\"ZIP Code\"{req}></div></div>"
            ));
        }
        FieldKind::Phone => {
            html.push_str(&format!(
                "<input type=\"tel\" name=\"{id}\"{}{req}>",
                placeholder_attr(field, "(555) 123-4567")
            ));
        }
        FieldKind::Url => {
            html.push_str(&format!(
                "<input type=\"url\" name=\"{id}\"{}{req}>",
                placeholder_attr(field, "https://")
            ));
        }
        FieldKind::Date => {
            html.push_str(&format!("<input type=\"date\" name=\"{id}\"{req}>"));
        }
        FieldKind::Number => {
            let mut extra = String::new();
            if let Some(min) = field.min {
                extra.push_str(&format!(" min=\"{min}\""));
            }
            if let Some(max) = field.max {
                extra.push_str(&format!(" max=\"{max}\""));
            }
            html.push_str(&format!(
                "<input type=\"number\" name=\"{id}\"{}{extra}{req}>",
                placeholder_attr(field, "")
            ));
        }
        FieldKind::Photo => {
            // Interactive upload widget, initialized client-side. URLs are
            // contributed to the submission payload at submit time.
            html.push_str(&format!(
                "<div class=\"fg-form-photo-field\" data-field-id=\"{id}\" \
                 data-max-photos=\"{}\" data-required=\"{}\"></div>",
                field.photo_capacity(),
                if field.required { "1" } else { "0" }
            ));
        }
        FieldKind::Email => {
            html.push_str(&format!(
                "<input type=\"email\" name=\"{id}\"{}{req}>",
                placeholder_attr(field, "")
            ));
        }
        // text, custom, and any persisted type without a dedicated arm fall
        // back to a generic input keyed by the optional htmlType.
        FieldKind::Text | FieldKind::Custom | FieldKind::Unknown => {
            html.push_str(&format!(
                "<input type=\"{}\" name=\"{id}\"{}{req}>",
                escape_html(field.effective_html_type()),
                placeholder_attr(field, "")
            ));
        }
    }

    html.push_str("</div>\n");
}

fn render_gate(html: &mut String, settings: &FormSettings) {
    html.push_str("<div class=\"fg-form-gate\" hidden><div class=\"fg-form-gate-content\">");

    if settings.gate_type.is_share() {
        html.push_str("<h3>Share to unlock your download</h3><p>Share this page on social media to access your content.</p><div class=\"fg-form-share-buttons\">");
        for (enabled, platform, label) in [
            (settings.share_facebook, "facebook", "Share on Facebook"),
            (settings.share_twitter, "twitter", "Share on X"),
            (settings.share_linkedin, "linkedin", "Share on LinkedIn"),
        ] {
            if enabled {
                html.push_str(&format!(
                    "<button class=\"fg-share-btn fg-share-{platform}\" data-platform=\"{platform}\">{label}</button>"
                ));
            }
        }
        html.push_str("</div>");
    }

    if settings.gate_type.is_login() {
        html.push_str("<h3>Login to access your download</h3><p>Sign in with your social account to unlock your content.</p><div class=\"fg-form-social-buttons fg-form-gate-login\">");
        for (enabled, provider, label) in [
            (settings.social_google, "google", "Google"),
            (settings.social_facebook, "facebook", "Facebook"),
            (settings.social_instagram, "instagram", "Instagram"),
        ] {
            if enabled {
                html.push_str(&format!(
                    "<button type=\"button\" class=\"fg-form-social-btn fg-social-{provider}\" data-provider=\"{provider}\">{label}</button>"
                ));
            }
        }
        html.push_str("</div>");
    }

    html.push_str("</div></div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn settings(json: serde_json::Value) -> FormSettings {
        FormSettings::from_value(&json)
    }

    fn one_text_field() -> serde_json::Value {
        serde_json::json!([{"id": "msg", "type": "text", "label": "Message"}])
    }

    #[test]
    fn empty_field_list_is_an_error() {
        let err = render(1, &serde_json::json!([]), &settings(serde_json::json!({})), None);
        assert_matches!(err, Err(RenderError::EmptyForm));
    }

    #[test]
    fn non_list_fields_document_is_invalid_config() {
        let err = render(1, &serde_json::json!({"not": "a list"}), &settings(serde_json::json!({})), None);
        assert_matches!(err, Err(RenderError::InvalidConfig(_)));
    }

    #[test]
    fn wrapper_carries_resolved_theme_and_settings() {
        let html = render(
            7,
            &one_text_field(),
            &settings(serde_json::json!({"theme": "dark", "deliveryType": "download", "downloadUrl": "https://x/file.pdf"})),
            None,
        )
        .unwrap();
        assert!(html.contains("data-form-id=\"7\""));
        assert!(html.contains("data-theme=\"dark\""));
        assert!(html.contains("data-delivery=\"download\""));
        assert!(html.contains("data-download=\"https://x/file.pdf\""));
    }

    #[test]
    fn embed_override_beats_form_theme() {
        let s = settings(serde_json::json!({"theme": "dark"}));
        let html = render(1, &one_text_field(), &s, Some("auto")).unwrap();
        assert!(html.contains("data-theme=\"auto\""));

        let html = render(1, &one_text_field(), &s, Some("bogus")).unwrap();
        assert!(html.contains("data-theme=\"light\""));
    }

    #[test]
    fn select_gets_blank_first_option_and_parsed_options() {
        let fields = serde_json::json!([
            {"id": "pick", "type": "select", "label": "Pick", "options": "A, B ,,C"}
        ]);
        let html = render(1, &fields, &settings(serde_json::json!({})), None).unwrap();
        assert!(html.contains("<option value=\"\">Select...</option>"));
        assert!(html.contains("<option value=\"A\">A</option>"));
        assert!(html.contains("<option value=\"B\">B</option>"));
        assert!(html.contains("<option value=\"C\">C</option>"));
        assert!(!html.contains("Option 1"));
    }

    #[test]
    fn empty_options_render_default_placeholders() {
        let fields = serde_json::json!([
            {"id": "c", "type": "checkbox", "label": "Choose", "options": ""}
        ]);
        let html = render(1, &fields, &settings(serde_json::json!({})), None).unwrap();
        assert!(html.contains("Option 1"));
        assert!(html.contains("Option 2"));
        assert!(html.contains("name=\"c[]\""));
    }

    #[test]
    fn composite_fields_emit_suffixed_inputs() {
        let fields = serde_json::json!([
            {"id": "who", "type": "name", "label": "Name", "required": true},
            {"id": "where", "type": "address", "label": "Address"}
        ]);
        let html = render(1, &fields, &settings(serde_json::json!({})), None).unwrap();
        assert!(html.contains("name=\"who_first\""));
        assert!(html.contains("name=\"who_last\""));
        assert!(html.contains("name=\"where_street\""));
        assert!(html.contains("name=\"where_zip\""));
        // Required name field marks both sub-inputs required.
        assert!(html.contains("name=\"who_first\" placeholder=\"First Name\" required"));
    }

    #[test]
    fn required_field_renders_marker_and_attribute() {
        let fields = serde_json::json!([
            {"id": "e", "type": "email", "label": "Email", "required": true}
        ]);
        let html = render(1, &fields, &settings(serde_json::json!({})), None).unwrap();
        assert!(html.contains("<span class=\"required\">*</span>"));
        assert!(html.contains("type=\"email\" name=\"e\" required"));
    }

    #[test]
    fn unknown_persisted_type_falls_back_to_generic_input() {
        let fields = serde_json::json!([
            {"id": "z", "type": "hologram", "label": "Z", "htmlType": "search"}
        ]);
        let html = render(1, &fields, &settings(serde_json::json!({})), None).unwrap();
        assert!(html.contains("<input type=\"search\" name=\"z\""));
    }

    #[test]
    fn photo_field_renders_widget_with_clamped_capacity() {
        let fields = serde_json::json!([
            {"id": "pics", "type": "photo", "label": "Photos", "maxPhotos": 25}
        ]);
        let html = render(1, &fields, &settings(serde_json::json!({})), None).unwrap();
        assert!(html.contains("fg-form-photo-field"));
        assert!(html.contains("data-max-photos=\"10\""));
    }

    #[test]
    fn gate_section_only_rendered_when_gated() {
        let html = render(1, &one_text_field(), &settings(serde_json::json!({})), None).unwrap();
        assert!(!html.contains("fg-form-gate"));

        let html = render(
            1,
            &one_text_field(),
            &settings(serde_json::json!({"gateType": "share", "shareTwitter": false})),
            None,
        )
        .unwrap();
        assert!(html.contains("fg-form-gate"));
        assert!(html.contains("data-platform=\"facebook\""));
        assert!(!html.contains("data-platform=\"twitter\""));
    }

    #[test]
    fn social_login_block_lists_only_enabled_providers() {
        let html = render(
            1,
            &one_text_field(),
            &settings(serde_json::json!({"enableSocialLogin": true, "socialFacebook": false})),
            None,
        )
        .unwrap();
        assert!(html.contains("fg-form-social-login"));
        assert!(html.contains("data-provider=\"google\""));
        assert!(html.contains("data-provider=\"instagram\""));
        assert!(!html.contains("fg-social-facebook"));
    }

    #[test]
    fn output_is_escaped() {
        let fields = serde_json::json!([
            {"id": "x", "type": "text", "label": "<script>alert(1)</script>"}
        ]);
        let html = render(1, &fields, &settings(serde_json::json!({})), None).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn download_section_is_always_present_and_hidden() {
        let html = render(1, &one_text_field(), &settings(serde_json::json!({})), None).unwrap();
        assert!(html.contains("<div class=\"fg-form-download\" hidden>"));
    }
}
