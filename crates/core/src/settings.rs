//! Form settings: delivery, gating, sharing, and theming configuration.
//!
//! Settings are stored as a JSON document on the form row. The recognized
//! keys are enumerated here with their defaults; anything else is preserved
//! untouched in [`FormSettings::extra`] so new keys never require a schema
//! migration.

use serde::{Deserialize, Serialize};

/// Default success message shown after a plain-message delivery.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Thank you! Your submission has been received.";

/// What the submitter receives after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    Download,
    Redirect,
    // Catch-all must stay last for #[serde(other)].
    #[default]
    #[serde(other)]
    Message,
}

/// Post-submit barrier that must be satisfied before delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateType {
    Share,
    Login,
    FormShare,
    FormLogin,
    // Catch-all must stay last for #[serde(other)].
    #[default]
    #[serde(other)]
    None,
}

impl GateType {
    /// Whether this gate shows the sharing prompt.
    pub fn is_share(self) -> bool {
        matches!(self, GateType::Share | GateType::FormShare)
    }

    /// Whether this gate shows the login prompt.
    pub fn is_login(self) -> bool {
        matches!(self, GateType::Login | GateType::FormLogin)
    }
}

/// Public form color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Auto,
    // Catch-all must stay last for #[serde(other)].
    #[default]
    #[serde(other)]
    Light,
}

impl Theme {
    /// Parse a theme string, falling back to light for anything unknown.
    pub fn parse_or_default(raw: &str) -> Theme {
        match raw {
            "dark" => Theme::Dark,
            "auto" => Theme::Auto,
            _ => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }
}

fn default_true() -> bool {
    true
}

/// The recognized settings of a form, with documented defaults.
///
/// Deserialization is lenient: missing keys take defaults, unrecognized
/// keys land in `extra` and survive a save/load round-trip uninterpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    #[serde(default)]
    pub delivery_type: DeliveryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,

    #[serde(default)]
    pub gate_type: GateType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
    #[serde(default = "default_true")]
    pub share_facebook: bool,
    #[serde(default = "default_true")]
    pub share_twitter: bool,
    #[serde(default = "default_true")]
    pub share_linkedin: bool,

    #[serde(default)]
    pub enable_social_login: bool,
    #[serde(default = "default_true")]
    pub social_google: bool,
    #[serde(default = "default_true")]
    pub social_facebook: bool,
    #[serde(default = "default_true")]
    pub social_instagram: bool,

    #[serde(default)]
    pub theme: Theme,

    /// Unrecognized keys, preserved but not interpreted.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for FormSettings {
    fn default() -> Self {
        // Matches a `{}` settings document.
        serde_json::from_value(serde_json::json!({})).expect("empty settings must deserialize")
    }
}

impl FormSettings {
    /// Parse a stored settings document, treating malformed or non-object
    /// values as empty settings (every key at its default).
    pub fn from_value(value: &serde_json::Value) -> FormSettings {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// The success message with the default text substituted.
    pub fn success_message_or_default(&self) -> &str {
        self.success_message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_SUCCESS_MESSAGE)
    }

    /// Resolve the effective theme: embed-level override wins over the
    /// form's own setting; invalid overrides fall back to light.
    pub fn resolve_theme(&self, override_theme: Option<&str>) -> Theme {
        match override_theme {
            Some(raw) if !raw.is_empty() => Theme::parse_or_default(raw),
            _ => self.theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_take_documented_defaults() {
        let s = FormSettings::from_value(&serde_json::json!({}));
        assert_eq!(s.delivery_type, DeliveryType::Message);
        assert_eq!(s.gate_type, GateType::None);
        assert_eq!(s.theme, Theme::Light);
        assert!(s.share_facebook && s.share_twitter && s.share_linkedin);
        assert!(!s.enable_social_login);
        assert!(s.social_google && s.social_facebook && s.social_instagram);
        assert_eq!(s.success_message_or_default(), DEFAULT_SUCCESS_MESSAGE);
    }

    #[test]
    fn unrecognized_keys_are_preserved() {
        let s = FormSettings::from_value(&serde_json::json!({
            "deliveryType": "download",
            "futureSetting": {"nested": true},
        }));
        assert_eq!(s.delivery_type, DeliveryType::Download);
        assert_eq!(s.extra["futureSetting"]["nested"], true);

        let back = serde_json::to_value(&s).unwrap();
        assert_eq!(back["futureSetting"]["nested"], true);
    }

    #[test]
    fn malformed_settings_fall_back_to_defaults() {
        let s = FormSettings::from_value(&serde_json::json!("not an object"));
        assert_eq!(s.delivery_type, DeliveryType::Message);
    }

    #[test]
    fn theme_override_precedence() {
        let s = FormSettings::from_value(&serde_json::json!({"theme": "dark"}));
        assert_eq!(s.resolve_theme(None), Theme::Dark);
        assert_eq!(s.resolve_theme(Some("")), Theme::Dark);
        assert_eq!(s.resolve_theme(Some("auto")), Theme::Auto);
        assert_eq!(s.resolve_theme(Some("neon")), Theme::Light);
    }

    #[test]
    fn unknown_enum_strings_fall_back_to_defaults() {
        let s = FormSettings::from_value(&serde_json::json!({
            "deliveryType": "teleport",
            "gateType": "captcha",
            "theme": "neon",
        }));
        assert_eq!(s.delivery_type, DeliveryType::Message);
        assert_eq!(s.gate_type, GateType::None);
        assert_eq!(s.theme, Theme::Light);
    }

    #[test]
    fn known_enum_strings_parse_to_their_variants() {
        let s = FormSettings::from_value(&serde_json::json!({
            "deliveryType": "redirect",
            "gateType": "login",
            "theme": "auto",
        }));
        assert_eq!(s.delivery_type, DeliveryType::Redirect);
        assert_eq!(s.gate_type, GateType::Login);
        assert_eq!(s.theme, Theme::Auto);
    }

    #[test]
    fn gate_type_variants_parse_snake_case() {
        let s = FormSettings::from_value(&serde_json::json!({"gateType": "form_share"}));
        assert_eq!(s.gate_type, GateType::FormShare);
        assert!(s.gate_type.is_share());
        assert!(!s.gate_type.is_login());
    }

    #[test]
    fn blank_success_message_uses_default() {
        let s = FormSettings::from_value(&serde_json::json!({"successMessage": ""}));
        assert_eq!(s.success_message_or_default(), DEFAULT_SUCCESS_MESSAGE);
    }
}
