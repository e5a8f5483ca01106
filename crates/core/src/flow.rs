//! Post-submit delivery/gate flow machine.
//!
//! Models the client-side behavior of one form instance after the visitor
//! presses submit: `Idle -> Submitting -> {Error, post-success}`, where the
//! post-success state is chosen by configuration precedence (gate first,
//! then redirect, then download, then plain message).
//!
//! Share unlocking is intent-based: clicking a share button opens a share
//! intent and is immediately counted as "shared"; there is no callback to
//! verify the share actually happened. The unlock lasts for the current
//! client session only.

use serde::Serialize;

use crate::settings::{DeliveryType, FormSettings, GateType};

/// Delay before navigating on redirect delivery, in milliseconds.
pub const REDIRECT_DELAY_MS: u64 = 500;

/// Share platforms offered by the share gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Facebook,
    Twitter,
    Linkedin,
}

impl SharePlatform {
    /// Build the share-intent URL for this platform.
    ///
    /// `text` and `url` are percent-encoded into the intent query string.
    pub fn intent_url(self, text: &str, url: &str) -> String {
        let text = percent_encode(text);
        let url = percent_encode(url);
        match self {
            SharePlatform::Facebook => {
                format!("https://www.facebook.com/sharer/sharer.php?u={url}")
            }
            SharePlatform::Twitter => {
                format!("https://twitter.com/intent/tweet?text={text}&url={url}")
            }
            SharePlatform::Linkedin => {
                format!("https://www.linkedin.com/shareArticle?mini=true&url={url}&title={text}")
            }
        }
    }
}

/// Minimal percent-encoding for query-string values.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// The observable state of one form instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FlowState {
    /// Form is editable, nothing in flight.
    Idle,
    /// Submission request in flight; the submit control is disabled.
    Submitting,
    /// Gate UI shown; delivery withheld until the gate is satisfied.
    Gated,
    /// Navigating to the configured redirect URL after a short delay.
    Redirecting { url: String, delay_ms: u64 },
    /// Download link revealed; form hidden.
    Unlocked { download_url: String },
    /// Success message shown; form reset to blank.
    Success { message: String },
    /// Submission failed; server message shown, form editable again.
    Error { message: String },
}

/// Per-instance flow machine over a form's delivery/gate settings.
#[derive(Debug, Clone)]
pub struct SubmitFlow {
    delivery_type: DeliveryType,
    gate_type: GateType,
    download_url: Option<String>,
    redirect_url: Option<String>,
    success_message: String,
    state: FlowState,
    /// Session-scoped share unlock flag.
    shared: bool,
}

impl SubmitFlow {
    /// Build a flow machine from a form's settings.
    pub fn new(settings: &FormSettings) -> Self {
        Self {
            delivery_type: settings.delivery_type,
            gate_type: settings.gate_type,
            download_url: settings.download_url.clone().filter(|u| !u.is_empty()),
            redirect_url: settings.redirect_url.clone().filter(|u| !u.is_empty()),
            success_message: settings.success_message_or_default().to_string(),
            state: FlowState::Idle,
            shared: false,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// The visitor pressed submit; the request is now in flight.
    ///
    /// Only legal from `Idle` or `Error` (manual resubmit); there is no
    /// retry policy, the visitor fires again by hand.
    pub fn begin_submit(&mut self) {
        if matches!(self.state, FlowState::Idle | FlowState::Error { .. }) {
            self.state = FlowState::Submitting;
        }
    }

    /// The pipeline accepted the submission. Branches per precedence:
    /// gate, then redirect, then download, then plain message.
    pub fn submit_succeeded(&mut self) {
        if self.state != FlowState::Submitting {
            return;
        }
        self.state = if self.gate_type != GateType::None && !self.shared {
            FlowState::Gated
        } else {
            self.delivery_state()
        };
    }

    /// The pipeline rejected the submission (network failure or non-2xx).
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        if self.state == FlowState::Submitting {
            self.state = FlowState::Error {
                message: message.into(),
            };
        }
    }

    /// A share button was clicked while gated.
    ///
    /// Intent-based: the click itself unlocks the gate and the flow moves
    /// straight to whichever delivery state applies.
    pub fn record_share(&mut self, _platform: SharePlatform) {
        if self.state == FlowState::Gated {
            self.shared = true;
            self.state = self.delivery_state();
        }
    }

    fn delivery_state(&self) -> FlowState {
        match (self.delivery_type, &self.redirect_url, &self.download_url) {
            (DeliveryType::Redirect, Some(url), _) => FlowState::Redirecting {
                url: url.clone(),
                delay_ms: REDIRECT_DELAY_MS,
            },
            (DeliveryType::Download, _, Some(url)) => FlowState::Unlocked {
                download_url: url.clone(),
            },
            _ => FlowState::Success {
                message: self.success_message.clone(),
            },
        }
    }
}
