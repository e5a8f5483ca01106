//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`FormEvent`]s. It is
//! shared via `Arc<EventBus>` across the application; the submission
//! pipeline publishes, background listeners subscribe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use formgate_core::types::DbId;

/// Event name published after a submission is persisted.
pub const FORM_SUBMITTED: &str = "form.submitted";

// ---------------------------------------------------------------------------
// FormEvent
// ---------------------------------------------------------------------------

/// A domain event raised by the forms pipeline.
///
/// Constructed via [`FormEvent::new`] and enriched with the builder
/// methods [`with_submission`](FormEvent::with_submission),
/// [`with_visitor`](FormEvent::with_visitor), and
/// [`with_payload`](FormEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormEvent {
    /// Dot-separated event name, e.g. `"form.submitted"`.
    pub event_type: String,

    /// The form the event concerns.
    pub form_id: DbId,

    /// Submission id, when the event was raised by a submission.
    pub submission_id: Option<DbId>,

    /// Visitor cookie id, when one accompanied the request.
    pub visitor_id: Option<String>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl FormEvent {
    /// Create a new event with only the required name and form id.
    ///
    /// All optional fields default to `None` / empty object.
    pub fn new(event_type: impl Into<String>, form_id: DbId) -> Self {
        Self {
            event_type: event_type.into(),
            form_id,
            submission_id: None,
            visitor_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the submission that raised the event.
    pub fn with_submission(mut self, submission_id: DbId) -> Self {
        self.submission_id = Some(submission_id);
        self
    }

    /// Attach the visitor that triggered the event.
    pub fn with_visitor(mut self, visitor_id: impl Into<String>) -> Self {
        self.visitor_id = Some(visitor_id.into());
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`FormEvent`].
///
/// # Usage
///
/// ```rust
/// use formgate_events::bus::{EventBus, FormEvent, FORM_SUBMITTED};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(FormEvent::new(FORM_SUBMITTED, 1));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<FormEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Fire-and-forget: if there are no active subscribers the event is
    /// silently dropped, and publishing never blocks the caller.
    pub fn publish(&self, event: FormEvent) {
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
