//! Formgate event bus.
//!
//! Building blocks for the in-process event system:
//!
//! - [`EventBus`]: publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`FormEvent`]: the canonical domain event envelope, published on
//!   every accepted submission and consumed by background listeners.

pub mod bus;

pub use bus::{EventBus, FormEvent, FORM_SUBMITTED};
