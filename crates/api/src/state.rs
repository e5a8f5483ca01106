use std::sync::Arc;

use formgate_core::identity::VisitorIdentity;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: formgate_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Event bus the submission pipeline publishes on.
    pub event_bus: Arc<formgate_events::EventBus>,
    /// Optional visitor-identity collaborator. `None` disables enrichment.
    pub identity: Option<Arc<dyn VisitorIdentity>>,
}
