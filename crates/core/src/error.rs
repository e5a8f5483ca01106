//! Domain error taxonomy shared across the workspace.

/// Domain-level error type.
///
/// The API layer maps these onto HTTP status codes (`NotFound` -> 404,
/// `Validation` -> 400, `Unauthorized` -> 401, `Forbidden` -> 403,
/// `Internal` -> 500).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        entity: &'static str,
        id: crate::types::DbId,
    },

    /// Malformed or missing required request data.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but lacking the required capability.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
