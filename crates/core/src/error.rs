/// Domain-level error taxonomy.
///
/// The API layer maps each variant onto an HTTP status code; see
/// `notifyhub-api`'s `error` module. Lookups happen both by numeric id and
/// by stable code (`notification_types.code`), so [`CoreError::NotFound`]
/// carries the lookup key as a string.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} ({key})")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
