/// Domain error taxonomy shared by every layer.
///
/// The API layer maps each variant to an HTTP status: NotFound -> 404,
/// Validation -> 400, Conflict -> 409, Unauthorized -> 401, Forbidden -> 403,
/// Internal -> 500. `NotFound` carries a formatted key rather than a raw id
/// because some entities (viewers) are keyed by composite pairs.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} {key} not found")]
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

impl CoreError {
    /// Shorthand for a `NotFound` with a displayable key.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
