use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use stagemap_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error bodies of
/// the shape `{name, message, action, status_code}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `stagemap_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// The (status, name, action) triple for one taxonomy member.
type ErrorKind = (StatusCode, &'static str, &'static str);

const VALIDATION: ErrorKind = (
    StatusCode::BAD_REQUEST,
    "ValidationError",
    "Correct the request fields and retry.",
);
const NOT_FOUND: ErrorKind = (
    StatusCode::NOT_FOUND,
    "NotFoundError",
    "Check the identifier and retry.",
);
const CONFLICT: ErrorKind = (
    StatusCode::CONFLICT,
    "ConflictError",
    "Use a different value or resolve the duplicate.",
);
const UNAUTHORIZED: ErrorKind = (
    StatusCode::UNAUTHORIZED,
    "UnauthorizedError",
    "Supply a valid caller identity.",
);
const FORBIDDEN: ErrorKind = (
    StatusCode::FORBIDDEN,
    "ForbiddenError",
    "Request access from the presentation owner.",
);
const INTERNAL: ErrorKind = (
    StatusCode::INTERNAL_SERVER_ERROR,
    "InternalError",
    "Retry later; contact support if the problem persists.",
);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (kind, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => (NOT_FOUND, core.to_string()),
                CoreError::Validation(msg) => (VALIDATION, msg.clone()),
                CoreError::Conflict(msg) => (CONFLICT, msg.clone()),
                CoreError::Unauthorized(msg) => (UNAUTHORIZED, msg.clone()),
                CoreError::Forbidden(msg) => (FORBIDDEN, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (INTERNAL, "An internal error occurred".to_string())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (VALIDATION, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (INTERNAL, "An internal error occurred".to_string())
            }
        };

        let (status, name, action) = kind;
        let body = json!({
            "name": name,
            "message": message,
            "action": action,
            "status_code": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into a taxonomy member and message.
///
/// - `RowNotFound` maps to 404.
/// - Foreign-key violations map to 404 (a referenced entity is absent).
/// - Unique and check violations map to 409 and 400 respectively.
/// - Everything else maps to 500 with a sanitized message; driver error
///   shapes never leak to the caller.
fn classify_sqlx_error(err: &sqlx::Error) -> (ErrorKind, String) {
    match err {
        sqlx::Error::RowNotFound => (NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // foreign_key_violation
            Some("23503") => (NOT_FOUND, "Referenced entity not found".to_string()),
            // unique_violation
            Some("23505") => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                (
                    CONFLICT,
                    format!("Duplicate value violates unique constraint: {constraint}"),
                )
            }
            // check_violation
            Some("23514") => (
                VALIDATION,
                "A value is outside its permitted range".to_string(),
            ),
            _ => {
                tracing::error!(error = %db_err, "Database error");
                (INTERNAL, "An internal error occurred".to_string())
            }
        },
        other => {
            tracing::error!(error = %other, "Database error");
            (INTERNAL, "An internal error occurred".to_string())
        }
    }
}
