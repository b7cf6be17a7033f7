//! Text-field normalization shared by the write paths.

use crate::error::CoreError;

/// Require a non-empty value after trimming, returning the trimmed text.
///
/// `field` names the offending input in the error message.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Normalize an optional display name: trim, and fold whitespace-only
/// input to `None` so blank labels never persist.
pub fn normalize_display_name(value: Option<String>) -> Option<String> {
    value.and_then(|name| {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
