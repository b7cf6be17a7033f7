//! Stage-canvas bounds and placement validation.
//!
//! Element positions are percentages of the stage canvas; both axes run
//! from [`STAGE_MIN`] to [`STAGE_MAX`].

use crate::error::CoreError;

/// Lowest valid coordinate on either axis.
pub const STAGE_MIN: f64 = 0.0;

/// Highest valid coordinate on either axis.
pub const STAGE_MAX: f64 = 100.0;

/// Validate a single stage coordinate.
///
/// NaN and infinity are rejected along with out-of-range values; `axis`
/// names the offending field in the error message.
pub fn validate_coordinate(axis: &'static str, value: f64) -> Result<(), CoreError> {
    if value.is_nan() || value.is_infinite() {
        return Err(CoreError::Validation(format!(
            "{axis} must be a finite number"
        )));
    }
    if !(STAGE_MIN..=STAGE_MAX).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{axis} must be between {STAGE_MIN} and {STAGE_MAX}, got {value}"
        )));
    }
    Ok(())
}

/// Validate an (x, y) placement on the stage canvas.
pub fn validate_position(x: f64, y: f64) -> Result<(), CoreError> {
    validate_coordinate("position_x", x)?;
    validate_coordinate("position_y", y)
}
