//! Scene-order validation for presentation reorders.
//!
//! A reorder request must be a permutation of the presentation's current
//! scene ids: no duplicates, nothing missing, nothing foreign.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Check that `requested` is a permutation of `current`.
///
/// The error message names the first offending id: duplicated, foreign,
/// or missing, checked in that order.
pub fn validate_reorder(current: &[DbId], requested: &[DbId]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(requested.len());
    for id in requested {
        if !seen.insert(*id) {
            return Err(CoreError::Validation(format!(
                "scene {id} appears more than once in the requested order"
            )));
        }
    }

    let current_set: HashSet<DbId> = current.iter().copied().collect();
    for id in requested {
        if !current_set.contains(id) {
            return Err(CoreError::Validation(format!(
                "scene {id} does not belong to this presentation"
            )));
        }
    }
    if let Some(missing) = current.iter().find(|id| !seen.contains(id)) {
        return Err(CoreError::Validation(format!(
            "scene {missing} is missing from the requested order"
        )));
    }
    Ok(())
}
