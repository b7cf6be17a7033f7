//! Assignee-list normalization for element groups.

use crate::error::CoreError;
use crate::types::UserId;

/// Cap on distinct assignees a single element group may carry.
///
/// Deployments can raise this through server configuration; the core rule
/// always deduplicates before counting against the cap.
pub const DEFAULT_MAX_ASSIGNEES_PER_GROUP: usize = 10;

/// Normalize a raw assignee list: drop duplicates (keeping first
/// occurrence order) and enforce the per-group cap.
pub fn normalize_assignees(
    raw: Vec<UserId>,
    max_per_group: usize,
) -> Result<Vec<UserId>, CoreError> {
    let mut seen = std::collections::HashSet::with_capacity(raw.len());
    let mut deduped = Vec::with_capacity(raw.len());
    for user_id in raw {
        if seen.insert(user_id) {
            deduped.push(user_id);
        }
    }
    if deduped.len() > max_per_group {
        return Err(CoreError::Validation(format!(
            "a group can have at most {max_per_group} assignees, got {}",
            deduped.len()
        )));
    }
    Ok(deduped)
}
