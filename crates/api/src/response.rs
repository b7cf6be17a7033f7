//! Shared response payload types for API handlers.
//!
//! Small operation outcomes get typed structs instead of ad-hoc
//! `serde_json::json!` so the wire shape is checked at compile time.

use serde::Serialize;
use stagemap_core::types::DbId;

/// Body for successful deletes: the id that is now gone.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: DbId,
}

/// Body for a group merge: how many elements moved to the target.
#[derive(Debug, Serialize)]
pub struct MergeOutcome {
    pub elements_moved: i64,
}

/// Body for a presentation-wide slot rename: how many groups changed.
#[derive(Debug, Serialize)]
pub struct RenameOutcome {
    pub updated_count: i64,
}

/// Body for cast-membership outcomes that carry no row of their own,
/// such as an add that found the user already present.
#[derive(Debug, Serialize)]
pub struct CastStatus {
    pub message: &'static str,
}
