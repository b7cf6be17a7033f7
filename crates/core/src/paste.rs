//! Paste policies for cloning a scene between presentations.
//!
//! The policy decides how much slot identity travels with the copied
//! elements: everything, names only, or bare placements.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// How much of each element group's identity survives a scene clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasteOption {
    /// Copy display names and assigned performers; assignees missing from
    /// the target presentation's cast are added to it.
    WithUsers,
    /// Copy display names, drop assignments.
    WithNames,
    /// Copy bare placements; names and assignments are both dropped.
    ElementsOnly,
}

impl PasteOption {
    /// Display name carried onto the cloned group, if any.
    pub fn carried_display_name(self, source: Option<&str>) -> Option<String> {
        match self {
            PasteOption::WithUsers | PasteOption::WithNames => source.map(str::to_string),
            PasteOption::ElementsOnly => None,
        }
    }

    /// Assignees carried onto the cloned group, if any.
    pub fn carried_assignees(self, source: &[UserId]) -> Vec<UserId> {
        match self {
            PasteOption::WithUsers => source.to_vec(),
            PasteOption::WithNames | PasteOption::ElementsOnly => Vec::new(),
        }
    }

    /// Whether this policy pulls copied assignees into the target cast.
    pub fn extends_cast(self) -> bool {
        matches!(self, PasteOption::WithUsers)
    }
}
