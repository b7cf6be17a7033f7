//! Pure domain logic for the stage-map service.
//!
//! This crate has no I/O: it holds the error taxonomy, id/timestamp aliases,
//! and the validation and policy rules shared by the repository and API
//! layers (stage-canvas bounds, assignee-set normalization, scene reorder
//! validation, paste policies for scene cloning).

pub mod assignment;
pub mod error;
pub mod ordering;
pub mod paste;
pub mod stage;
pub mod text;
pub mod types;
