//! HTTP handlers, one module per resource.
//!
//! Handlers validate input with `stagemap_core` before any transaction
//! opens, call repositories for the writes, and convert absent rows into
//! `NotFoundError` responses.

pub mod element_group;
pub mod element_type;
pub mod presentation;
pub mod scene;
pub mod scene_element;
pub mod slot_pool;
pub mod transition_step;
pub mod viewer;
