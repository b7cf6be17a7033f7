//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Nullable columns that a patch may explicitly clear use
//! `Option<Option<T>>` with the [`double_option`] deserializer: the outer
//! `Option` is whether the field appeared in the body, the inner whether
//! it carried a value or `null`.

pub mod element_group;
pub mod element_type;
pub mod presentation;
pub mod scene;
pub mod scene_element;
pub mod transition_step;
pub mod viewer;

/// Deserialize a field so that "absent" and "explicitly null" stay
/// distinguishable. Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}
