//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-table writes open
//! one transaction for their full duration and either commit entirely or
//! roll back entirely.

pub mod element_group_repo;
pub mod element_type_repo;
pub mod presentation_repo;
pub mod scene_clone_repo;
pub mod scene_element_repo;
pub mod scene_repo;
pub mod slot_pool_repo;
pub mod transition_step_repo;
pub mod viewer_repo;

pub use element_group_repo::ElementGroupRepo;
pub use element_type_repo::ElementTypeRepo;
pub use presentation_repo::PresentationRepo;
pub use scene_clone_repo::SceneCloneRepo;
pub use scene_element_repo::SceneElementRepo;
pub use scene_repo::SceneRepo;
pub use slot_pool_repo::SlotPoolRepo;
pub use transition_step_repo::TransitionStepRepo;
pub use viewer_repo::ViewerRepo;
