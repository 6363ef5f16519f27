//! Aberred Controls library.
//!
//! Lookup-table "controls" that let many independent voters decide a single
//! boolean, integer or prioritized payload, plus the ECS components, events,
//! resources and systems that wire them into a bevy_ecs world.

pub mod components;
pub mod events;
pub mod resources;
pub mod systems;
