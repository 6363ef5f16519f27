//! ECS components for vote aggregation.
//!
//! Each control can be attached to an entity as a component or owned directly
//! by another component or resource.
//!
//! Submodules overview:
//! - [`boolcontrol`] – many boolean votes reduced to one boolean
//! - [`controlkey`] – the key type shared by all controls
//! - [`intcontrol`] – named integer votes reduced to their maximum or minimum
//! - [`prioritycontrol`] – prioritized payloads reduced to the winning one

pub mod boolcontrol;
pub mod controlkey;
pub mod intcontrol;
pub mod prioritycontrol;
