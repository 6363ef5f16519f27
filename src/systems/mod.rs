//! ECS systems.
//!
//! - [`controlchanged`] – turns bool control assignments into observer events

pub mod controlchanged;
