//! Event types and observers.
//!
//! - [`controlchanged`] – notifications emitted when a bool control is assigned

pub mod controlchanged;
