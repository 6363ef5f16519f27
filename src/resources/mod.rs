//! ECS resources and designer-facing data.
//!
//! Overview
//! - `controlsconfig` – INI-backed defaults for newly created controls
//! - `controltable` – passive key/value records loaded from JSON files
pub mod controlsconfig;
pub mod controltable;
