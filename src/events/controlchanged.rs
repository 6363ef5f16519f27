//! Change notifications for [`BoolControl`](crate::components::boolcontrol::BoolControl).
//!
//! Two ways to hear about assignments:
//!
//! - [`BoolAssigned`] is pushed through every channel returned by
//!   [`BoolControl::subscribe`](crate::components::boolcontrol::BoolControl::subscribe),
//!   once per assignment, synchronously, after the value is stored.
//! - [`BoolControlChangedEvent`] is triggered by the
//!   [`emit_bool_control_changes`](crate::systems::controlchanged::emit_bool_control_changes)
//!   system at most once per frame for each entity whose control was assigned.
//!
//! Neither carries the key that changed.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

/// Sent to subscribers whenever a vote is assigned, even to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolAssigned;

/// Triggered when the `BoolControl` on `entity` was assigned since the last
/// frame.
#[derive(Event, Debug, Clone, Copy)]
pub struct BoolControlChangedEvent {
    pub entity: Entity,
    /// Aggregate value after the assignments.
    pub value: bool,
}

/// Observer that logs every [`BoolControlChangedEvent`].
pub fn log_bool_control_changed(trigger: On<BoolControlChangedEvent>) {
    let event = trigger.event();
    debug!(
        "BoolControl on {:?} changed, aggregate is now {}",
        event.entity, event.value
    );
}
