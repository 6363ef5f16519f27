//! Bool control change detection system.
//!
//! Bridges the dirty flag kept by every
//! [`BoolControl`](crate::components::boolcontrol::BoolControl) into the ECS
//! observer world: once per frame, each control that was assigned since the
//! previous run triggers a single
//! [`BoolControlChangedEvent`](crate::events::controlchanged::BoolControlChangedEvent).
//!
//! # Related
//!
//! - [`crate::events::controlchanged::log_bool_control_changed`] – default observer

use crate::components::boolcontrol::BoolControl;
use crate::events::controlchanged::BoolControlChangedEvent;
use bevy_ecs::prelude::*;

/// Triggers [`BoolControlChangedEvent`] for every assigned [`BoolControl`].
///
/// Multiple assignments within one frame collapse into one event carrying
/// the aggregate after the last assignment. The dirty flag is cleared
/// without touching bevy's own change detection.
pub fn emit_bool_control_changes(
    mut query: Query<(Entity, &mut BoolControl)>,
    mut commands: Commands,
) {
    for (entity, mut control) in query.iter_mut() {
        if !control.is_dirty() {
            continue;
        }
        let control = control.bypass_change_detection();
        control.take_dirty();
        commands.trigger(BoolControlChangedEvent {
            entity,
            value: control.aggregate(),
        });
    }
}
