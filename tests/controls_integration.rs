//! Controls integration tests.
//!
//! Drives the controls through a bevy_ecs `World`: controls as components,
//! entity identities as keys, the change detection system and its observers,
//! and designer tables loaded from disk.
//!
//! ```sh
//! cargo test --test controls_integration
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use std::sync::{Arc, Mutex};

use aberredcontrols::components::boolcontrol::BoolControl;
use aberredcontrols::components::controlkey::{ControlKey, ObjectKey};
use aberredcontrols::components::intcontrol::{IntControl, IntControlMode};
use aberredcontrols::components::prioritycontrol::{PriorityControl, PriorityEntry};
use aberredcontrols::events::controlchanged::{BoolControlChangedEvent, log_bool_control_changed};
use aberredcontrols::resources::controlsconfig::ControlsConfig;
use aberredcontrols::resources::controltable::ControlTable;
use aberredcontrols::systems::controlchanged::emit_bool_control_changes;

fn tick_controls(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(emit_bool_control_changes);
    schedule.run(world);
}

fn record_changes(world: &mut World) -> Arc<Mutex<Vec<(Entity, bool)>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    world.add_observer(move |trigger: On<BoolControlChangedEvent>| {
        let event = trigger.event();
        seen_clone.lock().unwrap().push((event.entity, event.value));
    });
    world.flush();
    seen
}

// =============================================================================
// Change detection system
// =============================================================================

#[test]
fn untouched_controls_emit_nothing() {
    let mut world = World::new();
    let seen = record_changes(&mut world);
    world.spawn(BoolControl::from(false));

    tick_controls(&mut world);

    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn assignments_collapse_into_one_event_per_tick() {
    let mut world = World::new();
    let seen = record_changes(&mut world);
    let entity = world.spawn(BoolControl::new(false)).id();

    {
        let mut control = world.get_mut::<BoolControl>(entity).unwrap();
        control.set("a", true);
        control.set("b", false);
        control.set("a", true);
    }
    tick_controls(&mut world);

    assert_eq!(seen.lock().unwrap().as_slice(), &[(entity, true)]);
    assert!(!world.get::<BoolControl>(entity).unwrap().is_dirty());

    // Flag was cleared, so the next tick is quiet.
    tick_controls(&mut world);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn only_assigned_entities_emit() {
    let mut world = World::new();
    let seen = record_changes(&mut world);
    let quiet = world.spawn(BoolControl::new(true)).id();
    let loud = world.spawn(BoolControl::new(true)).id();

    world
        .get_mut::<BoolControl>(loud)
        .unwrap()
        .set(quiet, false);
    tick_controls(&mut world);

    assert_eq!(seen.lock().unwrap().as_slice(), &[(loud, false)]);
}

#[test]
fn default_logging_observer_accepts_events() {
    let mut world = World::new();
    world.add_observer(log_bool_control_changed);
    world.flush();
    let seen = record_changes(&mut world);
    let entity = world.spawn(BoolControl::new(false)).id();
    world.get_mut::<BoolControl>(entity).unwrap().set(1, true);

    tick_controls(&mut world);

    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn subscribers_hear_every_assignment_inside_a_system() {
    let mut world = World::new();
    let entity = world.spawn(BoolControl::new(false)).id();
    let rx = world.get_mut::<BoolControl>(entity).unwrap().subscribe();

    fn vote_twice(mut query: Query<(Entity, &mut BoolControl)>) {
        for (entity, mut control) in query.iter_mut() {
            control.set(entity, true);
            control.set(entity, true);
        }
    }
    let mut schedule = Schedule::default();
    schedule.add_systems(vote_twice);
    schedule.run(&mut world);

    assert_eq!(rx.try_iter().count(), 2);
    assert!(world.get::<BoolControl>(entity).unwrap().get(entity));
}

// =============================================================================
// Entities as keys
// =============================================================================

#[test]
fn despawned_voter_still_counts_until_removed() {
    let mut world = World::new();
    let voter = world.spawn_empty().id();
    let mut control = BoolControl::new(false);
    control.set(voter, true);

    world.despawn(voter);
    assert!(control.to_bool());

    control.remove(voter);
    assert!(!control.to_bool());
}

#[test]
fn camera_target_follows_highest_priority_entity() {
    let mut world = World::new();
    let player = world.spawn_empty().id();
    let boss = world.spawn_empty().id();

    let mut target = PriorityControl::<Option<Entity>>::new(false);
    target.set(player, (true, 10, Some(player)));
    assert_eq!(target.aggregate(), (true, Some(player)));

    target.set("cutscene", (true, 50, Some(boss)));
    assert_eq!(target.aggregate(), (true, Some(boss)));

    target.set("cutscene", (false, 50, Some(boss)));
    assert_eq!(target.aggregate(), (true, Some(player)));

    target.remove(player);
    assert_eq!(target.aggregate(), (false, None));
}

#[test]
fn controls_live_side_by_side_on_one_entity() {
    let mut world = World::new();
    let entity = world
        .spawn((
            BoolControl::from(true),
            IntControl::new(IntControlMode::Minimum),
            PriorityControl::<String>::from(false),
        ))
        .id();

    let mut entity_mut = world.entity_mut(entity);
    entity_mut.get_mut::<IntControl>().unwrap().set("speed_cap", 4);
    entity_mut.get_mut::<IntControl>().unwrap().set("slow_zone", 2);
    entity_mut
        .get_mut::<PriorityControl<String>>()
        .unwrap()
        .set(ObjectKey::new(1), (true, 1, "walk".to_string()));

    let entity_ref = world.entity(entity);
    assert!(entity_ref.get::<BoolControl>().unwrap().to_bool());
    assert_eq!(entity_ref.get::<IntControl>().unwrap().to_int(), 2);
    assert_eq!(
        entity_ref.get::<PriorityControl<String>>().unwrap().aggregate(),
        (true, "walk".to_string())
    );
}

// =============================================================================
// Designer data
// =============================================================================

#[test]
fn tables_from_disk_build_controls() {
    let dir = std::env::temp_dir();
    let pid = std::process::id();
    let bools_path = dir.join(format!("aberredcontrols_it_bools_{pid}.json"));
    let prio_path = dir.join(format!("aberredcontrols_it_prio_{pid}.json"));

    std::fs::write(
        &bools_path,
        r#"{ "data": [
            { "id": { "Id": 0 }, "value": true },
            { "id": { "Name": "pause_menu" }, "value": false }
        ] }"#,
    )
    .unwrap();
    std::fs::write(
        &prio_path,
        r#"{ "data": [
            { "id": { "Name": "idle" }, "value": { "active": true, "priority": 1, "payload": "idle" } },
            { "id": { "Id": 7 }, "value": { "active": true, "priority": 1, "payload": "seven" } },
            { "id": { "Object": 3 }, "value": { "active": false, "priority": 99, "payload": "off" } }
        ] }"#,
    )
    .unwrap();

    let bools = ControlTable::<ControlKey, bool>::load_from_file(&bools_path);
    let prios = ControlTable::<ControlKey, PriorityEntry<String>>::load_from_file(&prio_path);
    let _ = std::fs::remove_file(&bools_path);
    let _ = std::fs::remove_file(&prio_path);

    let can_move = BoolControl::from_table(true, &bools.unwrap());
    assert!(!can_move.to_bool());

    let anim = PriorityControl::from_table(false, &prios.unwrap());
    // Tie at priority 1: the numeric id sorts first.
    assert_eq!(anim.aggregate(), (true, "seven".to_string()));
}

#[test]
fn config_defaults_shape_new_controls() {
    let mut world = World::new();
    let mut config = ControlsConfig::new();
    config.bool_avoid_true = true;
    config.bool_root = true;
    world.insert_resource(config);

    let control = world.resource::<ControlsConfig>().bool_control();
    let entity = world.spawn(control).id();

    let control = world.get::<BoolControl>(entity).unwrap();
    assert!(control.avoid_true());
    assert!(control.get(0));
    assert!(control.to_bool());
}
