//! Priority-based payload selection.
//!
//! A [`PriorityControl<T>`] holds `(active, priority, payload)` entries from
//! any number of keys and resolves to the payload of the highest-priority
//! active entry. "Active" means the entry's flag differs from the control's
//! polarity `avoid_true`; entries equal to the polarity never win.
//!
//! # Example
//!
//! ```ignore
//! let mut camera_target = PriorityControl::<Option<Entity>>::new(false);
//! camera_target.set(player, (true, 10, Some(player)));
//! camera_target.set("cutscene", (true, 50, Some(boss)));
//! let (active, target) = camera_target.aggregate();
//! // active == true, target == Some(boss)
//! ```
//!
//! # Ties
//!
//! When two qualifying entries share the highest priority, the one with the
//! smaller [`ControlKey`] wins (`Id < Name < Entity < Object`, then by the
//! inner key). The result never depends on hash iteration order.
//!
//! Always check the returned flag before trusting the payload: when nothing
//! qualifies the payload is `T::default()`.

use crate::components::controlkey::ControlKey;
use crate::resources::controltable::{ControlTable, entries};
use bevy_ecs::prelude::Component;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One voter's entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriorityEntry<T> {
    pub active: bool,
    pub priority: i32,
    pub payload: T,
}

impl<T> PriorityEntry<T> {
    pub fn new(active: bool, priority: i32, payload: T) -> Self {
        Self {
            active,
            priority,
            payload,
        }
    }
}

impl<T> From<(bool, i32, T)> for PriorityEntry<T> {
    fn from((active, priority, payload): (bool, i32, T)) -> Self {
        Self::new(active, priority, payload)
    }
}

/// Selects the payload of the highest-priority active entry.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct PriorityControl<T>
where
    T: Send + Sync + 'static,
{
    avoid_true: bool,
    #[serde(with = "entries")]
    entries: FxHashMap<ControlKey, PriorityEntry<T>>,
}

impl<T> Default for PriorityControl<T>
where
    T: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(false)
    }
}

impl<T> PriorityControl<T>
where
    T: Send + Sync + 'static,
{
    /// Empty control with the given polarity.
    pub fn new(avoid_true: bool) -> Self {
        Self {
            avoid_true,
            entries: FxHashMap::default(),
        }
    }

    pub fn avoid_true(&self) -> bool {
        self.avoid_true
    }

    /// Records or overwrites the entry for `key`.
    pub fn set(&mut self, key: impl Into<ControlKey>, entry: impl Into<PriorityEntry<T>>) {
        self.entries.insert(key.into(), entry.into());
    }

    /// The stored entry, if any.
    pub fn get_ref(&self, key: impl Into<ControlKey>) -> Option<&PriorityEntry<T>> {
        self.entries.get(&key.into())
    }

    pub fn remove(&mut self, key: impl Into<ControlKey>) -> Option<PriorityEntry<T>> {
        self.entries.remove(&key.into())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ControlKey, &PriorityEntry<T>)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// The winning key and entry, `None` when no entry qualifies.
    ///
    /// An entry qualifies when `active != avoid_true` and its priority is
    /// above `i32::MIN`.
    pub fn winner(&self) -> Option<(&ControlKey, &PriorityEntry<T>)> {
        let mut best: Option<(&ControlKey, &PriorityEntry<T>)> = None;
        for (key, entry) in &self.entries {
            if entry.active == self.avoid_true || entry.priority == i32::MIN {
                continue;
            }
            let replace = match best {
                None => true,
                Some((best_key, best_entry)) => {
                    entry.priority > best_entry.priority
                        || (entry.priority == best_entry.priority && key < best_key)
                }
            };
            if replace {
                best = Some((key, entry));
            }
        }
        best
    }
}

impl<T> PriorityControl<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    /// Builds a control from designer records. Later records win.
    pub fn from_table(avoid_true: bool, table: &ControlTable<ControlKey, PriorityEntry<T>>) -> Self {
        let mut control = Self::new(avoid_true);
        control.apply_table(table);
        control
    }

    /// Loads designer records on top of the existing entries.
    pub fn apply_table(&mut self, table: &ControlTable<ControlKey, PriorityEntry<T>>) {
        for datum in table.iter() {
            self.entries.insert(datum.id.clone(), datum.value.clone());
        }
    }

    /// The stored entry, or `(avoid_true, i32::MIN, T::default())`.
    pub fn get(&self, key: impl Into<ControlKey>) -> PriorityEntry<T> {
        match self.entries.get(&key.into()) {
            Some(entry) => entry.clone(),
            None => PriorityEntry::new(self.avoid_true, i32::MIN, T::default()),
        }
    }

    /// `(!avoid_true, payload)` of the winning entry, or
    /// `(avoid_true, T::default())` when nothing qualifies.
    pub fn aggregate(&self) -> (bool, T) {
        match self.winner() {
            Some((_, entry)) => (!self.avoid_true, entry.payload.clone()),
            None => (self.avoid_true, T::default()),
        }
    }
}

impl<T> From<bool> for PriorityControl<T>
where
    T: Send + Sync + 'static,
{
    fn from(avoid_true: bool) -> Self {
        Self::new(avoid_true)
    }
}
