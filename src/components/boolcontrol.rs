//! Boolean vote aggregation.
//!
//! A [`BoolControl`] lets many independent callers vote on a single boolean.
//! The control has a fixed polarity, `avoid_true`, which is the answer when
//! nobody objects. A single vote that differs from the polarity flips the
//! aggregate:
//!
//! - `avoid_true == false`: the result is `true` if any vote is `true`
//! - `avoid_true == true`: the result is `false` if any vote is `false`
//!
//! # Example
//!
//! ```ignore
//! // Player can move unless something says otherwise.
//! let mut can_move = BoolControl::from(true);
//! can_move.set("pause_menu", false);
//! assert!(!can_move.to_bool());
//! can_move.set("pause_menu", true);
//! assert!(can_move.to_bool());
//! ```
//!
//! # Related
//!
//! - [`crate::events::controlchanged`] – change notifications
//! - [`crate::systems::controlchanged::emit_bool_control_changes`] – ECS bridge

use crate::components::controlkey::ControlKey;
use crate::events::controlchanged::BoolAssigned;
use crate::resources::controltable::{ControlTable, entries};
use bevy_ecs::prelude::Component;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::trace;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Aggregates boolean votes from any number of keys into one boolean.
#[derive(Component, Debug, Default, Serialize, Deserialize)]
pub struct BoolControl {
    avoid_true: bool,
    #[serde(with = "entries")]
    votes: FxHashMap<ControlKey, bool>,
    /// Set by every assignment, cleared by [`BoolControl::take_dirty`].
    #[serde(skip)]
    dirty: bool,
    #[serde(skip)]
    subscribers: SmallVec<[Sender<BoolAssigned>; 2]>,
}

impl BoolControl {
    /// Empty control with the given polarity.
    pub fn new(avoid_true: bool) -> Self {
        Self {
            avoid_true,
            ..Default::default()
        }
    }

    /// Control whose polarity is `root` and whose root vote (`Id(0)`) is
    /// `root` as well.
    pub fn with_root(root: bool) -> Self {
        let mut control = Self::new(root);
        control.votes.insert(ControlKey::Id(0), root);
        control
    }

    /// Builds a control from designer records. Later records win.
    pub fn from_table(avoid_true: bool, table: &ControlTable<ControlKey, bool>) -> Self {
        let mut control = Self::new(avoid_true);
        control.apply_table(table);
        control
    }

    /// Loads designer records on top of the existing votes.
    ///
    /// This is a bulk load, not an assignment: subscribers are not notified
    /// and the dirty flag is left alone.
    pub fn apply_table(&mut self, table: &ControlTable<ControlKey, bool>) {
        for datum in table.iter() {
            self.votes.insert(datum.id.clone(), datum.value);
        }
    }

    pub fn avoid_true(&self) -> bool {
        self.avoid_true
    }

    /// Records a vote and notifies subscribers.
    pub fn set(&mut self, key: impl Into<ControlKey>, value: bool) {
        self.votes.insert(key.into(), value);
        self.notify();
    }

    /// The vote stored under `key`, or the polarity when unset.
    pub fn get(&self, key: impl Into<ControlKey>) -> bool {
        self.votes
            .get(&key.into())
            .copied()
            .unwrap_or(self.avoid_true)
    }

    /// Withdraws a vote. Subscribers are notified only if a vote existed.
    pub fn remove(&mut self, key: impl Into<ControlKey>) -> Option<bool> {
        let removed = self.votes.remove(&key.into());
        if removed.is_some() {
            self.notify();
        }
        removed
    }

    /// Withdraws every vote, including the root vote.
    pub fn clear(&mut self) {
        if !self.votes.is_empty() {
            self.votes.clear();
            self.notify();
        }
    }

    /// The aggregate: `!avoid_true` if any vote differs from the polarity,
    /// otherwise `avoid_true`.
    pub fn aggregate(&self) -> bool {
        if self.votes.values().any(|&vote| vote != self.avoid_true) {
            !self.avoid_true
        } else {
            self.avoid_true
        }
    }

    /// Alias of [`BoolControl::aggregate`].
    pub fn to_bool(&self) -> bool {
        self.aggregate()
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Votes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ControlKey, bool)> {
        let mut votes: Vec<_> = self.votes.iter().map(|(k, v)| (k, *v)).collect();
        votes.sort_by(|a, b| a.0.cmp(b.0));
        votes.into_iter()
    }

    /// Returns a channel receiving one [`BoolAssigned`] per assignment.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<BoolAssigned> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether any assignment happened since the last [`BoolControl::take_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns and clears the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Multi-line listing of the polarity, aggregate and every vote.
    pub fn describe(&self) -> String {
        let mut s = format!(
            "[BoolControl -> Avoid {}]: {} => Contents follow. \n",
            self.avoid_true,
            self.aggregate()
        );
        for (key, value) in self.iter() {
            s.push_str(&format!("{}> {}\n", key, value));
        }
        s
    }

    fn notify(&mut self) {
        self.dirty = true;
        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(BoolAssigned).is_ok());
        if self.subscribers.len() != before {
            trace!(
                "BoolControl dropped {} disconnected subscribers",
                before - self.subscribers.len()
            );
        }
    }
}

/// Clones the votes only. The copy starts with no subscribers and a clear
/// dirty flag, so assigning on it never reaches the original's listeners.
impl Clone for BoolControl {
    fn clone(&self) -> Self {
        Self {
            avoid_true: self.avoid_true,
            votes: self.votes.clone(),
            dirty: false,
            subscribers: SmallVec::new(),
        }
    }
}

impl From<bool> for BoolControl {
    fn from(root: bool) -> Self {
        Self::with_root(root)
    }
}

impl fmt::Display for BoolControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoolControl -> {}", self.aggregate())
    }
}
