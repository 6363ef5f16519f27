//! Integer vote aggregation.
//!
//! An [`IntControl`] collects named integer votes and reduces them to the
//! largest or smallest one, depending on its [`IntControlMode`].
//!
//! Reading a name that was never set inserts the identity element of the
//! mode (`i32::MIN` when taking the maximum, `i32::MAX` when taking the
//! minimum) so the new entry can never win the aggregation. Use
//! [`IntControl::peek`] for a lookup without that side effect.

use crate::resources::controltable::ControlTable;
use bevy_ecs::prelude::Component;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Whether the aggregate is the largest or the smallest vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntControlMode {
    Minimum,
    #[default]
    Maximum,
}

impl IntControlMode {
    /// The value that never wins an aggregation in this mode.
    pub fn identity(&self) -> i32 {
        match self {
            IntControlMode::Maximum => i32::MIN,
            IntControlMode::Minimum => i32::MAX,
        }
    }
}

/// Aggregates named integer votes into one extreme value.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntControl {
    mode: IntControlMode,
    votes: FxHashMap<String, i32>,
}

impl IntControl {
    pub fn new(mode: IntControlMode) -> Self {
        Self {
            mode,
            votes: FxHashMap::default(),
        }
    }

    /// Builds a control from designer records. Later records win.
    pub fn from_table(mode: IntControlMode, table: &ControlTable<String, i32>) -> Self {
        let mut control = Self::new(mode);
        control.apply_table(table);
        control
    }

    /// Loads designer records on top of the existing votes.
    pub fn apply_table(&mut self, table: &ControlTable<String, i32>) {
        for datum in table.iter() {
            self.votes.insert(datum.id.clone(), datum.value);
        }
    }

    pub fn mode(&self) -> IntControlMode {
        self.mode
    }

    /// The vote stored under `key`.
    ///
    /// An absent key is inserted with [`IntControlMode::identity`] and that
    /// value is returned.
    pub fn get(&mut self, key: impl Into<String>) -> i32 {
        let identity = self.mode.identity();
        *self.votes.entry(key.into()).or_insert(identity)
    }

    /// The vote stored under `key`, without inserting.
    pub fn peek(&self, key: &str) -> Option<i32> {
        self.votes.get(key).copied()
    }

    pub fn set(&mut self, key: impl Into<String>, value: i32) {
        self.votes.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<i32> {
        self.votes.remove(key)
    }

    pub fn clear(&mut self) {
        self.votes.clear();
    }

    /// The largest or smallest vote.
    ///
    /// With no votes this returns the mode's identity (`i32::MIN` or
    /// `i32::MAX`). Callers that need to tell "no votes" apart should use
    /// [`IntControl::try_aggregate`].
    pub fn aggregate(&self) -> i32 {
        self.try_aggregate().unwrap_or(self.mode.identity())
    }

    /// Alias of [`IntControl::aggregate`].
    pub fn to_int(&self) -> i32 {
        self.aggregate()
    }

    /// The largest or smallest vote, `None` when there are no votes.
    pub fn try_aggregate(&self) -> Option<i32> {
        let values = self.votes.values().copied();
        match self.mode {
            IntControlMode::Maximum => values.max(),
            IntControlMode::Minimum => values.min(),
        }
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Votes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, i32)> {
        let mut votes: Vec<_> = self.votes.iter().map(|(k, v)| (k, *v)).collect();
        votes.sort_by(|a, b| a.0.cmp(b.0));
        votes.into_iter()
    }
}

impl From<IntControlMode> for IntControl {
    fn from(mode: IntControlMode) -> Self {
        Self::new(mode)
    }
}
