//! Keys accepted by the control lookup tables.
//!
//! Every control stores its votes in a single map keyed by [`ControlKey`], a
//! tagged union over the four key-spaces a caller can vote from:
//!
//! - [`ControlKey::Id`] – small numeric ids (`0` is the "root" vote)
//! - [`ControlKey::Name`] – text names such as `"pause_menu"`
//! - [`ControlKey::Entity`] – the identity of an ECS entity
//! - [`ControlKey::Object`] – an opaque identity handle for anything else
//!
//! Keys are totally ordered: `Id < Name < Entity < Object`, then by the inner
//! value. [`PriorityControl`](super::prioritycontrol::PriorityControl) uses
//! this order to break priority ties, and designer files list entries in it.

use bevy_ecs::prelude::Entity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque identity handle used as a key.
///
/// The control never dereferences it; two keys are the same voter iff their
/// raw values are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectKey(u64);

impl ObjectKey {
    /// Wrap a raw identity value.
    pub fn new(raw: u64) -> Self {
        ObjectKey(raw)
    }

    /// Identity of a shared allocation.
    ///
    /// Two clones of the same `Arc` produce the same key. The key stays
    /// unique only while the allocation is alive.
    pub fn of<T: ?Sized>(value: &Arc<T>) -> Self {
        ObjectKey(Arc::as_ptr(value) as *const () as usize as u64)
    }

    /// The raw identity value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Which of the four key-spaces a [`ControlKey`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeySpace {
    Id,
    Name,
    Entity,
    Object,
}

/// A voter key. See the [module docs](self) for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ControlKey {
    /// Numeric id.
    Id(i32),
    /// Text name.
    Name(String),
    /// ECS entity identity.
    Entity(Entity),
    /// Opaque object identity.
    Object(ObjectKey),
}

impl ControlKey {
    /// The key-space this key votes from.
    pub fn key_space(&self) -> KeySpace {
        match self {
            ControlKey::Id(_) => KeySpace::Id,
            ControlKey::Name(_) => KeySpace::Name,
            ControlKey::Entity(_) => KeySpace::Entity,
            ControlKey::Object(_) => KeySpace::Object,
        }
    }
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKey::Id(id) => write!(f, "#{}", id),
            ControlKey::Name(name) => f.write_str(name),
            ControlKey::Entity(entity) => write!(f, "entity:{:?}", entity),
            ControlKey::Object(object) => write!(f, "object:{:#x}", object.raw()),
        }
    }
}

impl From<i32> for ControlKey {
    fn from(id: i32) -> Self {
        ControlKey::Id(id)
    }
}

impl From<&str> for ControlKey {
    fn from(name: &str) -> Self {
        ControlKey::Name(name.to_string())
    }
}

impl From<String> for ControlKey {
    fn from(name: String) -> Self {
        ControlKey::Name(name)
    }
}

impl From<Entity> for ControlKey {
    fn from(entity: Entity) -> Self {
        ControlKey::Entity(entity)
    }
}

impl From<ObjectKey> for ControlKey {
    fn from(object: ObjectKey) -> Self {
        ControlKey::Object(object)
    }
}
