//! Designer-facing data records.
//!
//! These types carry no behavior of their own. They exist so level designers
//! can describe control contents in JSON files, and so the controls can write
//! their entries out in a stable, human-editable form.
//!
//! # File Format
//!
//! ```json
//! {
//!   "data": [
//!     { "id": { "Id": 0 }, "value": false },
//!     { "id": { "Name": "pause_menu" }, "value": true }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single key/value record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ControlDatum<K, V> {
    pub id: K,
    pub value: V,
}

impl<K, V> ControlDatum<K, V> {
    pub fn new(id: K, value: V) -> Self {
        Self { id, value }
    }
}

/// RGBA color as written in designer files.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A tile flag name tagged with the color used to paint it in editors.
pub type FlagColor = ControlDatum<String, Color>;

/// Ordered list of records.
///
/// Lookups are linear and return the first matching record; when a table is
/// applied to a control, later records overwrite earlier ones.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ControlTable<K, V> {
    pub data: Vec<ControlDatum<K, V>>,
}

impl<K, V> Default for ControlTable<K, V> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<K, V> ControlTable<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Returns `self` for chaining.
    pub fn with(mut self, id: impl Into<K>, value: V) -> Self {
        self.push(id, value);
        self
    }

    pub fn push(&mut self, id: impl Into<K>, value: V) {
        self.data.push(ControlDatum::new(id.into(), value));
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlDatum<K, V>> {
        self.data.iter()
    }
}

impl<K: PartialEq, V> ControlTable<K, V> {
    /// First record with the given id.
    pub fn get(&self, id: &K) -> Option<&V> {
        self.data.iter().find(|d| &d.id == id).map(|d| &d.value)
    }
}

impl<K, V> ControlTable<K, V>
where
    K: for<'de> Deserialize<'de> + Serialize,
    V: for<'de> Deserialize<'de> + Serialize,
{
    /// Loads a table from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path.as_ref())?;
        let table: ControlTable<K, V> = serde_json::from_str(&file_content)?;
        log::debug!(
            "Loaded {} control records from {:?}",
            table.len(),
            path.as_ref()
        );
        Ok(table)
    }

    /// Writes the table as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}

/// Serde adapter writing a map as a key-sorted list of [`ControlDatum`].
///
/// JSON object keys must be strings, so maps keyed by
/// [`ControlKey`](crate::components::controlkey::ControlKey) go through this
/// instead.
pub(crate) mod entries {
    use super::ControlDatum;
    use rustc_hash::FxHashMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::hash::Hash;

    pub fn serialize<K, V, S>(map: &FxHashMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        K: Serialize + Ord,
        V: Serialize,
        S: Serializer,
    {
        let mut records: Vec<ControlDatum<&K, &V>> = map
            .iter()
            .map(|(id, value)| ControlDatum { id, value })
            .collect();
        records.sort_by(|a, b| a.id.cmp(b.id));
        serializer.collect_seq(records)
    }

    pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<FxHashMap<K, V>, D::Error>
    where
        K: Deserialize<'de> + Eq + Hash,
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let records = Vec::<ControlDatum<K, V>>::deserialize(deserializer)?;
        Ok(records.into_iter().map(|d| (d.id, d.value)).collect())
    }
}
