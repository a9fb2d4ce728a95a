//! Builders: buffer entries, then materialize a table sized to fit them.
//!
//! `build` replays the buffer through the ordinary `set`/`add` path, so
//! duplicates collapse exactly as they would with one call per item.

use crate::config::MapConfig;
use crate::error::Result;
use crate::map::Map;
use crate::set::Set;
use serde::Serialize;

/// Buffered `(key, value)` pairs for a [`Map`].
///
/// ```
/// use chain_hashmap::MapBuilder;
///
/// let m = MapBuilder::from_iter([("c", 1), ("a", 2), ("c", 3)]).build(0.75)?;
/// assert_eq!(m.len(), 2);
/// assert_eq!(m.get(&"c")?, Some(&3));
/// # Ok::<(), chain_hashmap::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct MapBuilder<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> MapBuilder<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, key: K, value: V) -> &mut Self {
        self.entries.push((key, value));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> MapBuilder<K, V>
where
    K: Eq + Serialize,
{
    /// A map with one slot per buffered entry, filled in buffer order.
    pub fn build(self, threshold: f32) -> Result<Map<K, V>> {
        let mut m = Map::with_config(MapConfig::new(self.entries.len(), threshold));
        for (k, v) in self.entries {
            m.set(k, v)?;
        }
        Ok(m)
    }
}

impl<K, V> Default for MapBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for MapBuilder<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter)
    }
}

impl<K, V> FromIterator<(K, V)> for MapBuilder<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Buffered values for a [`Set`].
#[derive(Clone, Debug)]
pub struct SetBuilder<T> {
    values: Vec<T>,
}

impl<T> SetBuilder<T> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn add(&mut self, value: T) -> &mut Self {
        self.values.push(value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T> SetBuilder<T>
where
    T: Eq + Serialize,
{
    /// A set with one slot per buffered value, filled in buffer order.
    pub fn build(self, threshold: f32) -> Result<Set<T>> {
        let mut s = Set::with_config(MapConfig::new(self.values.len(), threshold));
        s.add_all(self.values)?;
        Ok(s)
    }
}

impl<T> Default for SetBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for SetBuilder<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.values.extend(iter)
    }
}

impl<T> FromIterator<T> for SetBuilder<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
