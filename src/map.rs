//! Map: separate-chaining hash map with prime-sized, one-shot growth.
//!
//! Keys are hashed through a [`KeyCodec`] (JSON + FNV-1a by default) and
//! compared with `Eq`. Each entry caches its hash, so growth and set algebra
//! never call back into the codec.

use crate::chain_store::{self, ChainStore};
use crate::codec::{slot_of, JsonCodec, KeyCodec};
use crate::config::MapConfig;
use crate::error::Result;
use crate::prime::next_prime;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use serde::Serialize;
use tracing::{debug, trace};

/// A hash map resolving collisions by separate chaining.
///
/// The table starts with the configured number of slots (possibly zero) and
/// grows to `next_prime(2 * size)` whenever an insertion of a new key brings
/// the load factor to the threshold. It never shrinks.
///
/// ```
/// use chain_hashmap::Map;
///
/// let mut m = Map::new(2, 1.0);
/// m.set(1, "one")?;
/// m.set(2, "two")?;
/// assert_eq!(m.get(&1)?, Some(&"one"));
/// assert_eq!(m.delete(&2)?, Some("two"));
/// assert_eq!(m.len(), 1);
/// # Ok::<(), chain_hashmap::Error>(())
/// ```
pub struct Map<K, V, C = JsonCodec> {
    store: ChainStore<K, V>,
    threshold: f32,
    _codec: PhantomData<fn() -> C>,
}

impl<K, V> Map<K, V>
where
    K: Eq + Serialize,
{
    /// # Panics
    ///
    /// Panics if `threshold` is not positive and finite.
    pub fn new(initial_size: usize, threshold: f32) -> Self {
        Self::with_config(MapConfig::new(initial_size, threshold))
    }
}

impl<K, V> Default for Map<K, V>
where
    K: Eq + Serialize,
{
    fn default() -> Self {
        Self::with_config(MapConfig::default())
    }
}

impl<K, V, C> Map<K, V, C> {
    /// # Panics
    ///
    /// Panics if the configured threshold is not positive and finite.
    pub fn with_config(config: MapConfig) -> Self {
        config.validate();
        Self {
            store: ChainStore::with_slots(config.initial_size),
            threshold: config.threshold,
            _codec: PhantomData,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots.
    pub fn size(&self) -> usize {
        self.store.slot_count()
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// `len / size`, or zero for a table without slots.
    pub fn load_factor(&self) -> f32 {
        match self.size() {
            0 => 0.0,
            n => self.len() as f32 / n as f32,
        }
    }

    /// Grow to `next_prime(2 * size)` slots and relink every entry.
    pub fn resize(&mut self) {
        let old = self.size();
        let new = next_prime(old * 2);
        assert!(new > old, "resize must grow the table ({} -> {})", old, new);
        self.store.rehash_into(new);
        debug!(old_size = old, new_size = new, len = self.len(), "resized table");
    }

    /// Remove every entry, keeping the current number of slots.
    pub fn clear(&mut self) {
        trace!(size = self.size(), len = self.len(), "clearing table");
        self.store.clear();
    }

    /// Entries in slot order; within a slot, most recently inserted first.
    /// The order changes whenever the table is resized.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.store.iter(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub(crate) fn entries(&self) -> chain_store::Iter<'_, K, V> {
        self.store.iter()
    }
}

impl<K, V, C> Map<K, V, C>
where
    K: Eq,
{
    pub(crate) fn find_hashed(&self, hash: u32, key: &K) -> Option<&V> {
        self.store.find(hash, key).map(|e| &e.value)
    }

    /// Insert with an already computed hash; returns the replaced value.
    pub(crate) fn insert_hashed(&mut self, hash: u32, key: K, value: V) -> Option<V> {
        if self.size() == 0 {
            self.resize();
        }
        if let Some(e) = self.store.find_mut(hash, &key) {
            return Some(core::mem::replace(&mut e.value, value));
        }
        let i = slot_of(hash, self.size());
        self.store.insert_at(i, hash, key, value);
        // One resize at most, even if it is not enough to get back under.
        if self.load_factor() >= self.threshold {
            self.resize();
        }
        None
    }

    /// Same length and every `(key, value)` of `self` found in `other`.
    pub fn equal(&self, other: &Self) -> bool
    where
        V: PartialEq,
    {
        self.len() == other.len()
            && self
                .entries()
                .all(|e| other.find_hashed(e.hash, &e.key) == Some(&e.value))
    }
}

impl<K, V, C> Map<K, V, C>
where
    K: Eq + Serialize,
    C: KeyCodec,
{
    /// Slot that `key` maps to, or `None` while the table has no slots.
    pub fn index(&self, key: &K) -> Result<Option<usize>> {
        let hash = C::hash(key)?;
        Ok(match self.size() {
            0 => None,
            n => Some(slot_of(hash, n)),
        })
    }

    pub fn get(&self, key: &K) -> Result<Option<&V>> {
        let hash = C::hash(key)?;
        Ok(self.find_hashed(hash, key))
    }

    pub fn get_mut(&mut self, key: &K) -> Result<Option<&mut V>> {
        let hash = C::hash(key)?;
        Ok(self.store.find_mut(hash, key).map(|e| &mut e.value))
    }

    pub fn contains_key(&self, key: &K) -> Result<bool> {
        self.get(key).map(|v| v.is_some())
    }

    /// Insert or overwrite. Returns the previous value for an existing key;
    /// the existing entry keeps its place in its chain.
    pub fn set(&mut self, key: K, value: V) -> Result<Option<V>> {
        let hash = C::hash(&key)?;
        Ok(self.insert_hashed(hash, key, value))
    }

    /// Remove `key`, returning its value. Absent keys are a no-op.
    pub fn delete(&mut self, key: &K) -> Result<Option<V>> {
        let hash = C::hash(key)?;
        Ok(self.store.remove(hash, key).map(|(_, v)| v))
    }
}

impl<K, V, C> PartialEq for Map<K, V, C>
where
    K: Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<K, V, C> Eq for Map<K, V, C>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V, C> fmt::Display for Map<K, V, C>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        f.write_str("}")
    }
}

impl<K, V, C> fmt::Debug for Map<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a Map<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(&K, &V)` pairs of a [`Map`].
pub struct Iter<'a, K, V> {
    inner: chain_store::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.key, &e.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over the keys of a [`Map`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over the values of a [`Map`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}
