//! Set: unordered set on top of `Map<T, ()>`.
//!
//! Membership, growth and iteration order are exactly those of the inner
//! map. Set algebra walks one operand and probes the other with the hashes
//! cached in its entries, so none of it can fail on encoding.

use crate::codec::{JsonCodec, KeyCodec};
use crate::config::{MapConfig, DEFAULT_THRESHOLD};
use crate::error::Result;
use crate::map::{self, Map};
use core::fmt;
use core::iter::FusedIterator;
use serde::Serialize;

/// An unordered set of unique values.
///
/// ```
/// use chain_hashmap::Set;
///
/// let mut a = Set::new(2, 1.0);
/// a.add_all([1, 2, 3])?;
/// let mut b = Set::new(2, 1.0);
/// b.add_all([3, 4, 5])?;
///
/// let both = a.intersection(&b);
/// assert_eq!(both.len(), 1);
/// assert!(both.contains(&3)?);
/// # Ok::<(), chain_hashmap::Error>(())
/// ```
pub struct Set<T, C = JsonCodec> {
    map: Map<T, (), C>,
}

impl<T> Set<T>
where
    T: Eq + Serialize,
{
    /// # Panics
    ///
    /// Panics if `threshold` is not positive and finite.
    pub fn new(initial_size: usize, threshold: f32) -> Self {
        Self::with_config(MapConfig::new(initial_size, threshold))
    }
}

impl<T> Default for Set<T>
where
    T: Eq + Serialize,
{
    fn default() -> Self {
        Self::with_config(MapConfig::default())
    }
}

impl<T, C> Set<T, C> {
    pub fn with_config(config: MapConfig) -> Self {
        Self {
            map: Map::with_config(config),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of slots in the underlying table.
    pub fn size(&self) -> usize {
        self.map.size()
    }

    pub fn threshold(&self) -> f32 {
        self.map.threshold()
    }

    pub fn load_factor(&self) -> f32 {
        self.map.load_factor()
    }

    pub fn clear(&mut self) {
        self.map.clear()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.map.keys(),
        }
    }

    /// Returns true as soon as one element satisfies `f`.
    pub fn any<F>(&self, f: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().any(f)
    }

    /// Returns false as soon as one element fails `f`.
    pub fn all<F>(&self, f: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().all(f)
    }

    /// Elements in iteration order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T, C> Set<T, C>
where
    T: Eq,
{
    fn add_hashed(&mut self, hash: u32, value: T) -> bool {
        self.map.insert_hashed(hash, value, ()).is_none()
    }

    fn contains_hashed(&self, hash: u32, value: &T) -> bool {
        self.map.find_hashed(hash, value).is_some()
    }

    /// Fresh table with the same slot count and threshold holding the same
    /// elements.
    pub fn copy(&self) -> Self
    where
        T: Clone,
    {
        let mut out = Self::with_config(MapConfig::new(self.size(), self.threshold()));
        for e in self.map.entries() {
            out.add_hashed(e.hash, e.key.clone());
        }
        out
    }

    /// Elements in `self` or `other`; sized and configured like `self`.
    pub fn union(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        let mut out = self.copy();
        for e in other.map.entries() {
            out.add_hashed(e.hash, e.key.clone());
        }
        out
    }

    /// Elements in both sets. Walks `self` and probes `other`.
    pub fn intersection(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        self.filtered(|hash, value| other.contains_hashed(hash, value))
    }

    /// Elements of `self` that are not in `other`.
    pub fn difference(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        self.filtered(|hash, value| !other.contains_hashed(hash, value))
    }

    fn filtered<F>(&self, mut keep: F) -> Self
    where
        T: Clone,
        F: FnMut(u32, &T) -> bool,
    {
        let mut out = Self::with_config(MapConfig::new(self.size(), DEFAULT_THRESHOLD));
        for e in self.map.entries() {
            if keep(e.hash, &e.key) {
                out.add_hashed(e.hash, e.key.clone());
            }
        }
        out
    }

    pub fn equal(&self, other: &Self) -> bool {
        self.map.equal(&other.map)
    }

    /// True if every element of `self` is in `other`.
    pub fn subset(&self, other: &Self) -> bool {
        self.len() <= other.len()
            && self
                .map
                .entries()
                .all(|e| other.contains_hashed(e.hash, &e.key))
    }
}

impl<T, C> Set<T, C>
where
    T: Eq + Serialize,
    C: KeyCodec,
{
    /// Returns true if the value was not already present.
    pub fn add(&mut self, value: T) -> Result<bool> {
        Ok(self.map.set(value, ())?.is_none())
    }

    /// Add every value in order, stopping at the first unsupported one.
    pub fn add_all<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        for v in values {
            self.add(v)?;
        }
        Ok(())
    }

    /// Returns true if the value was present.
    pub fn remove(&mut self, value: &T) -> Result<bool> {
        Ok(self.map.delete(value)?.is_some())
    }

    pub fn contains(&self, value: &T) -> Result<bool> {
        self.map.contains_key(value)
    }
}

impl<T, C> Clone for Set<T, C>
where
    T: Eq + Clone,
{
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T, C> PartialEq for Set<T, C>
where
    T: Eq,
{
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T: Eq, C> Eq for Set<T, C> {}

impl<T, C> fmt::Display for Set<T, C>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str("}")
    }
}

impl<T, C> fmt::Debug for Set<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, C> IntoIterator for &'a Set<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [`Set`].
pub struct Iter<'a, T> {
    inner: map::Keys<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}
