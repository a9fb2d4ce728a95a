//! ChainStore: slot array plus singly-linked collision chains.
//!
//! Entries live in a generational arena; a slot stores the arena key of its
//! chain head and every entry stores the key of its successor. Moving an
//! entry between chains is a relink, so rehashing never reallocates entries.

use crate::codec::slot_of;
use core::iter::FusedIterator;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Codec hash of `key`, computed once on insertion.
    pub(crate) hash: u32,
    next: Option<DefaultKey>,
}

pub(crate) struct ChainStore<K, V> {
    heads: Vec<Option<DefaultKey>>,
    entries: SlotMap<DefaultKey, Entry<K, V>>,
}

impl<K, V> ChainStore<K, V> {
    pub(crate) fn with_slots(n: usize) -> Self {
        Self {
            heads: vec![None; n],
            entries: SlotMap::with_key(),
        }
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.heads.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries of slot `i`, head first.
    pub(crate) fn chain(&self, i: usize) -> Chain<'_, K, V> {
        Chain {
            entries: &self.entries,
            cursor: self.heads[i],
        }
    }

    /// Prepend a new entry to the chain of slot `i`.
    pub(crate) fn insert_at(&mut self, i: usize, hash: u32, key: K, value: V) -> DefaultKey {
        let next = self.heads[i];
        let id = self.entries.insert(Entry {
            key,
            value,
            hash,
            next,
        });
        self.heads[i] = Some(id);
        id
    }

    /// Move every entry into a fresh array of `new_size` slots.
    ///
    /// Chains are consumed in slot order and each entry is prepended to its
    /// new chain, so entries sharing a new slot come out in reverse visit
    /// order.
    pub(crate) fn rehash_into(&mut self, new_size: usize) {
        debug_assert!(new_size > 0);
        let old = core::mem::replace(&mut self.heads, vec![None; new_size]);
        for head in old {
            let mut cur = head;
            while let Some(id) = cur {
                let e = &mut self.entries[id];
                cur = e.next;
                let i = slot_of(e.hash, new_size);
                e.next = self.heads[i];
                self.heads[i] = Some(id);
            }
        }
    }

    /// Drop every entry; the slot count is unchanged.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.heads.iter_mut().for_each(|h| *h = None);
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            store: self,
            slot: 0,
            cursor: None,
            remaining: self.entries.len(),
        }
    }
}

impl<K: Eq, V> ChainStore<K, V> {
    fn find_id(&self, hash: u32, key: &K) -> Option<DefaultKey> {
        if self.heads.is_empty() {
            return None;
        }
        self.chain(slot_of(hash, self.heads.len()))
            .find(|(_, e)| e.hash == hash && e.key == *key)
            .map(|(id, _)| id)
    }

    pub(crate) fn find(&self, hash: u32, key: &K) -> Option<&Entry<K, V>> {
        let id = self.find_id(hash, key)?;
        self.entries.get(id)
    }

    pub(crate) fn find_mut(&mut self, hash: u32, key: &K) -> Option<&mut Entry<K, V>> {
        let id = self.find_id(hash, key)?;
        self.entries.get_mut(id)
    }

    /// Unlink the entry for `key`, keeping the rest of its chain in order.
    pub(crate) fn remove(&mut self, hash: u32, key: &K) -> Option<(K, V)> {
        if self.heads.is_empty() {
            return None;
        }
        let i = slot_of(hash, self.heads.len());
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.heads[i];
        while let Some(id) = cur {
            let e = &self.entries[id];
            if e.hash == hash && e.key == *key {
                let next = e.next;
                match prev {
                    None => self.heads[i] = next,
                    Some(p) => self.entries[p].next = next,
                }
                let e = self.entries.remove(id)?;
                return Some((e.key, e.value));
            }
            prev = cur;
            cur = e.next;
        }
        None
    }
}

/// Iterator over one slot's chain.
pub(crate) struct Chain<'a, K, V> {
    entries: &'a SlotMap<DefaultKey, Entry<K, V>>,
    cursor: Option<DefaultKey>,
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = (DefaultKey, &'a Entry<K, V>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let e = self.entries.get(id)?;
        self.cursor = e.next;
        Some((id, e))
    }
}

/// Iterator over all entries: slot 0 to slot N-1, each chain head to tail.
pub(crate) struct Iter<'a, K, V> {
    store: &'a ChainStore<K, V>,
    slot: usize,
    cursor: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.cursor {
                let e = &self.store.entries[id];
                self.cursor = e.next;
                self.remaining -= 1;
                return Some(e);
            }
            if self.slot >= self.store.heads.len() {
                return None;
            }
            self.cursor = self.store.heads[self.slot];
            self.slot += 1;
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}
