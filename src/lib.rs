//! chain-hashmap: a single-threaded, separate-chaining hash map and the
//! unordered set built on it.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a hash table written from scratch whose keys may be arbitrary
//!   structured values, with a small, checkable growth policy.
//! - Layers:
//!   - `codec`: `KeyCodec` turns a key into canonical bytes (`serde_json`
//!     by default) and hashes them with 32-bit FNV-1a.
//!   - `ChainStore<K, V>`: slot array whose slots head singly-linked chains
//!     of entries kept in a generational arena (`slotmap`).
//!   - `Map<K, V, C>`: public map; computes hashes, walks chains, decides
//!     when to grow.
//!   - `Set<T, C>`: `Map<T, ()>` plus set algebra and predicate queries.
//!   - `MapBuilder` / `SetBuilder`: buffer items, then build a table sized
//!     to fit them.
//!
//! Constraints
//! - Single-threaded; no interior mutability. All mutation goes through
//!   `&mut self`, so a live iterator cannot observe a concurrent change.
//! - Keys are `Eq + Serialize`. Keys that compare equal must serialize to
//!   identical bytes (derived impls on structs, tuples, `Vec` and
//!   `BTreeMap` do; `HashMap` does not).
//! - Unique keys: `set` on an existing key overwrites the value in place.
//!
//! Growth policy
//! - Table sizes are primes: a resize moves from `n` to `next_prime(2n)`
//!   slots, starting at 2 for a table created with zero slots.
//! - Growth is checked after a new entry is placed and fires when
//!   `len / size >= threshold`. One insertion triggers at most one resize.
//! - Tables never shrink; `clear` keeps the slot count.
//!
//! Hashing and rehashing invariants
//! - Each entry stores its 32-bit codec hash; the codec runs once per key
//!   on insertion and once per lookup. Rehashing relinks entries using the
//!   stored hash and never reallocates them.
//! - Codecs are types with no state (`KeyCodec` has no `self`), so two
//!   tables of the same codec agree on every hash. Set algebra relies on
//!   this to probe one table with hashes stored in another.
//!
//! Errors
//! - A key the codec cannot encode yields `Error::UnsupportedKey` from
//!   every keyed operation, including lookups and deletes. Absence is
//!   `Ok(None)` / `Ok(false)`, never an error.
//!
//! Iteration order
//! - Slot 0 to slot N-1; within a slot, most recently inserted first.
//!   Resizing changes the order.

mod builder;
mod chain_store;
pub mod codec;
mod config;
mod error;
pub mod map;
mod map_proptest;
pub mod prime;
pub mod set;

// Public surface
pub use builder::{MapBuilder, SetBuilder};
pub use codec::{JsonCodec, KeyCodec};
pub use config::{MapConfig, DEFAULT_THRESHOLD};
pub use error::{BoxError, Error, Result};
pub use map::Map;
pub use set::Set;
