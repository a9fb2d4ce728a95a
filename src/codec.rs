//! Key codec: canonical key bytes and the FNV-1a hash over them.
//!
//! Hashing goes through a serialized form rather than `core::hash::Hash` so
//! that structurally equal composite keys always land in the same slot, no
//! matter how they were built. A codec is a type, not a value: its functions
//! take no `self`, which makes the hash of a key a pure function of the key
//! and lets tables reuse hashes computed by other tables of the same codec.

use crate::error::{Error, Result};
use serde::Serialize;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a.
pub fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |h, &b| {
        (h ^ u32::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// Turns keys into canonical bytes.
///
/// Implementations must be deterministic: keys that compare equal must
/// encode to identical bytes.
pub trait KeyCodec {
    fn encode<K>(key: &K) -> Result<Vec<u8>>
    where
        K: ?Sized + Serialize;

    #[inline]
    fn hash<K>(key: &K) -> Result<u32>
    where
        K: ?Sized + Serialize,
    {
        Self::encode(key).map(|b| fnv1a(&b))
    }
}

/// Default codec: compact JSON through `serde_json`.
///
/// Keys whose `Serialize` output depends on iteration order (for example
/// `std::collections::HashMap`) are not canonical under this codec; use
/// ordered collections inside keys.
#[derive(Copy, Clone, Debug, Default)]
pub struct JsonCodec;

impl KeyCodec for JsonCodec {
    fn encode<K>(key: &K) -> Result<Vec<u8>>
    where
        K: ?Sized + Serialize,
    {
        serde_json::to_vec(key).map_err(Error::from)
    }
}

/// Slot of `key` in a table of `table_size` slots.
///
/// # Panics
///
/// Panics if `table_size` is zero.
pub fn index<C, K>(key: &K, table_size: usize) -> Result<usize>
where
    C: KeyCodec,
    K: ?Sized + Serialize,
{
    assert!(table_size > 0, "a table without slots has no index");
    Ok(slot_of(C::hash(key)?, table_size))
}

#[inline]
pub(crate) fn slot_of(hash: u32, table_size: usize) -> usize {
    (hash as usize) % table_size
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde::Serializer;
    use std::collections::BTreeMap;

    /// Codec that maps every key to the same bytes, forcing one chain.
    #[derive(Copy, Clone, Debug, Default)]
    pub(crate) struct ConstCodec;

    impl KeyCodec for ConstCodec {
        fn encode<K>(key: &K) -> Result<Vec<u8>>
        where
            K: ?Sized + Serialize,
        {
            // Still reject what JSON rejects so error paths stay exercised.
            JsonCodec::encode(key).map(|_| Vec::new())
        }
    }

    /// Stand-in for a key holding a function value.
    #[derive(PartialEq, Eq, Debug)]
    pub(crate) struct Callback;

    impl Serialize for Callback {
        fn serialize<S: Serializer>(&self, _s: S) -> core::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("functions cannot be encoded"))
        }
    }

    #[test]
    fn fnv1a_reference_vectors() {
        assert_eq!(fnv1a(b""), 0x811c_9dc5);
        assert_eq!(fnv1a(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a(b"foobar"), 0xbf9c_f968);
    }

    /// Invariant: JSON encoding of primitives is the plain literal text.
    #[test]
    fn json_encoding_of_primitives() {
        assert_eq!(JsonCodec::encode(&1).unwrap(), b"1");
        assert_eq!(JsonCodec::encode("c").unwrap(), b"\"c\"");
        assert_eq!(JsonCodec::encode(&(1, "x")).unwrap(), b"[1,\"x\"]");
    }

    /// Invariant: equal composite keys built independently hash identically.
    #[test]
    fn structurally_equal_keys_share_index() {
        let mut a = BTreeMap::new();
        a.insert("x", vec![1, 2]);
        a.insert("y", vec![3]);
        let mut b = BTreeMap::new();
        b.insert("y", vec![3]);
        b.insert("x", vec![1, 2]);
        for size in [2usize, 5, 11, 97] {
            assert_eq!(
                index::<JsonCodec, _>(&a, size).unwrap(),
                index::<JsonCodec, _>(&b, size).unwrap()
            );
        }
    }

    #[test]
    fn index_is_within_table() {
        for k in 0..200 {
            let i = index::<JsonCodec, _>(&k, 7).unwrap();
            assert!(i < 7);
        }
    }

    /// Invariant: a key that cannot be serialized is an error, never slot 0.
    #[test]
    fn unsupported_key_is_an_error() {
        match index::<JsonCodec, _>(&Callback, 10) {
            Err(Error::UnsupportedKey { .. }) => {}
            other => panic!("unexpected result: {:?}", other),
        }

        // JSON objects need string keys.
        let mut m = BTreeMap::new();
        m.insert(vec![1u8], 1);
        assert!(JsonCodec::hash(&m).is_err());
    }

    #[test]
    #[should_panic]
    fn index_into_empty_table_panics() {
        let _ = index::<JsonCodec, _>(&1, 0);
    }
}
