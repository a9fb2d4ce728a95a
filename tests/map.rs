// Map integration suite.
//
// Each test states the behavior under check. Core invariants exercised:
// - Uniqueness: one entry per key; `set` on a present key overwrites.
// - Growth: sizes are primes reached by `next_prime(2 * size)`, checked
//   after each new entry, at most once per insertion.
// - Errors: keys the codec cannot encode fail loudly, absence does not.
use chain_hashmap::prime::is_prime;
use chain_hashmap::{Error, Map, MapConfig};
use serde::Serialize;
use std::collections::BTreeMap;

// Test: growth from a small table.
// Assumes: threshold 1.0, keys 1..=4.
// Verifies: every key retrievable, the table grew and its size is prime.
#[test]
fn small_table_grows_and_keeps_entries() {
    let mut m = Map::new(2, 1.0);
    for (k, v) in [(1, "one"), (2, "two"), (3, "three"), (4, "four")] {
        m.set(k, v).unwrap();
    }
    assert_eq!(m.len(), 4);
    assert_eq!(m.get(&1).unwrap(), Some(&"one"));
    assert_eq!(m.get(&2).unwrap(), Some(&"two"));
    assert_eq!(m.get(&3).unwrap(), Some(&"three"));
    assert_eq!(m.get(&4).unwrap(), Some(&"four"));
    assert!(m.size() > 2);
    assert!(is_prime(m.size()));
}

// Test: overwrite semantics.
// Verifies: the second `set` replaces the value and returns the old one.
#[test]
fn overwrite_keeps_one_entry() {
    let mut m = Map::new(2, 0.75);
    m.set(1, "one").unwrap();
    assert_eq!(m.set(1, "three").unwrap(), Some("one"));
    assert_eq!(m.len(), 1);
    assert_eq!(m.get(&1).unwrap(), Some(&"three"));
}

// Test: lazy allocation.
// Assumes: a map created with zero slots.
// Verifies: the first `set` allocates a prime-sized table.
#[test]
fn zero_sized_map_accepts_first_set() {
    let mut m = Map::new(0, 0.75);
    assert_eq!(m.size(), 0);
    m.set("key".to_string(), 42).unwrap();
    assert!(m.size() > 0);
    assert!(is_prime(m.size()));
    assert_eq!(m.get(&"key".to_string()).unwrap(), Some(&42));
}

// Test: explicit growth sequence.
// Verifies: 2 -> 5 -> 11 -> 23.
#[test]
fn explicit_resizes_follow_prime_doubling() {
    let mut m: Map<u8, u8> = Map::new(2, 1.0);
    let mut sizes = vec![m.size()];
    for _ in 0..3 {
        m.resize();
        sizes.push(m.size());
    }
    assert_eq!(sizes, vec![2, 5, 11, 23]);
}

// Test: delete completeness over many keys and growth steps.
#[test]
fn delete_every_other_key() {
    let mut m: Map<u32, String> = Map::default();
    for k in 0..500u32 {
        m.set(k, k.to_string()).unwrap();
    }
    for k in (0..500u32).step_by(2) {
        assert_eq!(m.delete(&k).unwrap(), Some(k.to_string()));
    }
    assert_eq!(m.len(), 250);
    for k in 0..500u32 {
        assert_eq!(m.get(&k).unwrap().is_some(), k % 2 == 1);
    }
}

// Test: load factor after bulk insertion with the default threshold.
// Verifies: the bound holds after every insertion once the table is
// large enough that one doubling always suffices.
#[test]
fn load_factor_stays_bounded() {
    let mut m: Map<u32, ()> = Map::with_config(MapConfig::default().initial_size(11));
    for k in 0..2_000u32 {
        m.set(k, ()).unwrap();
        assert!(m.load_factor() < m.threshold());
    }
}

#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
enum Shape {
    Circle { r: u32 },
    Poly(Vec<(i32, i32)>),
}

// Test: structured keys.
// Verifies: equal values built separately address the same entry.
#[test]
fn structured_keys() {
    let mut m = Map::new(0, 0.75);
    m.set(Shape::Circle { r: 1 }, "small").unwrap();
    m.set(Shape::Poly(vec![(0, 0), (1, 0), (0, 1)]), "tri").unwrap();
    m.set(Shape::Circle { r: 1 }, "unit").unwrap();
    assert_eq!(m.len(), 2);
    assert_eq!(m.get(&Shape::Circle { r: 1 }).unwrap(), Some(&"unit"));
    assert_eq!(
        m.get(&Shape::Poly(vec![(0, 0), (1, 0), (0, 1)])).unwrap(),
        Some(&"tri")
    );
    assert_eq!(m.get(&Shape::Poly(vec![])).unwrap(), None);
}

// Test: keys JSON cannot represent.
// Verifies: `UnsupportedKey` from set/get/delete; the map is unchanged.
#[test]
fn map_keyed_by_non_string_maps_is_rejected() {
    let mut m: Map<BTreeMap<Vec<u8>, u8>, u8> = Map::new(2, 0.75);
    let mut key = BTreeMap::new();
    key.insert(vec![1, 2], 3);
    assert!(matches!(m.set(key.clone(), 1), Err(Error::UnsupportedKey { .. })));
    assert!(matches!(m.get(&key), Err(Error::UnsupportedKey { .. })));
    assert!(matches!(m.delete(&key), Err(Error::UnsupportedKey { .. })));
    assert!(m.is_empty());

    // The empty map serializes as `{}` and is a valid key.
    m.set(BTreeMap::new(), 9).unwrap();
    assert_eq!(m.get(&BTreeMap::new()).unwrap(), Some(&9));
}

// Test: iteration views agree with lookups.
#[test]
fn iter_keys_values_agree() {
    let mut m = Map::new(2, 3.0);
    for k in 0..20 {
        m.set(k, k * k).unwrap();
    }
    let pairs: Vec<(i32, i32)> = m.iter().map(|(k, v)| (*k, *v)).collect();
    let keys: Vec<i32> = m.keys().copied().collect();
    let values: Vec<i32> = m.values().copied().collect();
    assert_eq!(pairs.len(), 20);
    assert_eq!(pairs.iter().map(|p| p.0).collect::<Vec<_>>(), keys);
    assert_eq!(pairs.iter().map(|p| p.1).collect::<Vec<_>>(), values);
    for (k, v) in &m {
        assert_eq!(*v, k * k);
    }
}

// Test: map equality ignores table size and insertion order.
#[test]
fn equality_ignores_layout() {
    let mut a = Map::new(2, 3.0);
    let mut b = Map::new(13, 0.5);
    for k in 0..10 {
        a.set(k, -k).unwrap();
    }
    for k in (0..10).rev() {
        b.set(k, -k).unwrap();
    }
    assert_eq!(a, b);
    b.set(3, 3).unwrap();
    assert_ne!(a, b);
}
