#![cfg(test)]

// Property tests for Map kept inside the crate so the collision codec from
// the codec tests can be reused.

use crate::codec::tests::ConstCodec;
use crate::codec::{JsonCodec, KeyCodec};
use crate::config::MapConfig;
use crate::map::Map;
use crate::prime::is_prime;
use hashbrown::HashMap;
use proptest::prelude::*;
use std::collections::BTreeSet;

// Pool-indexed operations: indices shrink to earlier keys, op lists shrink
// in length.
#[derive(Clone, Debug)]
enum Op {
    Set(usize, i32),
    Delete(usize),
    Get(usize),
    Clear,
    Resize,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
            2 => idx.clone().prop_map(Op::Delete),
            2 => idx.clone().prop_map(Op::Get),
            1 => Just(Op::Clear),
            1 => Just(Op::Resize),
            1 => Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn arb_config() -> impl Strategy<Value = MapConfig> {
    (0usize..8, prop_oneof![Just(0.25f32), Just(0.75f32), Just(1.0f32), Just(3.0f32)])
        .prop_map(|(n, t)| MapConfig::new(n, t))
}

// State-machine equivalence against hashbrown::HashMap. Invariants checked
// after each operation:
// - `len` and `get` agree with the model (uniqueness, round-trip, delete).
// - A `set` of a new key either leaves `load_factor() <= threshold` or has
//   just grown the table.
// - The size only changes by growth, and every grown size is prime.
// - `iter` yields each live key exactly once.
fn run<C: KeyCodec>(
    config: MapConfig,
    pool: Vec<String>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut sut: Map<String, i32, C> = Map::with_config(config);
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        let size_before = sut.size();
        match op {
            Op::Set(i, v) => {
                let k = pool[i].clone();
                let prev = sut.set(k.clone(), v).unwrap();
                prop_assert_eq!(prev, model.insert(k, v));
                if prev.is_none() {
                    prop_assert!(
                        sut.load_factor() <= sut.threshold() || sut.size() > size_before,
                        "load factor {} over threshold {} without a resize",
                        sut.load_factor(),
                        sut.threshold()
                    );
                } else {
                    prop_assert_eq!(sut.size(), size_before);
                }
            }
            Op::Delete(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.delete(k).unwrap(), model.remove(k));
                prop_assert_eq!(sut.get(k).unwrap(), None);
                prop_assert_eq!(sut.size(), size_before);
            }
            Op::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k).unwrap(), model.get(k));
            }
            Op::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.size(), size_before);
            }
            Op::Resize => {
                sut.resize();
                prop_assert!(sut.size() > size_before);
            }
            Op::Iterate => {
                let keys: Vec<_> = sut.keys().cloned().collect();
                let unique: BTreeSet<_> = keys.iter().cloned().collect();
                prop_assert_eq!(keys.len(), unique.len());
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(unique, m_keys);
            }
        }

        if sut.size() != size_before {
            prop_assert!(is_prime(sut.size()));
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }

    for (k, v) in &model {
        prop_assert_eq!(sut.get(k).unwrap(), Some(v));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(config in arb_config(), (pool, ops) in arb_scenario()) {
        run::<JsonCodec>(config, pool, ops)?;
    }
}

// Same invariants when every key shares one chain: stresses equality
// resolution, interior unlinking and rehash relinking.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions(config in arb_config(), (pool, ops) in arb_scenario()) {
        run::<ConstCodec>(config, pool, ops)?;
    }
}

fn arb_map() -> impl Strategy<Value = Vec<(u8, u8)>> {
    proptest::collection::vec((0u8..16, 0u8..4), 0..24)
}

fn build(entries: &[(u8, u8)], size: usize) -> Map<u8, u8> {
    let mut m = Map::new(size, 0.75);
    for &(k, v) in entries {
        m.set(k, v).unwrap();
    }
    m
}

// Property: `equal` is an equivalence relation and does not depend on the
// table size or insertion order.
proptest! {
    #[test]
    fn prop_equal_is_equivalence(a in arb_map(), b in arb_map(), c in arb_map(), size in 0usize..6) {
        let (ma, mb, mc) = (build(&a, size), build(&b, size + 1), build(&c, 2));
        prop_assert!(ma.equal(&ma));
        prop_assert_eq!(ma.equal(&mb), mb.equal(&ma));
        if ma.equal(&mb) && mb.equal(&mc) {
            prop_assert!(ma.equal(&mc));
        }

        // Same final contents inserted in another order and table size.
        let mut model: HashMap<u8, u8> = HashMap::new();
        for &(k, v) in &a {
            model.insert(k, v);
        }
        let mut dedup: Vec<(u8, u8)> = model.into_iter().collect();
        dedup.reverse();
        prop_assert!(ma.equal(&build(&dedup, size + 3)));
    }
}
