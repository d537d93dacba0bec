#![cfg(feature = "avl")]
//! Property-based tests for AvlMap.
//!
//! These tests verify that AvlMap keeps its structural invariants and
//! behaves like an ordered set of keys, using proptest.

use intrusive_avl::avl::{AvlLinks, AvlMap, Key, NodeId};
use proptest::prelude::*;
use std::collections::BTreeSet;

// =============================================================================
// Helpers
// =============================================================================

fn build(keys: &[Key]) -> (AvlMap, Vec<AvlLinks>) {
    let mut arena: Vec<AvlLinks> = keys.iter().copied().map(AvlLinks::new).collect();
    let mut map = AvlMap::new();
    for index in 0..arena.len() {
        map.insert(&mut arena, NodeId::new(index));
    }
    (map, arena)
}

fn in_order(map: &AvlMap, arena: &[AvlLinks]) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut stack = Vec::new();
    let mut current = map.root();
    while current.is_some() || !stack.is_empty() {
        while let Some(id) = current {
            stack.push(id);
            current = arena[id.index()].left();
        }
        if let Some(id) = stack.pop() {
            keys.push(arena[id.index()].key());
            current = arena[id.index()].right();
        }
    }
    keys
}

/// Upper bound on the height of an AVL tree with `count` nodes.
fn height_bound(count: usize) -> usize {
    let nodes = count as f64 + 2.0;
    (1.4405 * nodes.log2() - 0.3277).floor() as usize
}

/// Keys drawn from a narrow range so that duplicates and hits are common.
fn key_lists(max_size: usize) -> impl Strategy<Value = Vec<Key>> {
    prop::collection::vec(0..256u64, 0..max_size)
}

#[derive(Clone, Debug)]
enum Operation {
    Insert(Key),
    Remove(Key),
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(
        prop_oneof![
            (0..128u64).prop_map(Operation::Insert),
            (0..128u64).prop_map(Operation::Remove),
        ],
        0..200,
    )
}

// =============================================================================
// Ordering Laws
// =============================================================================

proptest! {
    /// Law: in-order traversal yields the distinct inserted keys, ascending.
    #[test]
    fn prop_in_order_is_sorted_and_unique(keys in key_lists(100)) {
        let (map, arena) = build(&keys);
        let expected: Vec<Key> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(in_order(&map, &arena), expected);
    }

    /// Law: every reachable tree satisfies all structural invariants and the
    /// AVL height bound.
    #[test]
    fn prop_insert_keeps_invariants(keys in key_lists(200)) {
        let (map, arena) = build(&keys);
        let count = map.validate(&arena);
        prop_assert!(count.is_ok(), "{:?}", count);
        let count = count.unwrap_or_default();
        prop_assert!(map.height(&arena) <= height_bound(count));
    }
}

// =============================================================================
// Search Laws
// =============================================================================

proptest! {
    /// Law: search succeeds exactly for inserted keys.
    #[test]
    fn prop_search_round_trip(keys in key_lists(60), wanted in 0..256u64) {
        let (map, arena) = build(&keys);
        prop_assert_eq!(map.search(&arena, wanted).is_some(), keys.contains(&wanted));
    }

    /// Law: the node found for a key is the first record inserted with it.
    #[test]
    fn prop_search_returns_first_inserted_record(keys in key_lists(60)) {
        let (map, arena) = build(&keys);
        for key in &keys {
            let first = keys.iter().position(|candidate| candidate == key).map(NodeId::new);
            prop_assert_eq!(map.search(&arena, *key), first);
        }
    }
}

// =============================================================================
// Duplicate Insert Laws
// =============================================================================

proptest! {
    /// Law: inserting a key that is already present changes nothing.
    #[test]
    fn prop_duplicate_insert_is_idempotent(
        keys in prop::collection::vec(0..256u64, 1..60),
        pick in any::<prop::sample::Index>()
    ) {
        let (mut map, mut arena) = build(&keys);
        let key = keys[pick.index(keys.len())];
        let before = arena.clone();
        let root = map.root();

        arena.push(AvlLinks::new(key));
        map.insert(&mut arena, NodeId::new(keys.len()));

        prop_assert_eq!(&arena[..keys.len()], &before[..]);
        prop_assert_eq!(arena[keys.len()], AvlLinks::new(key));
        prop_assert_eq!(map.root(), root);
    }
}

// =============================================================================
// Remove Laws
// =============================================================================

proptest! {
    /// Law: after remove, the key is absent and every other key is present.
    #[test]
    fn prop_remove_then_search(keys in key_lists(80), key in 0..256u64) {
        let (mut map, mut arena) = build(&keys);
        let removed = map.remove(&mut arena, key);

        prop_assert_eq!(removed.is_some(), keys.contains(&key));
        prop_assert_eq!(map.search(&arena, key), None);
        for other in keys.iter().filter(|other| **other != key) {
            prop_assert!(map.contains_key(&arena, *other));
        }
        prop_assert!(map.validate(&arena).is_ok());
    }

    /// Law: removing an absent key leaves the tree structurally unchanged.
    #[test]
    fn prop_remove_absent_key_is_noop(keys in key_lists(80)) {
        let (mut map, mut arena) = build(&keys);
        let before = arena.clone();
        let root = map.root();

        // Keys are drawn below 256
        prop_assert_eq!(map.remove(&mut arena, 1_000), None);

        prop_assert_eq!(arena, before);
        prop_assert_eq!(map.root(), root);
    }

    /// Law: a removed node comes back fully detached.
    #[test]
    fn prop_removed_node_is_detached(keys in key_lists(80), key in 0..256u64) {
        let (mut map, mut arena) = build(&keys);
        if let Some(removed) = map.remove(&mut arena, key) {
            prop_assert_eq!(arena[removed.index()], AvlLinks::new(key));
        }
    }
}

// =============================================================================
// Clear Laws
// =============================================================================

proptest! {
    /// Law: clear detaches exactly the linked records, and all of them can be
    /// linked again.
    #[test]
    fn prop_clear_releases_every_record(keys in key_lists(120)) {
        let (mut map, mut arena) = build(&keys);
        let linked = arena.iter().filter(|links| links.is_linked()).count();

        prop_assert_eq!(map.clear(&mut arena), linked);
        prop_assert!(map.is_empty());
        prop_assert!(arena.iter().all(|links| !links.is_linked()));

        for index in 0..arena.len() {
            map.insert(&mut arena, NodeId::new(index));
        }
        prop_assert_eq!(map.validate(&arena), Ok(linked));
    }
}

// =============================================================================
// Model Laws
// =============================================================================

proptest! {
    /// Law: any interleaving of inserts and removes matches a `BTreeSet` and
    /// keeps every invariant after every step.
    #[test]
    fn prop_matches_btreeset_model(operations in operations()) {
        // One record per possible key, reused after removal
        let mut arena: Vec<AvlLinks> = (0..128u64).map(AvlLinks::new).collect();
        let mut map = AvlMap::new();
        let mut model = BTreeSet::new();

        for operation in operations {
            match operation {
                Operation::Insert(key) => {
                    let id = NodeId::new(usize::try_from(key).unwrap());
                    let inserted = map.try_insert(&mut arena, id).is_ok();
                    prop_assert_eq!(inserted, model.insert(key));
                }
                Operation::Remove(key) => {
                    let removed = map.remove(&mut arena, key).map(NodeId::index);
                    let expected = model.remove(&key).then(|| usize::try_from(key).unwrap());
                    prop_assert_eq!(removed, expected);
                }
            }
            prop_assert_eq!(map.validate(&arena), Ok(model.len()));
        }

        prop_assert_eq!(in_order(&map, &arena), model.into_iter().collect::<Vec<_>>());
    }
}
