//! # Property-Based Tests for the 2-3 Tree
//!
//! Randomized tests using proptest, validating the tree's behavioral
//! contract against `std::collections::BTreeMap` as an oracle and its
//! structural invariants via the test-only checker.
//!
//! ## Test Properties
//!
//! - Insert-then-lookup: every inserted key is retrievable
//! - Oracle comparison: observable behavior matches BTreeMap
//! - Ordering: ascending iteration is strictly sorted; descending is its
//!   exact reverse
//! - Balance: every leaf sits at the same depth after any insert sequence
//! - Size accounting: length counts distinct keys only

use proptest::prelude::*;
use std::collections::BTreeMap;
use trefoil::Tree;

// ===========================================================================
// Strategy Helpers
// ===========================================================================

/// Generate a vector of unique keys for testing
fn unique_keys(max_len: usize) -> impl Strategy<Value = Vec<i32>> {
	prop::collection::hash_set(any::<i32>(), 0..max_len).prop_map(|s| s.into_iter().collect())
}

/// Generate a vector of key-value pairs (duplicate keys allowed)
fn key_value_pairs(max_len: usize) -> impl Strategy<Value = Vec<(i32, i32)>> {
	prop::collection::vec((any::<i32>(), any::<i32>()), 0..max_len)
}

// ===========================================================================
// Insert-Then-Lookup Properties
// ===========================================================================

proptest! {
	/// Property: after inserting entries, every key maps to its last value
	#[test]
	fn insert_then_lookup(entries in key_value_pairs(500)) {
		let mut tree: Tree<i32, i32> = Tree::new();
		let mut expected: BTreeMap<i32, i32> = BTreeMap::new();

		// Insert all entries (last value wins for duplicates)
		for (k, v) in &entries {
			tree.insert(*k, *v);
			expected.insert(*k, *v);
		}

		tree.assert_invariants();

		for (k, v) in &expected {
			prop_assert_eq!(tree.get(k), Some(v), "key {} should map to {}", k, v);
		}

		prop_assert_eq!(tree.len(), expected.len());
	}

	/// Property: all inserted keys must be retrievable
	#[test]
	fn all_inserted_keys_exist(keys in unique_keys(500)) {
		let mut tree: Tree<i32, i32> = Tree::new();

		for k in &keys {
			tree.insert(*k, k.wrapping_mul(10));
		}

		tree.assert_invariants();

		for k in &keys {
			prop_assert!(tree.contains_key(k), "key {} should exist after insertion", k);
		}
	}

	/// Property: insert returns the previous value exactly when the key
	/// was already present, and the oracle agrees at every step
	#[test]
	fn insert_matches_oracle_stepwise(entries in key_value_pairs(300)) {
		let mut tree: Tree<i32, i32> = Tree::new();
		let mut oracle: BTreeMap<i32, i32> = BTreeMap::new();

		for (k, v) in entries {
			prop_assert_eq!(tree.insert(k, v), oracle.insert(k, v));
			prop_assert_eq!(tree.len(), oracle.len());
		}

		tree.assert_invariants();
	}
}

// ===========================================================================
// Ordering Properties
// ===========================================================================

proptest! {
	/// Property: ascending iteration yields keys in strictly increasing order
	#[test]
	fn ascending_iteration_strictly_sorted(keys in unique_keys(500)) {
		let mut tree: Tree<i32, i32> = Tree::new();
		for k in &keys {
			tree.insert(*k, 0);
		}

		let walked: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
		for window in walked.windows(2) {
			prop_assert!(window[0] < window[1], "keys {} and {} out of order", window[0], window[1]);
		}
		prop_assert_eq!(walked.len(), keys.len());
	}

	/// Property: descending iteration is the exact reverse of ascending
	#[test]
	fn descending_is_exact_reverse(keys in unique_keys(300)) {
		let mut tree: Tree<i32, i32> = Tree::new();
		for k in &keys {
			tree.insert(*k, 0);
		}

		let forward: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
		let mut backward: Vec<i32> = tree.iter_descending().map(|(k, _)| *k).collect();
		backward.reverse();

		prop_assert_eq!(forward, backward);
	}

	/// Property: breadth-first traversal visits every key exactly once
	#[test]
	fn breadth_visits_every_key_once(keys in unique_keys(300)) {
		let mut tree: Tree<i32, i32> = Tree::new();
		for k in &keys {
			tree.insert(*k, 0);
		}

		let mut walked: Vec<i32> = tree.iter_breadth().map(|(k, _)| *k).collect();
		walked.sort_unstable();

		let mut expected = keys.clone();
		expected.sort_unstable();

		prop_assert_eq!(walked, expected);
	}

	/// Property: the whole-tree traversal agrees with the oracle's ordering
	#[test]
	fn traversal_matches_oracle(entries in key_value_pairs(300)) {
		let mut tree: Tree<i32, i32> = Tree::new();
		let mut oracle: BTreeMap<i32, i32> = BTreeMap::new();

		for (k, v) in entries {
			tree.insert(k, v);
			oracle.insert(k, v);
		}

		let walked: Vec<(i32, i32)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
		let expected: Vec<(i32, i32)> = oracle.iter().map(|(k, v)| (*k, *v)).collect();
		prop_assert_eq!(walked, expected);
	}
}

// ===========================================================================
// Balance and Size Properties
// ===========================================================================

proptest! {
	/// Property: every leaf is at the same depth after any insert sequence,
	/// and the height stays logarithmic in the pair count
	#[test]
	fn balance_holds_after_any_insert_sequence(keys in unique_keys(500)) {
		let mut tree: Tree<i32, i32> = Tree::new();
		for k in &keys {
			tree.insert(*k, 0);
		}

		// Equal leaf depth is part of the invariant bundle.
		tree.assert_invariants();

		// A 2-3 tree of n pairs has at most log2(n + 1) levels.
		if !keys.is_empty() {
			let bound = usize::BITS as usize - (keys.len() + 1).leading_zeros() as usize;
			prop_assert!(
				tree.height() <= bound,
				"height {} exceeds log bound {} for {} keys",
				tree.height(), bound, keys.len()
			);
		}
	}

	/// Property: size counts distinct keys, never duplicate insertions
	#[test]
	fn size_counts_distinct_keys(keys in prop::collection::vec(0i32..50, 0..300)) {
		let mut tree: Tree<i32, i32> = Tree::new();
		let mut distinct: BTreeMap<i32, ()> = BTreeMap::new();

		for k in &keys {
			tree.insert(*k, *k);
			distinct.insert(*k, ());
		}

		prop_assert_eq!(tree.len(), distinct.len());
		tree.assert_invariants();
	}

	/// Property: get_or_default materializes a key exactly once
	#[test]
	fn get_or_default_counts_once(key in any::<i32>(), touches in 1usize..10) {
		let mut tree: Tree<i32, u32> = Tree::new();

		for _ in 0..touches {
			*tree.get_or_default(key) += 1;
		}

		prop_assert_eq!(tree.len(), 1);
		prop_assert_eq!(tree.get(&key), Some(&(touches as u32)));
		tree.assert_invariants();
	}
}
