//! Test utilities for loading sample trees from JSON fixtures.
//!
//! A fixture spells out an exact tree shape instead of relying on the
//! insertion order to produce one, which lets tests pin the structure a
//! traversal is expected to walk. Only available to test builds (the
//! `test-utils` feature).

use std::path::Path;

use serde::Deserialize;

use crate::{Node, NodeId, PairNode, Tree, TriPairNode};

#[derive(Deserialize, Debug)]
struct SampleNode {
	keys: Vec<i32>,
	values: Vec<String>,
	#[serde(default)]
	children: Vec<SampleNode>,
}

#[derive(Deserialize, Debug)]
struct SampleTree {
	root: Option<SampleNode>,
	size: usize,
}

/// Loads a tree from a JSON fixture file. Panics on a fixture that does
/// not describe a well-formed 2-3 tree; fixtures are test inputs, so a bad
/// one is a bug in the test, not a runtime condition.
pub fn sample_tree<P: AsRef<Path>>(path: P) -> Tree<i32, String> {
	let file = std::fs::File::open(path.as_ref()).expect("failed to open fixture file");
	let sample: SampleTree = serde_json::from_reader(file).expect("malformed fixture JSON");

	let mut tree = Tree::new();
	if let Some(root) = sample.root {
		let root_id = translate(&mut tree, root);
		tree.root = Some(root_id);
	}
	tree.len = sample.size;
	tree
}

/// Recursively allocates `sample` and its subtree into the arena,
/// returning the new node's id with all child back-links wired.
fn translate(tree: &mut Tree<i32, String>, sample: SampleNode) -> NodeId {
	let SampleNode {
		keys,
		values,
		children,
	} = sample;
	assert_eq!(keys.len(), values.len(), "fixture keys/values length mismatch");
	assert!(
		children.is_empty() || children.len() == keys.len() + 1,
		"fixture node must have no children or exactly one more child than keys"
	);

	let child_ids: Vec<NodeId> = children.into_iter().map(|c| translate(tree, c)).collect();
	let child = |branch: usize| child_ids.get(branch).copied();

	let mut entries = keys.into_iter().zip(values);
	let node = match entries.len() {
		1 => {
			let (key, value) = entries.next().expect("checked length");
			Node::Pair(PairNode {
				key,
				value,
				left: child(0),
				right: child(1),
			})
		}
		2 => {
			let (low_key, low_value) = entries.next().expect("checked length");
			let (high_key, high_value) = entries.next().expect("checked length");
			assert!(low_key < high_key, "fixture 3-node keys out of order");
			Node::TriPair(TriPairNode {
				low_key,
				low_value,
				high_key,
				high_value,
				left: child(0),
				middle: child(1),
				right: child(2),
			})
		}
		n => panic!("fixture node holds {n} keys; a 2-3 node holds 1 or 2"),
	};

	let id = tree.alloc(None, node);
	for child in child_ids {
		tree.set_parent(child, Some(id));
	}
	id
}
