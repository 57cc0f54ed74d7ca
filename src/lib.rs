//! # Trefoil: An Arena-Backed 2-3 Search Tree Map
//!
//! This crate provides an in-memory ordered associative container mapping
//! unique keys to values, implemented as a multiway ("2-3") search tree.
//!
//! ## Design Overview
//!
//! A 2-3 tree is the smallest member of the B-tree family: every node holds
//! either one key-value pair and up to two children (a *2-node*) or two
//! ordered pairs and up to three children (a *3-node*), and every leaf sits
//! at the same depth. Insertion restores that balance by *splitting*: a
//! 3-node that receives a third pair hands its middle pair to the parent and
//! becomes two 2-nodes, so the tree only ever grows in height at the root
//! and grows uniformly when it does.
//!
//! ### Key Concepts
//!
//! **Arena storage**: Nodes live in a growable slot table owned by the tree
//! and refer to each other by index, never by pointer. Splits relocate
//! children between nodes freely without any risk of dangling references,
//! and dropping or clearing the tree releases every node by dropping one
//! `Vec` - no recursive destructor walks the structure.
//!
//! **Parent back-links**: Each slot records its parent's index. The link is
//! purely navigational - ownership runs strictly top-down from the root -
//! and is re-pointed whenever a split moves a child to a new node.
//!
//! **Tagged node shapes**: A node is an enum with exactly two cases,
//! `Pair` and `TriPair`, each carrying exactly the fields its shape needs.
//! A 2-node has no second key to read uninitialized, by construction.
//!
//! ### Tree Structure
//!
//! ```text
//!                      ┌───────────────┐
//!                      │   TriPair     │  <- root: keys 3 and 5
//!                      │  keys: [3,5]  │
//!                      └──┬────┬────┬──┘
//!                         │    │    │
//!                ┌────────┘    │    └────────┐
//!                ▼             ▼             ▼
//!          ┌──────────┐ ┌──────────┐ ┌──────────┐
//!          │ Pair [1] │ │ Pair [4] │ │ Pair [8] │  <- all leaves, equal depth
//!          └──────────┘ └──────────┘ └──────────┘
//! ```
//!
//! ## Basic Usage
//!
//! ```
//! use trefoil::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Insert key-value pairs; inserting an existing key updates in place.
//! tree.insert(5, "e");
//! tree.insert(3, "c");
//! tree.insert(8, "h");
//!
//! assert_eq!(tree.get(&3), Some(&"c"));
//! assert_eq!(tree.len(), 3);
//!
//! // In-order iteration yields keys in ascending order.
//! let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, vec![3, 5, 8]);
//! ```
//!
//! ## Thread Safety
//!
//! The tree is a plain single-threaded container. All operations take
//! `&self` or `&mut self` and run to completion without blocking; callers
//! that need shared mutation must serialize externally, since an insert can
//! touch nodes from a leaf all the way up to the root.

pub mod alloc;
pub mod error;
pub mod iter;
pub mod report;
#[cfg(feature = "test-utils")]
pub mod util;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Arena Indices
// ---------------------------------------------------------------------------

/// Index of a node slot within the tree's arena.
///
/// Identifies a node for the lifetime of the tree (slots are only released
/// wholesale by [`Tree::clear`] or by dropping the tree). A `NodeId` never
/// dangles the way a pointer could: the arena vector may reallocate as it
/// grows, but indices stay put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
	#[inline]
	fn index(self) -> usize {
		self.0 as usize
	}
}

/// One arena slot: a node plus its navigational parent back-link.
///
/// `node` is `None` only transiently, while a shape change (2-node growing
/// into a 3-node, or a 3-node splitting) rebuilds the slot in place. Every
/// id reachable from the tree points at an occupied slot between operations.
pub(crate) struct Slot<K, V> {
	pub(crate) parent: Option<NodeId>,
	pub(crate) node: Option<Node<K, V>>,
}

// ---------------------------------------------------------------------------
// Node Shapes
// ---------------------------------------------------------------------------

/// A node in the 2-3 tree: either a 2-node or a 3-node.
///
/// Children are all present (internal node) or all absent (leaf); the
/// equal-leaf-depth invariant rules out anything in between.
pub(crate) enum Node<K, V> {
	/// A 2-node: one key-value pair, up to two children.
	Pair(PairNode<K, V>),
	/// A 3-node: two ordered key-value pairs, up to three children.
	TriPair(TriPairNode<K, V>),
}

/// A 2-node. Everything under `left` orders before `key`, everything under
/// `right` after it.
pub(crate) struct PairNode<K, V> {
	pub(crate) key: K,
	pub(crate) value: V,
	pub(crate) left: Option<NodeId>,
	pub(crate) right: Option<NodeId>,
}

/// A 3-node. `low_key < high_key`; the `middle` subtree holds everything
/// between them.
pub(crate) struct TriPairNode<K, V> {
	pub(crate) low_key: K,
	pub(crate) low_value: V,
	pub(crate) high_key: K,
	pub(crate) high_value: V,
	pub(crate) left: Option<NodeId>,
	pub(crate) middle: Option<NodeId>,
	pub(crate) right: Option<NodeId>,
}

/// Where a key comparison leads within one node.
enum Probe {
	/// The key is stored in this node, at the given offset.
	Found(u8),
	/// The key orders into the child at the given branch index.
	Descend(u8),
}

impl<K, V> Node<K, V> {
	/// Number of key-value pairs stored in this node (1 or 2).
	#[inline]
	pub(crate) fn key_count(&self) -> u8 {
		match self {
			Node::Pair(_) => 1,
			Node::TriPair(_) => 2,
		}
	}

	/// The key at `offset` (0 for a 2-node, 0 or 1 for a 3-node).
	pub(crate) fn key_at(&self, offset: u8) -> &K {
		match (self, offset) {
			(Node::Pair(p), 0) => &p.key,
			(Node::TriPair(t), 0) => &t.low_key,
			(Node::TriPair(t), 1) => &t.high_key,
			_ => unreachable!("key offset out of range for node shape"),
		}
	}

	/// The value paired with the key at `offset`.
	pub(crate) fn value_at(&self, offset: u8) -> &V {
		match (self, offset) {
			(Node::Pair(p), 0) => &p.value,
			(Node::TriPair(t), 0) => &t.low_value,
			(Node::TriPair(t), 1) => &t.high_value,
			_ => unreachable!("value offset out of range for node shape"),
		}
	}

	pub(crate) fn value_at_mut(&mut self, offset: u8) -> &mut V {
		match (self, offset) {
			(Node::Pair(p), 0) => &mut p.value,
			(Node::TriPair(t), 0) => &mut t.low_value,
			(Node::TriPair(t), 1) => &mut t.high_value,
			_ => unreachable!("value offset out of range for node shape"),
		}
	}

	/// The child at branch index `branch`.
	///
	/// Branches are numbered left to right: a 2-node has branches 0 (left)
	/// and 1 (right); a 3-node has 0 (left), 1 (middle) and 2 (right).
	pub(crate) fn child_at(&self, branch: u8) -> Option<NodeId> {
		match (self, branch) {
			(Node::Pair(p), 0) => p.left,
			(Node::Pair(p), 1) => p.right,
			(Node::TriPair(t), 0) => t.left,
			(Node::TriPair(t), 1) => t.middle,
			(Node::TriPair(t), 2) => t.right,
			_ => unreachable!("branch index out of range for node shape"),
		}
	}

	/// Compares `key` against this node's key(s) and reports whether it was
	/// found or which branch to descend into.
	fn probe<Q>(&self, key: &Q) -> Probe
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		match self {
			Node::Pair(p) => match key.cmp(p.key.borrow()) {
				Ordering::Equal => Probe::Found(0),
				Ordering::Less => Probe::Descend(0),
				Ordering::Greater => Probe::Descend(1),
			},
			Node::TriPair(t) => match key.cmp(t.low_key.borrow()) {
				Ordering::Equal => Probe::Found(0),
				Ordering::Less => Probe::Descend(0),
				Ordering::Greater => match key.cmp(t.high_key.borrow()) {
					Ordering::Equal => Probe::Found(1),
					Ordering::Less => Probe::Descend(1),
					Ordering::Greater => Probe::Descend(2),
				},
			},
		}
	}
}

// ---------------------------------------------------------------------------
// Core Tree Structure
// ---------------------------------------------------------------------------

/// An ordered map backed by an arena-allocated 2-3 search tree.
///
/// Keys are unique and kept in order; every leaf sits at the same depth, so
/// lookups and inserts are bounded by O(log n) node visits.
///
/// # Type Parameters
///
/// - `K`: The key type. Lookups require `K: Ord` (or `K: Borrow<Q>` with
///   `Q: Ord` for borrowed forms, mirroring the standard map APIs).
/// - `V`: The value type. Unconstrained.
///
/// # Internal Structure
///
/// The tree consists of:
/// - An **arena** (`Vec` of slots) owning every node. Nodes address each
///   other by `NodeId` index; the parent back-link in each slot exists
///   only for navigation and never owns anything.
/// - The **root** id, or `None` for the empty tree.
/// - A **pair count** maintained incrementally; updates to existing keys do
///   not change it.
pub struct Tree<K, V> {
	slots: Vec<Slot<K, V>>,
	root: Option<NodeId>,
	len: usize,
}

impl<K, V> Default for Tree<K, V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K, V> Tree<K, V> {
	// -----------------------------------------------------------------------
	// Construction
	// -----------------------------------------------------------------------

	/// Creates a new, empty tree.
	///
	/// Does not allocate; the arena grows on first insert.
	///
	/// # Example
	///
	/// ```
	/// use trefoil::Tree;
	///
	/// let tree: Tree<i32, String> = Tree::new();
	/// assert!(tree.is_empty());
	/// assert_eq!(tree.height(), 0);
	/// ```
	pub fn new() -> Self {
		Tree {
			slots: Vec::new(),
			root: None,
			len: 0,
		}
	}

	// -----------------------------------------------------------------------
	// Arena Access
	// -----------------------------------------------------------------------

	/// Shared access to the node in `id`'s slot.
	///
	/// Panics if the slot is transiently vacant; that can only happen on a
	/// re-entrant call in the middle of a shape change, which would be a
	/// bug in this module, not in the caller.
	#[inline]
	pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
		self.slots[id.index()]
			.node
			.as_ref()
			.expect("arena slot vacated outside a shape change")
	}

	#[inline]
	fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
		self.slots[id.index()]
			.node
			.as_mut()
			.expect("arena slot vacated outside a shape change")
	}

	/// Takes the node out of its slot for an in-place shape change. The
	/// caller must restore the slot with `put_node` before returning.
	#[inline]
	fn take_node(&mut self, id: NodeId) -> Node<K, V> {
		self.slots[id.index()]
			.node
			.take()
			.expect("arena slot vacated outside a shape change")
	}

	#[inline]
	fn put_node(&mut self, id: NodeId, node: Node<K, V>) {
		debug_assert!(self.slots[id.index()].node.is_none());
		self.slots[id.index()].node = Some(node);
	}

	#[inline]
	pub(crate) fn parent_of(&self, id: NodeId) -> Option<NodeId> {
		self.slots[id.index()].parent
	}

	#[inline]
	fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
		self.slots[id.index()].parent = parent;
	}

	/// Re-points the parent back-link of `child`, if there is a child.
	/// Splits relocate children between halves; every relocation must pass
	/// through here or iteration could observe a stale parent.
	#[inline]
	fn adopt(&mut self, child: Option<NodeId>, parent: NodeId) {
		if let Some(child) = child {
			self.set_parent(child, Some(parent));
		}
	}

	/// Allocates a fresh slot and returns its id.
	fn alloc(&mut self, parent: Option<NodeId>, node: Node<K, V>) -> NodeId {
		let id = NodeId(u32::try_from(self.slots.len()).expect("arena capacity exceeded u32"));
		self.slots.push(Slot {
			parent,
			node: Some(node),
		});
		id
	}

	// -----------------------------------------------------------------------
	// Tree Metadata
	// -----------------------------------------------------------------------

	/// Returns the number of key-value pairs stored in the tree.
	///
	/// Updating the value of an existing key does not change the count.
	///
	/// # Example
	///
	/// ```
	/// use trefoil::Tree;
	///
	/// let mut tree = Tree::new();
	/// tree.insert(1, "one");
	/// tree.insert(1, "uno");
	/// assert_eq!(tree.len(), 1);
	/// ```
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns `true` if the tree contains no entries.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns the height of the tree: 0 when empty, 1 for a lone root
	/// leaf, and so on. Every leaf sits at exactly this depth.
	pub fn height(&self) -> usize {
		let mut height = 0;
		let mut cursor = self.root;
		while let Some(id) = cursor {
			height += 1;
			cursor = self.node(id).child_at(0);
		}
		height
	}

	// -----------------------------------------------------------------------
	// Lookup
	// -----------------------------------------------------------------------

	/// Locates `key`, returning the slot and within-node offset holding it.
	pub(crate) fn locate<Q>(&self, key: &Q) -> Option<(NodeId, u8)>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		let mut cursor = self.root?;
		loop {
			match self.node(cursor).probe(key) {
				Probe::Found(offset) => return Some((cursor, offset)),
				Probe::Descend(branch) => match self.node(cursor).child_at(branch) {
					Some(child) => cursor = child,
					None => return None,
				},
			}
		}
	}

	/// Returns a reference to the value corresponding to the key, or `None`
	/// if the key is absent.
	///
	/// # Example
	///
	/// ```
	/// use trefoil::Tree;
	///
	/// let mut tree = Tree::new();
	/// tree.insert(1, "one");
	///
	/// assert_eq!(tree.get(&1), Some(&"one"));
	/// assert_eq!(tree.get(&2), None);
	/// ```
	pub fn get<Q>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		let (id, offset) = self.locate(key)?;
		Some(self.node(id).value_at(offset))
	}

	/// Returns a mutable reference to the value corresponding to the key.
	pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		let (id, offset) = self.locate(key)?;
		Some(self.node_mut(id).value_at_mut(offset))
	}

	/// Returns `true` if the tree contains the key.
	pub fn contains_key<Q>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		self.locate(key).is_some()
	}

	/// Returns a reference to the value for `key`, or
	/// [`Error::KeyNotFound`] if the key is absent.
	///
	/// This is the raising twin of [`get`](Self::get), for callers that
	/// treat a missing key as an error rather than an expected miss.
	///
	/// # Example
	///
	/// ```
	/// use trefoil::{error::Error, Tree};
	///
	/// let mut tree = Tree::new();
	/// tree.insert(1, "one");
	///
	/// assert_eq!(tree.at(&1).unwrap(), &"one");
	/// assert!(matches!(tree.at(&2), Err(Error::KeyNotFound)));
	/// ```
	pub fn at<Q>(&self, key: &Q) -> Result<&V>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		self.get(key).ok_or(Error::KeyNotFound)
	}

	/// Mutable variant of [`at`](Self::at).
	pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
	where
		K: Borrow<Q>,
		Q: ?Sized + Ord,
	{
		self.get_mut(key).ok_or(Error::KeyNotFound)
	}

	/// Returns the first (minimum) key-value pair, or `None` when empty.
	pub fn first_key_value(&self) -> Option<(&K, &V)> {
		let mut cursor = self.root?;
		while let Some(child) = self.node(cursor).child_at(0) {
			cursor = child;
		}
		let node = self.node(cursor);
		Some((node.key_at(0), node.value_at(0)))
	}

	/// Returns the last (maximum) key-value pair, or `None` when empty.
	pub fn last_key_value(&self) -> Option<(&K, &V)> {
		let mut cursor = self.root?;
		loop {
			let node = self.node(cursor);
			match node.child_at(node.key_count()) {
				Some(child) => cursor = child,
				None => break,
			}
		}
		let node = self.node(cursor);
		let last = node.key_count() - 1;
		Some((node.key_at(last), node.value_at(last)))
	}
}

impl<K: Ord, V> Tree<K, V> {
	// -----------------------------------------------------------------------
	// Insertion
	// -----------------------------------------------------------------------

	/// Inserts a key-value pair into the tree.
	///
	/// If the key already exists, the value is updated in place and the old
	/// value returned; the tree's structure and size are untouched. If the
	/// key is new, `None` is returned and the size grows by one.
	///
	/// # Algorithm
	///
	/// 1. Descend from the root exactly as a lookup would.
	/// 2. A matching key on the way down is an update: swap the value, done.
	/// 3. Otherwise the descent bottoms out at a leaf. A 2-node leaf absorbs
	///    the pair and becomes a 3-node. A 3-node leaf splits: its three
	///    pairs (two stored plus the incoming one) sort; the smallest and
	///    largest become two 2-nodes and the middle pair is promoted to the
	///    parent, which absorbs or splits by the same rule. Promotion past
	///    the root creates a new root - the only way the tree gets taller.
	///
	/// # Example
	///
	/// ```
	/// use trefoil::Tree;
	///
	/// let mut tree = Tree::new();
	///
	/// assert_eq!(tree.insert(1, "one"), None);        // new key
	/// assert_eq!(tree.insert(1, "uno"), Some("one")); // update
	/// assert_eq!(tree.len(), 1);
	/// ```
	pub fn insert(&mut self, key: K, value: V) -> Option<V> {
		let Some(root) = self.root else {
			let id = self.alloc(
				None,
				Node::Pair(PairNode {
					key,
					value,
					left: None,
					right: None,
				}),
			);
			self.root = Some(id);
			self.len = 1;
			return None;
		};

		// Descend to the key's node or to the leaf that will receive it.
		let mut cursor = root;
		let leaf = loop {
			match self.node(cursor).probe(&key) {
				Probe::Found(offset) => {
					let slot = self.node_mut(cursor).value_at_mut(offset);
					return Some(std::mem::replace(slot, value));
				}
				Probe::Descend(branch) => match self.node(cursor).child_at(branch) {
					Some(child) => cursor = child,
					None => break cursor,
				},
			}
		};

		self.len += 1;
		self.insert_at(leaf, key, value, None);
		None
	}

	/// Returns a mutable reference to the value for `key`, inserting
	/// `V::default()` first if the key is absent.
	///
	/// The map-index idiom: reading a missing key materializes it. Size
	/// grows by one only on the materializing path.
	///
	/// # Example
	///
	/// ```
	/// use trefoil::Tree;
	///
	/// let mut tree: Tree<&str, u32> = Tree::new();
	/// *tree.get_or_default("hits") += 1;
	/// *tree.get_or_default("hits") += 1;
	///
	/// assert_eq!(tree.get(&"hits"), Some(&2));
	/// assert_eq!(tree.len(), 1);
	/// ```
	pub fn get_or_default(&mut self, key: K) -> &mut V
	where
		K: Clone,
		V: Default,
	{
		if self.locate(&key).is_none() {
			self.insert(key.clone(), V::default());
		}
		let (id, offset) = self.locate(&key).expect("key inserted above");
		self.node_mut(id).value_at_mut(offset)
	}

	/// Inserts an owned pair into the node at `id`, splitting upward as
	/// needed.
	///
	/// `lifted` carries the two halves of a just-split child; the incoming
	/// key brackets between them, so they are wired into the child slots
	/// adjacent to wherever the pair lands. A leaf insertion passes `None`.
	fn insert_at(
		&mut self,
		mut id: NodeId,
		mut key: K,
		mut value: V,
		mut lifted: Option<(NodeId, NodeId)>,
	) {
		loop {
			match self.take_node(id) {
				// A 2-node has room: absorb the pair, stop propagating.
				Node::Pair(p) => {
					let tri = match lifted {
						// Leaf absorb: no children involved.
						None => {
							debug_assert!(p.left.is_none() && p.right.is_none());
							if key < p.key {
								TriPairNode {
									low_key: key,
									low_value: value,
									high_key: p.key,
									high_value: p.value,
									left: None,
									middle: None,
									right: None,
								}
							} else {
								TriPairNode {
									low_key: p.key,
									low_value: p.value,
									high_key: key,
									high_value: value,
									left: None,
									middle: None,
									right: None,
								}
							}
						}
						// The promoted pair brackets between the two halves
						// of the child that just split; they take over the
						// child slots on either side of where it lands.
						Some((a, b)) => {
							let tri = if key < p.key {
								TriPairNode {
									low_key: key,
									low_value: value,
									high_key: p.key,
									high_value: p.value,
									left: Some(a),
									middle: Some(b),
									right: p.right,
								}
							} else {
								TriPairNode {
									low_key: p.key,
									low_value: p.value,
									high_key: key,
									high_value: value,
									left: p.left,
									middle: Some(a),
									right: Some(b),
								}
							};
							self.set_parent(a, Some(id));
							self.set_parent(b, Some(id));
							tri
						}
					};
					self.put_node(id, Node::TriPair(tri));
					return;
				}

				// A 3-node is full: split into two 2-nodes and promote the
				// middle pair one level up.
				Node::TriPair(t) => {
					let (a, b) = match lifted {
						Some((a, b)) => (Some(a), Some(b)),
						None => (None, None),
					};

					// Sort the three pairs and gather the four children in
					// order. The existing slot is reused as the left half;
					// the right half gets a fresh slot.
					let (left_node, right_node, mid_key, mid_value);
					if key < t.low_key {
						// Incoming pair is smallest; split child was `left`.
						left_node = PairNode {
							key,
							value,
							left: a,
							right: b,
						};
						right_node = PairNode {
							key: t.high_key,
							value: t.high_value,
							left: t.middle,
							right: t.right,
						};
						mid_key = t.low_key;
						mid_value = t.low_value;
					} else if key < t.high_key {
						// Incoming pair is the middle; split child was
						// `middle`, so its halves straddle the promotion.
						left_node = PairNode {
							key: t.low_key,
							value: t.low_value,
							left: t.left,
							right: a,
						};
						right_node = PairNode {
							key: t.high_key,
							value: t.high_value,
							left: b,
							right: t.right,
						};
						mid_key = key;
						mid_value = value;
					} else {
						// Incoming pair is largest; split child was `right`.
						left_node = PairNode {
							key: t.low_key,
							value: t.low_value,
							left: t.left,
							right: t.middle,
						};
						right_node = PairNode {
							key,
							value,
							left: a,
							right: b,
						};
						mid_key = t.high_key;
						mid_value = t.high_value;
					}

					let parent = self.parent_of(id);
					let (ll, lr) = (left_node.left, left_node.right);
					let (rl, rr) = (right_node.left, right_node.right);
					self.put_node(id, Node::Pair(left_node));
					let right_id = self.alloc(parent, Node::Pair(right_node));

					// Both halves relocated children; re-point every
					// back-link so traversal never sees a stale parent.
					self.adopt(ll, id);
					self.adopt(lr, id);
					self.adopt(rl, right_id);
					self.adopt(rr, right_id);

					match parent {
						Some(parent) => {
							// Keep promoting into the ancestor. The left
							// half kept this slot's id.
							lifted = Some((id, right_id));
							key = mid_key;
							value = mid_value;
							id = parent;
						}
						None => {
							// Promotion passed the old root: grow the tree
							// by one level, uniformly.
							let root_id = self.alloc(
								None,
								Node::Pair(PairNode {
									key: mid_key,
									value: mid_value,
									left: Some(id),
									right: Some(right_id),
								}),
							);
							self.set_parent(id, Some(root_id));
							self.set_parent(right_id, Some(root_id));
							self.root = Some(root_id);
							return;
						}
					}
				}
			}
		}
	}

	// -----------------------------------------------------------------------
	// Clearing
	// -----------------------------------------------------------------------

	/// Removes all entries from the tree.
	///
	/// The arena is dropped as one flat vector, so no recursive teardown
	/// walks the structure and stack depth stays constant regardless of
	/// tree size. Constant time for an already-empty tree.
	///
	/// # Example
	///
	/// ```
	/// use trefoil::Tree;
	///
	/// let mut tree = Tree::new();
	/// tree.insert(1, "one");
	/// tree.clear();
	///
	/// assert!(tree.is_empty());
	/// assert_eq!(tree.height(), 0);
	/// ```
	pub fn clear(&mut self) {
		self.slots.clear();
		self.root = None;
		self.len = 0;
	}
}

// ---------------------------------------------------------------------------
// Iteration Entry Points
// ---------------------------------------------------------------------------

impl<K, V> Tree<K, V> {
	/// Returns a lazy in-order (ascending) iterator over the entries.
	///
	/// Yields key-value pairs in strictly increasing key order. The cursor
	/// is one-shot: once exhausted it stays exhausted, and a fresh call is
	/// needed to walk the tree again.
	pub fn iter(&self) -> iter::Ascending<'_, K, V> {
		iter::Ascending::new(self)
	}

	/// Returns the mirror of [`iter`](Self::iter): keys in strictly
	/// decreasing order.
	pub fn iter_descending(&self) -> iter::Descending<'_, K, V> {
		iter::Descending::new(self)
	}

	/// Returns a breadth-first iterator: the root's keys first, then each
	/// level's keys left to right.
	pub fn iter_breadth(&self) -> iter::Breadth<'_, K, V> {
		iter::Breadth::new(self)
	}

	pub(crate) fn root_id(&self) -> Option<NodeId> {
		self.root
	}
}

impl<'t, K, V> IntoIterator for &'t Tree<K, V> {
	type Item = (&'t K, &'t V);
	type IntoIter = iter::Ascending<'t, K, V>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
		let mut tree = Tree::new();
		tree.extend(entries);
		tree
	}
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
		for (key, value) in entries {
			self.insert(key, value);
		}
	}
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Tree<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

// ---------------------------------------------------------------------------
// Invariant Validation (test builds only)
// ---------------------------------------------------------------------------

#[cfg(any(test, feature = "test-utils"))]
impl<K: Ord + fmt::Debug, V> Tree<K, V> {
	/// Validates every structural invariant. Panics with diagnostic info on
	/// the first violation.
	///
	/// # Invariants Checked
	///
	/// 1. Equal leaf depth: every leaf sits at the same distance from the
	///    root.
	/// 2. Key ordering: `low < high` within a 3-node, and every key falls
	///    strictly inside the bounds propagated from its ancestors.
	/// 3. Children all-or-nothing: a node has either no children or exactly
	///    `key_count + 1` of them.
	/// 4. Parent back-links: every child's back-link names its actual
	///    parent; the root has none.
	/// 5. Size accounting: `len` equals the number of stored pairs.
	/// 6. Arena accounting: every slot in the arena is reachable from the
	///    root (splits recycle in place, so nothing leaks).
	pub fn assert_invariants(&self) {
		let Some(root) = self.root else {
			assert_eq!(self.len, 0, "empty tree with non-zero len");
			assert!(self.slots.is_empty(), "empty tree holding arena slots");
			return;
		};

		assert!(
			self.parent_of(root).is_none(),
			"root has a parent back-link"
		);

		let mut pairs = 0usize;
		let mut nodes = 0usize;
		let mut leaf_depth = None;
		self.validate_node(root, 1, None, None, &mut leaf_depth, &mut pairs, &mut nodes);

		assert_eq!(pairs, self.len, "len does not match stored pair count");
		assert_eq!(
			nodes,
			self.slots.len(),
			"arena holds slots unreachable from the root"
		);
	}

	fn validate_node(
		&self,
		id: NodeId,
		depth: usize,
		lower: Option<&K>,
		upper: Option<&K>,
		leaf_depth: &mut Option<usize>,
		pairs: &mut usize,
		nodes: &mut usize,
	) {
		*nodes += 1;
		let node = self.node(id);
		let key_count = node.key_count();
		*pairs += key_count as usize;

		// Invariant 2: in-node ordering.
		if let Node::TriPair(t) = node {
			assert!(
				t.low_key < t.high_key,
				"3-node keys out of order: {:?} >= {:?}",
				t.low_key,
				t.high_key
			);
		}

		// Invariant 2: ancestor bounds.
		for offset in 0..key_count {
			let key = node.key_at(offset);
			if let Some(lower) = lower {
				assert!(key > lower, "key {:?} not above subtree bound {:?}", key, lower);
			}
			if let Some(upper) = upper {
				assert!(key < upper, "key {:?} not below subtree bound {:?}", key, upper);
			}
		}

		// Invariant 3: children all-or-nothing.
		let present = (0..=key_count).filter(|b| node.child_at(*b).is_some()).count();
		if present == 0 {
			// Invariant 1: equal leaf depth.
			match *leaf_depth {
				None => *leaf_depth = Some(depth),
				Some(expected) => assert_eq!(
					depth, expected,
					"leaf at depth {} but expected {}",
					depth, expected
				),
			}
			return;
		}
		assert_eq!(
			present,
			key_count as usize + 1,
			"node has {} children but {} keys",
			present,
			key_count
		);

		for branch in 0..=key_count {
			let child = self.node(id).child_at(branch).expect("checked above");

			// Invariant 4: parent back-links.
			assert_eq!(
				self.parent_of(child),
				Some(id),
				"child back-link does not name its parent"
			);

			// Branch `b` is bounded by the keys on either side of it.
			let child_lower = if branch == 0 { lower } else { Some(node.key_at(branch - 1)) };
			let child_upper = if branch == key_count { upper } else { Some(node.key_at(branch)) };
			self.validate_node(child, depth + 1, child_lower, child_upper, leaf_depth, pairs, nodes);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	// -----------------------------------------------------------------------
	// Basic Tree Operation Tests
	// -----------------------------------------------------------------------

	#[test]
	fn basic_insert_and_get() {
		let mut tree: Tree<i32, &str> = Tree::new();

		assert_eq!(tree.insert(1, "one"), None);
		assert_eq!(tree.insert(2, "two"), None);
		assert_eq!(tree.insert(3, "three"), None);

		tree.assert_invariants();

		assert_eq!(tree.get(&1), Some(&"one"));
		assert_eq!(tree.get(&2), Some(&"two"));
		assert_eq!(tree.get(&3), Some(&"three"));
		assert_eq!(tree.get(&4), None);
	}

	#[test]
	fn insert_update() {
		let mut tree: Tree<i32, &str> = Tree::new();

		assert_eq!(tree.insert(1, "one"), None);
		assert_eq!(tree.insert(1, "uno"), Some("one"));
		assert_eq!(tree.get(&1), Some(&"uno"));
		assert_eq!(tree.len(), 1);

		tree.assert_invariants();
	}

	#[test]
	fn root_split_grows_height() {
		let mut tree: Tree<i32, i32> = Tree::new();

		tree.insert(1, 10);
		tree.insert(2, 20);
		assert_eq!(tree.height(), 1);

		// Third key overflows the root 3-node and promotes a new root.
		tree.insert(3, 30);
		assert_eq!(tree.height(), 2);

		tree.assert_invariants();
	}

	#[test]
	fn ascending_iteration_is_sorted() {
		let mut tree: Tree<i32, i32> = Tree::new();
		for key in [41, 7, 23, 2, 19, 5, 31, 11] {
			tree.insert(key, key * 10);
		}

		let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
		assert_eq!(keys, vec![2, 5, 7, 11, 19, 23, 31, 41]);

		tree.assert_invariants();
	}

	#[test]
	fn at_raises_on_missing_key() {
		let mut tree: Tree<i32, i32> = Tree::new();
		tree.insert(1, 10);

		assert!(matches!(tree.at(&1), Ok(&10)));
		assert!(matches!(tree.at(&9), Err(Error::KeyNotFound)));
	}

	#[test]
	fn clear_releases_everything() {
		let mut tree: Tree<i32, i32> = Tree::new();
		for key in 0..100 {
			tree.insert(key, key);
		}

		tree.clear();
		assert!(tree.is_empty());
		assert_eq!(tree.height(), 0);
		tree.assert_invariants();

		// The tree is reusable after clearing.
		tree.insert(1, 10);
		assert_eq!(tree.get(&1), Some(&10));
		tree.assert_invariants();
	}

	// -----------------------------------------------------------------------
	// Fixture Tests
	// -----------------------------------------------------------------------

	#[cfg(feature = "test-utils")]
	#[test]
	fn sample_fixture_loads_and_validates() {
		let tree = crate::util::sample_tree("fixtures/sample.json");

		tree.assert_invariants();
		assert_eq!(tree.len(), 5);
		assert_eq!(tree.get(&4), Some(&"d".to_string()));

		let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
		assert_eq!(keys, vec![1, 3, 4, 5, 8]);
	}
}
