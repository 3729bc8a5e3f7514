//! A mutable, hash-ordered BST. Nodes are kept in an arena owned by the tree and linked by
//! [`NodeId`]s, each child also knowing its parent so it can be detached in one step when it is
//! deleted.
//!
//! # Examples
//!
//! ```
//! use hashbst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.has_value("eggs"));
//!
//! assert!(tree.add("eggs"));
//! assert!(tree.has_value("eggs"));
//!
//! // Duplicates are allowed by default.
//! assert!(tree.add("eggs"));
//! assert_eq!(tree.len(), 2);
//!
//! // Deleting removes one of them.
//! assert!(tree.delete("eggs"));
//! assert!(tree.has_value("eggs"));
//! assert!(tree.delete("eggs"));
//! assert!(!tree.delete("eggs"));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;

use generational_arena::Arena;
use tracing::{debug, trace};

use crate::node::{Node, NodeId, Side};

/// A binary search tree ordered by the hashes of its values rather than by the values themselves.
///
/// Values only need to implement [`Hash`]. A value goes left of a node when its hash is smaller
/// than the node's and right otherwise, so the tree works for any hashable type, at the price of
/// an order that is only meaningful with a hasher that preserves one (see
/// [`BuildIdentityHasher`][crate::hash::BuildIdentityHasher]).
///
/// Two values with the same hash are indistinguishable to the tree. When duplicates are allowed,
/// [`add`][Tree::add] places the second to the right of the first. When they aren't, it is
/// rejected, even if the values themselves differ. Likewise [`has_value`][Tree::has_value],
/// [`get`][Tree::get] and [`delete`][Tree::delete] act on the first node whose hash matches, which
/// under a hash collision may hold a different value.
///
/// The tree does not balance itself. Inserting values in hash order builds a list.
///
/// Cloning a tree keeps node ids: an id from the original names the node holding the same value
/// in the clone.
#[derive(Clone)]
pub struct Tree<T, S = RandomState> {
    pub(crate) nodes: Arena<Node<T>>,
    pub(crate) root: Option<NodeId>,
    allow_duplicates: bool,
    hasher: S,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree` that allows duplicates.
    pub fn new() -> Self {
        Self::with_duplicates(true)
    }

    /// Generates a new, empty `Tree` with the given duplicate policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashbst::Tree;
    ///
    /// let mut tree = Tree::with_duplicates(false);
    /// assert!(tree.add(3));
    /// assert!(!tree.add(3));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn with_duplicates(allow_duplicates: bool) -> Self {
        Self::with_duplicates_and_hasher(allow_duplicates, RandomState::new())
    }
}

impl<T, S> Tree<T, S> {
    /// Generates a new, empty `Tree` that allows duplicates and hashes values with `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_duplicates_and_hasher(true, hasher)
    }

    /// Generates a new, empty `Tree` with the given duplicate policy and hasher.
    pub fn with_duplicates_and_hasher(allow_duplicates: bool, hasher: S) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            allow_duplicates,
            hasher,
        }
    }

    /// Generates a new, empty `Tree` with room for `capacity` nodes before it reallocates.
    pub fn with_capacity_and_hasher(capacity: usize, allow_duplicates: bool, hasher: S) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            allow_duplicates,
            hasher,
        }
    }

    /// Whether [`add`][Tree::add] accepts a value whose hash is already in the tree.
    pub fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// The hasher ordering this tree.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// How many values are in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every value. Ids of the removed nodes no longer resolve.
    pub fn clear(&mut self) {
        // `Arena::clear` would let later nodes reuse the old generations, so remove one by one.
        let ids: Vec<_> = self.nodes.iter().map(|(index, _)| index).collect();
        for index in ids {
            self.nodes.remove(index);
        }
        self.root = None;
    }

    /// The root node, if the tree isn't empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Resolves a node id, giving `None` for ids whose node has been deleted.
    pub fn get_node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Resolves an id that the tree itself linked to.
    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        self.nodes
            .get(id.0)
            .expect("Linked node ids always resolve")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes
            .get_mut(id.0)
            .expect("Linked node ids always resolve")
    }

    /// Walks `left` from `id` until there is no left child.
    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }
}

impl<T, S> Tree<T, S>
where
    T: Hash,
    S: BuildHasher,
{
    /// Orders two values (or nodes, which hash like their values) by their hashes under this
    /// tree's hasher. This is the only comparison the tree ever makes.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use hashbst::{hash::BuildIdentityHasher, Tree};
    ///
    /// let tree: Tree<i32, _> = Tree::with_hasher(BuildIdentityHasher::default());
    /// assert_eq!(tree.cmp_hash(&-5, &5), Ordering::Less);
    /// assert_eq!(tree.cmp_hash(&4, &4), Ordering::Equal);
    /// ```
    pub fn cmp_hash<A, B>(&self, a: &A, b: &B) -> Ordering
    where
        A: Hash + ?Sized,
        B: Hash + ?Sized,
    {
        self.hasher.hash_one(a).cmp(&self.hasher.hash_one(b))
    }

    pub(crate) fn hash_of<Q>(&self, value: &Q) -> u64
    where
        Q: Hash + ?Sized,
    {
        self.hasher.hash_one(value)
    }

    /// Adds `value` to the tree. Returns `false`, leaving the tree as it was, when duplicates are
    /// disallowed and a value with the same hash is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashbst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert!(tree.add(1));
    /// assert!(tree.add(1));
    ///
    /// let mut tree = Tree::with_duplicates(false);
    /// assert!(tree.add(1));
    /// assert!(!tree.add(1));
    /// ```
    pub fn add(&mut self, value: T) -> bool {
        let Some(mut current) = self.root else {
            let root = self.nodes.insert(Node::new(value, None));
            self.root = Some(NodeId(root));
            trace!(root = ?self.root, "added root");
            return true;
        };

        let hash = self.hash_of(&value);
        loop {
            let node = self.node(current);
            let side = match hash.cmp(&self.hash_of(&node.value)) {
                Ordering::Less => Side::Left,
                Ordering::Equal if !self.allow_duplicates => {
                    debug!(node = ?current, "rejected duplicate");
                    return false;
                }
                Ordering::Equal | Ordering::Greater => Side::Right,
            };

            match node.child(side) {
                Some(child) => current = child,
                None => {
                    let leaf = NodeId(self.nodes.insert(Node::new(value, Some(current))));
                    self.node_mut(current).set_child(side, Some(leaf));
                    trace!(parent = ?current, ?side, ?leaf, "added leaf");

                    if cfg!(debug_assertions) {
                        let parent = self.node(current);
                        let leaf = self.node(leaf);
                        match side {
                            Side::Left => assert!(self.cmp_hash(leaf, parent).is_lt()),
                            Side::Right => assert!(self.cmp_hash(leaf, parent).is_ge()),
                        }
                    }
                    return true;
                }
            }
        }
    }

    /// Finds the first node, walking down from the root, whose value hashes like `value`.
    pub(crate) fn find<Q>(&self, value: &Q) -> Option<NodeId>
    where
        Q: Hash + ?Sized,
    {
        let hash = self.hash_of(value);
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match hash.cmp(&self.hash_of(&node.value)) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Whether a value hashing like `value` is in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashbst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(String::from("spam"));
    ///
    /// assert!(tree.has_value("spam"));
    /// assert!(!tree.has_value("ham"));
    /// ```
    pub fn has_value<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.find(value).is_some()
    }

    /// The stored value hashing like `value`, if any.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.find(value).map(|id| &self.node(id).value)
    }

    /// Deletes a value hashing like `value`. Returns whether anything was deleted.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashbst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(8305);
    ///
    /// assert!(tree.delete(&8305));
    /// assert!(!tree.has_value(&8305));
    /// assert!(!tree.delete(&8305));
    /// ```
    pub fn delete<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.remove(value).is_some()
    }

    /// Deletes a value hashing like `value` and returns it. If the tree has no such value, nothing
    /// happens.
    ///
    /// The node that held the value may be kept and given another value (its in-order successor
    /// or its only child's value), so ids obtained before the removal can afterwards name a node
    /// with a different value, or nothing at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashbst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(String::from("spam"));
    ///
    /// assert_eq!(tree.remove("spam"), Some(String::from("spam")));
    /// assert_eq!(tree.remove("spam"), None);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        let found = self.find(value)?;
        Some(self.unlink(found))
    }

    /// Removes the value of `id` from the tree, repairing the structure around it, and returns the
    /// value.
    fn unlink(&mut self, id: NodeId) -> T {
        let node = self.node(id);
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                // The in-order successor has no left child, so unlinking it below never comes
                // back here.
                let successor = self.leftmost(right);
                trace!(node = ?id, ?successor, "moving successor up");
                match self.nodes.get2_mut(id.0, successor.0) {
                    (Some(node), Some(successor)) => mem::swap(&mut node.value, &mut successor.value),
                    _ => unreachable!("Successor is a live node distinct from its ancestor"),
                }
                self.unlink(successor)
            }
            (None, None) => {
                let node = self
                    .nodes
                    .remove(id.0)
                    .expect("Linked node ids always resolve");
                match node.parent {
                    Some(parent) => {
                        let detached = self.node_mut(parent).remove_child(id);
                        debug_assert!(detached, "Parent of {id:?} did not own it");
                        trace!(node = ?id, ?parent, "detached leaf");
                    }
                    None => {
                        trace!(node = ?id, "emptied tree");
                        self.root = None;
                    }
                }
                node.value
            }
            (Some(child), None) | (None, Some(child)) => {
                let absorbed = self
                    .nodes
                    .remove(child.0)
                    .expect("Linked node ids always resolve");
                for grandchild in [absorbed.left, absorbed.right].into_iter().flatten() {
                    self.node_mut(grandchild).parent = Some(id);
                }
                trace!(node = ?id, ?child, "absorbed only child");

                let node = self.node_mut(id);
                node.left = absorbed.left;
                node.right = absorbed.right;
                mem::replace(&mut node.value, absorbed.value)
            }
        }
    }
}

impl<T, S> Extend<T> for Tree<T, S>
where
    T: Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.add(value);
        }
    }
}

impl<T, S> FromIterator<T> for Tree<T, S>
where
    T: Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut tree = Self::with_hasher(S::default());
        tree.extend(values);
        tree
    }
}

impl<T, S> fmt::Debug for Tree<T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("allow_duplicates", &self.allow_duplicates)
            .field("len", &self.len())
            .field("root", &self.root)
            .field("values", &crate::traverse::DebugInOrder(self))
            .finish()
    }
}
