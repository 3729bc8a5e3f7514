//! Nodes of a [`Tree`][crate::Tree]. Nodes live in the tree's arena and refer to each other by
//! [`NodeId`], so a parent and its children can point at each other without either owning the
//! other twice.

use std::fmt;
use std::hash::{Hash, Hasher};

use generational_arena::Index;

/// Names one node of a [`Tree`][crate::Tree].
///
/// Ids are generational: once the node they name is destroyed (by a deletion or by clearing the
/// tree), they never resolve again, even if the tree reuses the storage for a new node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

/// Which child of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    /// The child holding smaller hashes.
    Left,
    /// The child holding greater (or, with duplicates, equal) hashes.
    Right,
}

impl Side {
    /// The other side.
    pub fn flip(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A node of a hash-ordered tree: a value and links to its parent and children.
///
/// The parent link is only a back-reference. A node is owned by exactly one of the tree (as its
/// root) or its parent (as a left or right child).
#[derive(Clone)]
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, parent: Option<NodeId>) -> Self {
        Self {
            value,
            parent,
            left: None,
            right: None,
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The node this one is a child of, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The left child.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The right child.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// The child on the given side.
    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Detaches `child` if it is one of this node's children. Returns whether anything was
    /// detached.
    pub(crate) fn remove_child(&mut self, child: NodeId) -> bool {
        self.replace_child(child, None)
    }

    /// Puts `new` where `old` was if `old` is one of this node's children. Returns `false`, and
    /// changes nothing, when `old` is neither child.
    ///
    /// Only this node's links change: `new`'s parent link is the caller's business.
    pub(crate) fn replace_child(&mut self, old: NodeId, new: Option<NodeId>) -> bool {
        if self.left == Some(old) {
            self.left = new;
            true
        } else if self.right == Some(old) {
            self.right = new;
            true
        } else {
            false
        }
    }
}

/// A node hashes exactly like its value, so it can stand in for the value when comparing hashes.
impl<T: Hash> Hash for Node<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("parent", &self.parent)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}
