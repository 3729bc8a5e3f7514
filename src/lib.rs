//! This crate exposes a Binary Search Tree ordered by the hashes of its values rather than by the
//! values themselves.
//!
//! ## Hash-ordered Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored values. BSTs are typically defined recursively using the notion of a `Node`. A `Node`
//! stores a value and sometimes has child `Node`s. Usually the invariants of a BST compare values
//! directly. Here they compare the values' hashes instead:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree have a value hashing lower
//!    than its own value.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree have a value hashing no
//!    lower than its own value (strictly higher when the tree rejects duplicates).
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Any [`Hash`][std::hash::Hash] type can therefore be stored, with no need for
//! [`Ord`]. The price is that two different values with the same hash are the same to the tree,
//! and that the in-order traversal follows hash order, which is only meaningful with a hasher
//! that preserves some order (see [`hash::BuildIdentityHasher`]).
//!
//! The tree does not balance itself: searching takes `O(height)`, and inserting values in hash
//! order makes the height `O(N)`. No operation recurses, so such a tree is slow but safe.
//!
//! # Examples
//!
//! ```
//! use hashbst::{hash::BuildIdentityHasher, Tree};
//!
//! let mut tree = Tree::with_hasher(BuildIdentityHasher::default());
//! for x in [3, 2, 0, 1, 4, 6, 5, 7, 8] {
//!     tree.add(x);
//! }
//!
//! let mut levels = Vec::new();
//! tree.traverse_breadthfirst(|node| levels.push(*node.value()));
//! assert_eq!(levels, [3, 2, 4, 0, 6, 1, 5, 7, 8]);
//!
//! assert!(tree.delete(&3));
//! assert!(!tree.has_value(&3));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod check;
pub mod hash;
mod node;
mod traverse;
mod tree;


pub use check::InvariantError;
pub use node::{Node, NodeId, Side};
pub use traverse::Iter;
pub use tree::Tree;
