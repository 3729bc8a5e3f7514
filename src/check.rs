//! Validation of a tree's structure and ordering.

use std::hash::{BuildHasher, Hash};
use std::ops::{Bound, RangeBounds};

use thiserror::Error;

use crate::node::{NodeId, Side};
use crate::tree::Tree;

/// An invariant of a [`Tree`] that [`Tree::check`] found broken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// A node links to a node the tree doesn't hold.
    #[error("{node:?} links to missing node {missing:?}")]
    DanglingLink {
        /// The node holding the link.
        node: NodeId,
        /// The id it links to.
        missing: NodeId,
    },

    /// The root claims to have a parent.
    #[error("root {root:?} has parent {parent:?}")]
    ParentedRoot {
        /// The root.
        root: NodeId,
        /// Its supposed parent.
        parent: NodeId,
    },

    /// A child's parent link doesn't point at the node that owns it.
    #[error("{child:?} is a child of {owner:?} but links to parent {parent:?}")]
    ParentMismatch {
        /// The child.
        child: NodeId,
        /// The node whose `left` or `right` is the child.
        owner: NodeId,
        /// What the child's parent link says.
        parent: Option<NodeId>,
    },

    /// A node's hash falls outside the range its position allows.
    #[error("{node:?} hashes out of order on the {side:?} of {ancestor:?}")]
    OutOfOrder {
        /// The misplaced node.
        node: NodeId,
        /// The nearest ancestor whose hash it violates.
        ancestor: NodeId,
        /// Which side of the ancestor the node is on.
        side: Side,
    },

    /// Walking down from the root didn't reach every node the tree holds, or reached some
    /// more than once.
    #[error("reached {reachable} nodes from the root but the tree holds {held}")]
    Unreachable {
        /// Nodes visited walking down from the root, stopping once it exceeds `held`.
        reachable: usize,
        /// Nodes the tree holds.
        held: usize,
    },
}

/// The hashes a subtree may hold, and which ancestor set each end.
#[derive(Copy, Clone)]
struct Window {
    low: Bound<u64>,
    high: Bound<u64>,
    /// Ancestor setting `low`, whose right subtree we are in.
    low_owner: Option<NodeId>,
    /// Ancestor setting `high`, whose left subtree we are in.
    high_owner: Option<NodeId>,
}

impl<T, S> Tree<T, S>
where
    T: Hash,
    S: BuildHasher,
{
    /// Checks every structural and ordering invariant of the tree, returning the first one found
    /// broken:
    ///
    /// - every link resolves, and every child links back to the node owning it;
    /// - the root has no parent, and every node is reachable from it exactly once;
    /// - every node in a left subtree hashes lower than the subtree's parent, and every node in a
    ///   right subtree hashes no lower (strictly higher when duplicates are disallowed).
    ///
    /// A tree only modified through its own methods always passes.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashbst::Tree;
    ///
    /// let mut tree: Tree<_> = (0..100).collect();
    /// tree.delete(&42);
    /// assert_eq!(tree.check(), Ok(()));
    /// ```
    pub fn check(&self) -> Result<(), InvariantError> {
        let held = self.len();
        let Some(root) = self.root else {
            return match held {
                0 => Ok(()),
                held => Err(InvariantError::Unreachable { reachable: 0, held }),
            };
        };
        let root_node = self.get_node(root).ok_or(InvariantError::DanglingLink {
            node: root,
            missing: root,
        })?;
        if let Some(parent) = root_node.parent {
            return Err(InvariantError::ParentedRoot { root, parent });
        }

        let everything = Window {
            low: Bound::Unbounded,
            high: Bound::Unbounded,
            low_owner: None,
            high_owner: None,
        };
        let mut stack = vec![(root, everything)];
        let mut reachable = 0;

        while let Some((id, window)) = stack.pop() {
            reachable += 1;
            if reachable > held {
                return Err(InvariantError::Unreachable { reachable, held });
            }

            let node = self.node(id);
            let hash = self.hash_of(&node.value);
            if !(window.low, window.high).contains(&hash) {
                let (ancestor, side) = match window.low {
                    Bound::Included(low) | Bound::Excluded(low) if hash <= low => {
                        (window.low_owner, Side::Right)
                    }
                    _ => (window.high_owner, Side::Left),
                };
                return Err(InvariantError::OutOfOrder {
                    node: id,
                    ancestor: ancestor.expect("Only ancestors narrow the window"),
                    side,
                });
            }

            for (side, child) in [(Side::Left, node.left), (Side::Right, node.right)] {
                let Some(child) = child else {
                    continue;
                };
                let child_node = self.get_node(child).ok_or(InvariantError::DanglingLink {
                    node: id,
                    missing: child,
                })?;
                if child_node.parent != Some(id) {
                    return Err(InvariantError::ParentMismatch {
                        child,
                        owner: id,
                        parent: child_node.parent,
                    });
                }

                let child_window = match side {
                    Side::Left => Window {
                        high: Bound::Excluded(hash),
                        high_owner: Some(id),
                        ..window
                    },
                    Side::Right if self.allows_duplicates() => Window {
                        low: Bound::Included(hash),
                        low_owner: Some(id),
                        ..window
                    },
                    Side::Right => Window {
                        low: Bound::Excluded(hash),
                        low_owner: Some(id),
                        ..window
                    },
                };
                stack.push((child, child_window));
            }
        }

        if reachable < held {
            return Err(InvariantError::Unreachable { reachable, held });
        }
        Ok(())
    }
}
