//! Traversals of a [`Tree`]. The depth-first ones keep their own stack rather than recursing, so
//! even a tree degraded into a long list can be walked.
//!
//! Every traversal comes in two forms: one taking a plain callback, and a `try_` one whose
//! callback can fail, stopping the traversal at the first error and returning it.
//!
//! # Examples
//!
//! ```
//! use hashbst::{hash::BuildIdentityHasher, Tree};
//!
//! let mut tree = Tree::with_hasher(BuildIdentityHasher::default());
//! tree.extend([2, 1, 3]);
//!
//! let mut values = Vec::new();
//! tree.traverse_inorder(true, |node| values.push(*node.value()));
//! assert_eq!(values, [3, 2, 1]);
//!
//! // Stop as soon as we see a 2.
//! let mut seen = Vec::new();
//! let result = tree.try_traverse_preorder(false, |node| {
//!     seen.push(*node.value());
//!     if *node.value() == 2 { Err("found a 2") } else { Ok(()) }
//! });
//! assert_eq!(result, Err("found a 2"));
//! assert_eq!(seen, [2]);
//! ```

use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt;

use generational_arena::Arena;

use crate::node::{Node, NodeId, Side};
use crate::tree::Tree;

/// The depth-first orders, by when a node is visited relative to its subtrees.
#[derive(Copy, Clone, Debug)]
enum DepthFirst {
    PreOrder,
    InOrder,
    PostOrder,
}

/// Work left on the depth-first stack: either a subtree still to lay out, or a node whose turn to
/// be visited has come.
enum Step {
    Expand(NodeId),
    Visit(NodeId),
}

fn unwrap_infallible(result: Result<(), Infallible>) {
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

impl<T, S> Tree<T, S> {
    /// Visits the left subtree, then the node, then the right subtree, or the right subtree first
    /// when `reverse` is set. Without `reverse`, values come in ascending hash order.
    pub fn traverse_inorder<F>(&self, reverse: bool, mut callback: F)
    where
        F: FnMut(&Node<T>),
    {
        unwrap_infallible(self.try_traverse_inorder(reverse, |node| {
            callback(node);
            Ok(())
        }))
    }

    /// Visits the node, then the left subtree, then the right subtree, or the right subtree
    /// before the left when `reverse` is set.
    pub fn traverse_preorder<F>(&self, reverse: bool, mut callback: F)
    where
        F: FnMut(&Node<T>),
    {
        unwrap_infallible(self.try_traverse_preorder(reverse, |node| {
            callback(node);
            Ok(())
        }))
    }

    /// Visits the left subtree, then the right subtree (or the other way around when `reverse` is
    /// set), then the node.
    pub fn traverse_postorder<F>(&self, reverse: bool, mut callback: F)
    where
        F: FnMut(&Node<T>),
    {
        unwrap_infallible(self.try_traverse_postorder(reverse, |node| {
            callback(node);
            Ok(())
        }))
    }

    /// Visits the tree level by level, each level left to right.
    pub fn traverse_breadthfirst<F>(&self, mut callback: F)
    where
        F: FnMut(&Node<T>),
    {
        unwrap_infallible(self.try_traverse_breadthfirst(|node| {
            callback(node);
            Ok(())
        }))
    }

    /// [`traverse_inorder`][Tree::traverse_inorder], stopping at the first error `callback`
    /// returns.
    pub fn try_traverse_inorder<F, E>(&self, reverse: bool, callback: F) -> Result<(), E>
    where
        F: FnMut(&Node<T>) -> Result<(), E>,
    {
        self.depth_first(DepthFirst::InOrder, reverse, callback)
    }

    /// [`traverse_preorder`][Tree::traverse_preorder], stopping at the first error `callback`
    /// returns.
    pub fn try_traverse_preorder<F, E>(&self, reverse: bool, callback: F) -> Result<(), E>
    where
        F: FnMut(&Node<T>) -> Result<(), E>,
    {
        self.depth_first(DepthFirst::PreOrder, reverse, callback)
    }

    /// [`traverse_postorder`][Tree::traverse_postorder], stopping at the first error `callback`
    /// returns.
    pub fn try_traverse_postorder<F, E>(&self, reverse: bool, callback: F) -> Result<(), E>
    where
        F: FnMut(&Node<T>) -> Result<(), E>,
    {
        self.depth_first(DepthFirst::PostOrder, reverse, callback)
    }

    /// [`traverse_breadthfirst`][Tree::traverse_breadthfirst], stopping at the first error
    /// `callback` returns.
    pub fn try_traverse_breadthfirst<F, E>(&self, mut callback: F) -> Result<(), E>
    where
        F: FnMut(&Node<T>) -> Result<(), E>,
    {
        let mut queue = VecDeque::new();
        queue.extend(self.root);

        while let Some(id) = queue.pop_front() {
            let node = self.node(id);
            queue.extend(node.left);
            queue.extend(node.right);
            callback(node)?;
        }
        Ok(())
    }

    fn depth_first<F, E>(&self, order: DepthFirst, reverse: bool, mut callback: F) -> Result<(), E>
    where
        F: FnMut(&Node<T>) -> Result<(), E>,
    {
        let mut stack = Vec::new();
        stack.extend(self.root.map(Step::Expand));

        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Visit(id) => {
                    callback(self.node(id))?;
                    continue;
                }
                Step::Expand(id) => id,
            };

            let node = self.node(id);
            let side = if reverse { Side::Right } else { Side::Left };
            let (first, second) = (node.child(side), node.child(side.flip()));

            // Pushed in the opposite order to the one they should run in.
            match order {
                DepthFirst::PreOrder => {
                    stack.extend(second.map(Step::Expand));
                    stack.extend(first.map(Step::Expand));
                    callback(node)?;
                }
                DepthFirst::InOrder => {
                    stack.extend(second.map(Step::Expand));
                    stack.push(Step::Visit(id));
                    stack.extend(first.map(Step::Expand));
                }
                DepthFirst::PostOrder => {
                    stack.push(Step::Visit(id));
                    stack.extend(second.map(Step::Expand));
                    stack.extend(first.map(Step::Expand));
                }
            }
        }
        Ok(())
    }

    /// An iterator over the values in ascending hash order.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashbst::{hash::BuildIdentityHasher, Tree};
    ///
    /// let mut tree = Tree::with_hasher(BuildIdentityHasher::default());
    /// tree.extend([5, 1, 4]);
    ///
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&1, &4, &5]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            nodes: &self.nodes,
            stack: Vec::new(),
            remaining: self.len(),
        };
        iter.push_left_spine(self.root);
        iter
    }
}

impl<'a, T, S> IntoIterator for &'a Tree<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the values of a [`Tree`], created by [`Tree::iter`].
pub struct Iter<'a, T> {
    nodes: &'a Arena<Node<T>>,
    /// Nodes whose left subtree has been yielded but which haven't been yet.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut next: Option<NodeId>) {
        let nodes = self.nodes;
        while let Some(id) = next {
            let node = &nodes[id.0];
            self.stack.push(node);
            next = node.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Formats a tree's values as an in-order list.
pub(crate) struct DebugInOrder<'a, T, S>(pub(crate) &'a Tree<T, S>);

impl<T, S> fmt::Debug for DebugInOrder<'_, T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
