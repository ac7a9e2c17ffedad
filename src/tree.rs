//! Persistent binary trees.
//!
//! A [`Tree`] is either empty ([`Tree::Leaf`]) or a value with a left and a
//! right subtree ([`Tree::Node`]). As with [`List`], nodes live behind an
//! [`Rc`] and are never mutated, so transformations share every subtree they
//! leave untouched.
use std::cmp::max;
use std::fmt::{self, Debug, Display};
use std::mem::take;
use std::rc::Rc;

use crate::{EmptyStructure, List};

/// A persistent binary tree.
///
/// # Example
///
/// ```
/// # use recgraph::Tree;
/// let t = Tree::node(3, Tree::leaf_node(1), Tree::leaf_node(2));
///
/// assert_eq!(t.height(), 2);
/// assert_eq!(t.sexprify(), "(3 (1 () ()) (2 () ()))");
/// assert_eq!(t.filter(|v| *v != 1).sexprify(), "(3 (2 ()))");
/// ```
pub enum Tree<T> {
    /// The empty tree.
    Leaf,
    /// A value with two subtrees.
    Node(Rc<TreeNode<T>>),
}

/// The node behind [`Tree::Node`].
pub struct TreeNode<T> {
    value: T,
    left: Tree<T>,
    right: Tree<T>,
}

impl<T> TreeNode<T> {
    /// The value held by the node.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The left subtree.
    #[inline]
    pub fn left(&self) -> &Tree<T> {
        &self.left
    }

    /// The right subtree.
    #[inline]
    pub fn right(&self) -> &Tree<T> {
        &self.right
    }
}

impl<T> Drop for TreeNode<T> {
    fn drop(&mut self) {
        if self.left.is_leaf() && self.right.is_leaf() {
            return;
        }

        // Detach uniquely owned descendants onto a worklist so that dropping a
        // degenerate tree does not recurse once per level.
        let mut pending = vec![take(&mut self.left), take(&mut self.right)];

        while let Some(tree) = pending.pop() {
            if let Tree::Node(node) = tree {
                if let Ok(mut node) = Rc::try_unwrap(node) {
                    pending.push(take(&mut node.left));
                    pending.push(take(&mut node.right));
                }
            }
        }
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::Leaf
    }
}

impl<T> Clone for Tree<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf => Self::Leaf,
            Self::Node(node) => Self::Node(Rc::clone(node)),
        }
    }
}

impl<T> Tree<T> {
    /// Creates the empty tree.
    #[inline]
    pub const fn leaf() -> Self {
        Self::Leaf
    }

    /// Creates a tree from a value and two subtrees.
    #[inline]
    pub fn node(value: T, left: Self, right: Self) -> Self {
        Self::Node(Rc::new(TreeNode { value, left, right }))
    }

    /// Creates a tree holding a single value with two empty subtrees.
    #[inline]
    pub fn leaf_node(value: T) -> Self {
        Self::node(value, Self::Leaf, Self::Leaf)
    }

    /// Returns whether the tree is [`Tree::Leaf`].
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }

    /// Returns the value at the root.
    ///
    /// # Errors
    ///
    /// Fails with [`EmptyStructure`] when the tree is a [`Tree::Leaf`].
    pub fn value(&self) -> Result<&T, EmptyStructure> {
        match self {
            Self::Leaf => Err(EmptyStructure),
            Self::Node(node) => Ok(&node.value),
        }
    }

    /// Returns the left subtree of the root.
    ///
    /// # Errors
    ///
    /// Fails with [`EmptyStructure`] when the tree is a [`Tree::Leaf`].
    pub fn left(&self) -> Result<&Self, EmptyStructure> {
        match self {
            Self::Leaf => Err(EmptyStructure),
            Self::Node(node) => Ok(&node.left),
        }
    }

    /// Returns the right subtree of the root.
    ///
    /// # Errors
    ///
    /// Fails with [`EmptyStructure`] when the tree is a [`Tree::Leaf`].
    pub fn right(&self) -> Result<&Self, EmptyStructure> {
        match self {
            Self::Leaf => Err(EmptyStructure),
            Self::Node(node) => Ok(&node.right),
        }
    }

    /// Length of the longest path from the root to a leaf, counted in nodes.
    pub fn height(&self) -> usize {
        match self {
            Self::Leaf => 0,
            Self::Node(node) => 1 + max(node.left.height(), node.right.height()),
        }
    }

    /// Counts the nodes of the tree.
    pub fn size(&self) -> usize {
        match self {
            Self::Leaf => 0,
            Self::Node(node) => 1 + node.left.size() + node.right.size(),
        }
    }

    /// Grafts `other` in place of the leaf at the end of the right spine.
    ///
    /// Nodes along the right spine are copied, everything else is shared.
    pub fn append_rightmost(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        match self {
            Self::Leaf => other.clone(),
            Self::Node(node) => Self::node(
                node.value.clone(),
                node.left.clone(),
                node.right.append_rightmost(other),
            ),
        }
    }

    /// Applies `f` to every value, preserving the shape of the tree.
    ///
    /// `f` is called in pre-order.
    pub fn map<U, F>(&self, mut f: F) -> Tree<U>
    where
        F: FnMut(&T) -> U,
    {
        map(self, &mut f)
    }

    /// Like [`Tree::map`] but stops at the first error returned by `f`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`, unchanged.
    pub fn try_map<U, E, F>(&self, mut f: F) -> Result<Tree<U>, E>
    where
        F: FnMut(&T) -> Result<U, E>,
    {
        try_map(self, &mut f)
    }

    /// Removes the nodes whose value fails `predicate` while keeping a tree.
    ///
    /// A removed node is replaced by its filtered left subtree with the
    /// filtered right subtree grafted onto its right spine (see
    /// [`Tree::append_rightmost`]), or by the filtered right subtree alone when
    /// nothing survives on the left.
    pub fn strange_filter<F>(&self, mut predicate: F) -> Self
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        strange_filter(self, &mut predicate)
    }

    /// Collects the values satisfying `predicate` into a list.
    ///
    /// A surviving value precedes the survivors of its left subtree, which
    /// precede the survivors of its right subtree.
    pub fn filter<F>(&self, mut predicate: F) -> List<T>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        filter(self, &mut predicate)
    }

    /// Folds the left subtree, combines the result with the value, then
    /// continues folding the right subtree from there.
    ///
    /// Values are therefore visited in-order.
    pub fn reduce<U, F>(&self, initial: U, mut f: F) -> U
    where
        F: FnMut(&T, U) -> U,
    {
        reduce(self, initial, &mut f)
    }

    /// Like [`Tree::reduce`] but stops at the first error returned by `f`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`, unchanged.
    pub fn try_reduce<U, E, F>(&self, initial: U, mut f: F) -> Result<U, E>
    where
        F: FnMut(&T, U) -> Result<U, E>,
    {
        try_reduce(self, initial, &mut f)
    }

    /// Renders the tree as nested s-expressions, e.g. `(1 () ())`.
    pub fn sexprify(&self) -> String
    where
        T: Display,
    {
        self.to_string()
    }

    /// Renders the constructor expression of the tree, e.g.
    /// `Node(1, Leaf(), Leaf())`.
    pub fn emit(&self) -> String
    where
        T: Display,
    {
        Emit(self).to_string()
    }
}

fn map<T, U>(t: &Tree<T>, f: &mut impl FnMut(&T) -> U) -> Tree<U> {
    match t {
        Tree::Leaf => Tree::Leaf,
        Tree::Node(node) => {
            let value = f(&node.value);
            let left = map(&node.left, f);
            Tree::node(value, left, map(&node.right, f))
        }
    }
}

fn try_map<T, U, E>(t: &Tree<T>, f: &mut impl FnMut(&T) -> Result<U, E>) -> Result<Tree<U>, E> {
    match t {
        Tree::Leaf => Ok(Tree::Leaf),
        Tree::Node(node) => {
            let value = f(&node.value)?;
            let left = try_map(&node.left, f)?;
            Ok(Tree::node(value, left, try_map(&node.right, f)?))
        }
    }
}

fn strange_filter<T: Clone>(t: &Tree<T>, predicate: &mut impl FnMut(&T) -> bool) -> Tree<T> {
    let Tree::Node(node) = t else {
        return Tree::Leaf;
    };

    if predicate(&node.value) {
        let left = strange_filter(&node.left, predicate);
        return Tree::node(node.value.clone(), left, strange_filter(&node.right, predicate));
    }

    // Dropping the node leaves two subtrees behind and several ways to join
    // them. Survivors on the right always hang off the left's right spine.
    let left = strange_filter(&node.left, predicate);
    let right = strange_filter(&node.right, predicate);
    match left {
        Tree::Leaf => right,
        Tree::Node(_) => left.append_rightmost(&right),
    }
}

fn filter<T: Clone>(t: &Tree<T>, predicate: &mut impl FnMut(&T) -> bool) -> List<T> {
    match t {
        Tree::Leaf => List::Nil,
        Tree::Node(node) => {
            if predicate(&node.value) {
                let left = filter(&node.left, predicate);
                let right = filter(&node.right, predicate);
                List::cons(node.value.clone(), left).append(&right)
            } else {
                let left = filter(&node.left, predicate);
                left.append(&filter(&node.right, predicate))
            }
        }
    }
}

fn reduce<T, U>(t: &Tree<T>, initial: U, f: &mut impl FnMut(&T, U) -> U) -> U {
    match t {
        Tree::Leaf => initial,
        Tree::Node(node) => {
            let acc = reduce(&node.left, initial, f);
            let acc = f(&node.value, acc);
            reduce(&node.right, acc, f)
        }
    }
}

fn try_reduce<T, U, E>(
    t: &Tree<T>,
    initial: U,
    f: &mut impl FnMut(&T, U) -> Result<U, E>,
) -> Result<U, E> {
    match t {
        Tree::Leaf => Ok(initial),
        Tree::Node(node) => {
            let acc = try_reduce(&node.left, initial, f)?;
            let acc = f(&node.value, acc)?;
            try_reduce(&node.right, acc, f)
        }
    }
}

impl<T: Display> Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf => f.write_str("()"),
            Self::Node(node) => write!(f, "({} {} {})", node.value, node.left, node.right),
        }
    }
}

impl<T: Debug> Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf => f.write_str("Leaf"),
            Self::Node(node) => f
                .debug_tuple("Node")
                .field(&node.value)
                .field(&node.left)
                .field(&node.right)
                .finish(),
        }
    }
}

struct Emit<'a, T>(&'a Tree<T>);

impl<'a, T: Display> Display for Emit<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Tree::Leaf => f.write_str("Leaf()"),
            Tree::Node(node) => write!(
                f,
                "Node({}, {}, {})",
                node.value,
                Emit(&node.left),
                Emit(&node.right)
            ),
        }
    }
}
