//! Stack-machine versions of the recursive list and tree algorithms.
//!
//! The methods on [`List`] and [`Tree`] recurse on the native stack and are
//! the reference semantics. The functions here keep their pending work in
//! heap-allocated stacks instead, so they can process structures far deeper
//! than the thread stack allows. Each one returns the same result as its
//! recursive counterpart and invokes callbacks in the same order.
use std::cmp::max;

use bitvec::vec::BitVec;
use tracing::trace;

use crate::{List, Tree};

/// Same as [`List::length`].
pub fn length<T>(ls: &List<T>) -> usize {
    ls.iter().count()
}

/// Same as [`List::append`].
pub fn append<T: Clone>(ls: &List<T>, other: &List<T>) -> List<T> {
    let values: Vec<&T> = ls.iter().collect();
    values
        .into_iter()
        .rev()
        .fold(other.clone(), |rest, value| List::cons(value.clone(), rest))
}

/// Same as [`List::map`].
pub fn map<T, U, F>(ls: &List<T>, f: F) -> List<U>
where
    F: FnMut(&T) -> U,
{
    ls.iter().map(f).collect()
}

/// Same as [`List::filter`].
pub fn filter<T, F>(ls: &List<T>, mut predicate: F) -> List<T>
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    ls.iter().filter(|value| predicate(*value)).cloned().collect()
}

/// Same as [`List::reduce`], `f` is first called on the last value.
pub fn reduce<T, U, F>(ls: &List<T>, initial: U, mut f: F) -> U
where
    F: FnMut(&T, U) -> U,
{
    let values: Vec<&T> = ls.iter().collect();
    values
        .into_iter()
        .rev()
        .fold(initial, |acc, value| f(value, acc))
}

/// Same as [`Tree::height`].
pub fn height<T>(t: &Tree<T>) -> usize {
    let mut stack = vec![(t, 0)];
    let mut peak = 0;
    let mut height = 0;

    while let Some((tree, depth)) = stack.pop() {
        height = max(height, depth);
        if let Tree::Node(node) = tree {
            stack.push((node.right(), depth + 1));
            stack.push((node.left(), depth + 1));
            peak = max(peak, stack.len());
        }
    }

    trace!(peak, "computed tree height");
    height
}

/// Same as [`Tree::size`].
pub fn size<T>(t: &Tree<T>) -> usize {
    let mut stack = vec![t];
    let mut size = 0;

    while let Some(tree) = stack.pop() {
        if let Tree::Node(node) = tree {
            size += 1;
            stack.push(node.right());
            stack.push(node.left());
        }
    }

    size
}

/// Same as [`Tree::map`], `f` is called in pre-order.
pub fn map_tree<T, U, F>(t: &Tree<T>, mut f: F) -> Tree<U>
where
    F: FnMut(&T) -> U,
{
    // A set bit marks a node whose subtrees have already been scheduled. Its
    // mapped value waits in `values` until both subtrees are in `built`.
    let mut frames = vec![t];
    let mut expanded: BitVec = BitVec::new();
    expanded.push(false);
    let mut values = Vec::new();
    let mut built = Vec::new();
    let mut peak = 0;

    while let (Some(tree), Some(done)) = (frames.pop(), expanded.pop()) {
        match tree {
            Tree::Leaf => built.push(Tree::Leaf),
            Tree::Node(node) if !done => {
                values.push(f(node.value()));
                frames.push(tree);
                expanded.push(true);
                frames.push(node.right());
                expanded.push(false);
                frames.push(node.left());
                expanded.push(false);
                peak = max(peak, frames.len());
            }
            Tree::Node(_) => {
                let (Some(right), Some(left), Some(value)) = (built.pop(), built.pop(), values.pop())
                else {
                    unreachable!("subtrees are mapped before their parent");
                };
                built.push(Tree::node(value, left, right));
            }
        }
    }

    trace!(peak, "mapped tree");
    built.pop().unwrap_or_default()
}

/// Same as [`Tree::filter`]: survivors are collected in pre-order.
pub fn filter_tree<T, F>(t: &Tree<T>, mut predicate: F) -> List<T>
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    let mut stack = vec![t];
    let mut survivors = Vec::new();
    let mut peak = 0;

    while let Some(tree) = stack.pop() {
        if let Tree::Node(node) = tree {
            if predicate(node.value()) {
                survivors.push(node.value().clone());
            }
            stack.push(node.right());
            stack.push(node.left());
            peak = max(peak, stack.len());
        }
    }

    trace!(peak, survivors = survivors.len(), "filtered tree");
    survivors.into_iter().collect()
}

/// Same as [`Tree::reduce`]: values are combined in-order.
pub fn reduce_tree<T, U, F>(t: &Tree<T>, initial: U, mut f: F) -> U
where
    F: FnMut(&T, U) -> U,
{
    let mut acc = initial;
    let mut spine = Vec::new();
    let mut current = t;
    let mut peak = 0;

    loop {
        while let Tree::Node(node) = current {
            spine.push(node);
            current = node.left();
        }
        peak = max(peak, spine.len());

        let Some(node) = spine.pop() else {
            break;
        };
        acc = f(node.value(), acc);
        current = node.right();
    }

    trace!(peak, "reduced tree");
    acc
}
