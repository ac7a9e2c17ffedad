//! Persistent singly-linked lists.
//!
//! A [`List`] is either empty ([`List::Nil`]) or a value followed by the rest
//! of a list ([`List::Cons`]). Cons cells live behind an [`Rc`] so that lists
//! can share their tails: cloning a list never copies its elements, and no
//! operation ever mutates a cell once it has been constructed.
//!
//! Most operations recurse once per element. See [`crate::iterative`] for
//! equivalents that keep their work on the heap.
use std::fmt::{self, Debug, Display};
use std::iter::FusedIterator;
use std::mem::take;
use std::rc::Rc;

use crate::EmptyStructure;

/// A persistent singly-linked list.
///
/// # Example
///
/// ```
/// # use recgraph::List;
/// let ls = List::cons(2, List::cons(1, List::nil()));
/// let longer = List::cons(3, ls.clone());
///
/// assert_eq!(ls.sexprify(), "(2 (1 ()))");
/// assert_eq!(longer.emit(), "Cons(3, Cons(2, Cons(1, Nil())))");
/// ```
pub enum List<T> {
    /// The empty list.
    Nil,
    /// A value followed by the rest of the list.
    Cons(Rc<ListNode<T>>),
}

/// The cell behind [`List::Cons`].
pub struct ListNode<T> {
    value: T,
    rest: List<T>,
}

impl<T> ListNode<T> {
    /// The value held by the cell.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The list following the value.
    #[inline]
    pub fn rest(&self) -> &List<T> {
        &self.rest
    }
}

impl<T> Drop for ListNode<T> {
    fn drop(&mut self) {
        // Unlink the uniquely owned part of the tail one cell at a time so that
        // dropping a long list does not recurse once per element.
        let mut rest = take(&mut self.rest);

        while let List::Cons(node) = rest {
            match Rc::try_unwrap(node) {
                Ok(mut node) => rest = take(&mut node.rest),
                Err(_) => break,
            }
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::Nil
    }
}

impl<T> Clone for List<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Nil => Self::Nil,
            Self::Cons(node) => Self::Cons(Rc::clone(node)),
        }
    }
}

impl<T> List<T> {
    /// Creates the empty list.
    #[inline]
    pub const fn nil() -> Self {
        Self::Nil
    }

    /// Creates a list from a value and the list that follows it.
    ///
    /// The `rest` is moved into the new cell; pass a clone to share it.
    #[inline]
    pub fn cons(value: T, rest: Self) -> Self {
        Self::Cons(Rc::new(ListNode { value, rest }))
    }

    /// Returns whether the list is [`List::Nil`].
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Splits the list into its first value and the rest, if it is not empty.
    #[inline]
    pub fn uncons(&self) -> Option<(&T, &Self)> {
        match self {
            Self::Nil => None,
            Self::Cons(node) => Some((&node.value, &node.rest)),
        }
    }

    /// Returns the first value of the list.
    ///
    /// # Errors
    ///
    /// Fails with [`EmptyStructure`] when the list is [`List::Nil`].
    pub fn head(&self) -> Result<&T, EmptyStructure> {
        match self {
            Self::Nil => Err(EmptyStructure),
            Self::Cons(node) => Ok(&node.value),
        }
    }

    /// Returns the list following the first value.
    ///
    /// # Errors
    ///
    /// Fails with [`EmptyStructure`] when the list is [`List::Nil`].
    pub fn tail(&self) -> Result<&Self, EmptyStructure> {
        match self {
            Self::Nil => Err(EmptyStructure),
            Self::Cons(node) => Ok(&node.rest),
        }
    }

    /// Counts the cons cells of the list.
    pub fn length(&self) -> usize {
        match self {
            Self::Nil => 0,
            Self::Cons(node) => 1 + node.rest.length(),
        }
    }

    /// Iterates over the values of the list from front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { next: self }
    }

    /// Applies `f` to every value, preserving order and length.
    ///
    /// `f` is called on the values from front to back.
    pub fn map<U, F>(&self, mut f: F) -> List<U>
    where
        F: FnMut(&T) -> U,
    {
        map(self, &mut f)
    }

    /// Like [`List::map`] but stops at the first error returned by `f`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`, unchanged.
    pub fn try_map<U, E, F>(&self, mut f: F) -> Result<List<U>, E>
    where
        F: FnMut(&T) -> Result<U, E>,
    {
        try_map(self, &mut f)
    }

    /// Keeps the values for which `predicate` holds, in their original order.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        filter(self, &mut predicate)
    }

    /// Right fold: computes `f(x0, f(x1, ... f(xn, initial)))`.
    ///
    /// The fold descends to the end of the list before combining anything, so
    /// `f` is first invoked on the last value.
    pub fn reduce<U, F>(&self, initial: U, mut f: F) -> U
    where
        F: FnMut(&T, U) -> U,
    {
        reduce(self, initial, &mut f)
    }

    /// Like [`List::reduce`] but stops at the first error returned by `f`.
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

    /// Right fold, identical to [`List::reduce`].
    pub fn foldr<U, F>(&self, acc: U, f: F) -> U
    where
        F: FnMut(&T, U) -> U,
    {
        self.reduce(acc, f)
    }

    /// Combines the first value with the right fold of the rest.
    ///
    /// Despite its name this is not left associative: the result is always the
    /// same as [`List::foldr`]. Use [`List::fold_left`] for a left fold.
    pub fn foldl<U, F>(&self, acc: U, mut f: F) -> U
    where
        F: FnMut(&T, U) -> U,
    {
        match self {
            Self::Nil => acc,
            Self::Cons(node) => {
                let acc = reduce(&node.rest, acc, &mut f);
                f(&node.value, acc)
            }
        }
    }

    /// Left fold: computes `f(... f(f(acc, x0), x1) ..., xn)`.
    ///
    /// Runs in constant stack space.
    pub fn fold_left<U, F>(&self, acc: U, f: F) -> U
    where
        F: FnMut(U, &T) -> U,
    {
        self.iter().fold(acc, f)
    }

    /// Returns the list with its values in reverse order.
    ///
    /// Accumulates into a new list while walking the input, so this runs in
    /// constant stack space.
    pub fn reverse(&self) -> Self
    where
        T: Clone,
    {
        let mut acc = Self::Nil;
        let mut orig = self;

        while let Self::Cons(node) = orig {
            acc = Self::cons(node.value.clone(), acc);
            orig = &node.rest;
        }

        acc
    }

    /// Returns all values of `self` followed by all values of `other`.
    ///
    /// The cells of `self` are copied while `other` is shared with the result.
    pub fn append(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        match self {
            Self::Nil => other.clone(),
            Self::Cons(node) => Self::cons(node.value.clone(), node.rest.append(other)),
        }
    }

    /// Renders the list as nested s-expressions, e.g. `(1 (2 ()))`.
    pub fn sexprify(&self) -> String
    where
        T: Display,
    {
        self.to_string()
    }

    /// Renders the constructor expression of the list, e.g.
    /// `Cons(1, Cons(2, Nil()))`.
    pub fn emit(&self) -> String
    where
        T: Display,
    {
        Emit(self).to_string()
    }
}

fn map<T, U>(ls: &List<T>, f: &mut impl FnMut(&T) -> U) -> List<U> {
    match ls {
        List::Nil => List::Nil,
        List::Cons(node) => {
            let value = f(&node.value);
            List::cons(value, map(&node.rest, f))
        }
    }
}

fn try_map<T, U, E>(ls: &List<T>, f: &mut impl FnMut(&T) -> Result<U, E>) -> Result<List<U>, E> {
    match ls {
        List::Nil => Ok(List::Nil),
        List::Cons(node) => {
            let value = f(&node.value)?;
            Ok(List::cons(value, try_map(&node.rest, f)?))
        }
    }
}

fn filter<T: Clone>(ls: &List<T>, predicate: &mut impl FnMut(&T) -> bool) -> List<T> {
    match ls {
        List::Nil => List::Nil,
        List::Cons(node) => {
            if predicate(&node.value) {
                List::cons(node.value.clone(), filter(&node.rest, predicate))
            } else {
                filter(&node.rest, predicate)
            }
        }
    }
}

fn reduce<T, U>(ls: &List<T>, initial: U, f: &mut impl FnMut(&T, U) -> U) -> U {
    match ls {
        List::Nil => initial,
        List::Cons(node) => {
            let acc = reduce(&node.rest, initial, f);
            f(&node.value, acc)
        }
    }
}

fn try_reduce<T, U, E>(
    ls: &List<T>,
    initial: U,
    f: &mut impl FnMut(&T, U) -> Result<U, E>,
) -> Result<U, E> {
    match ls {
        List::Nil => Ok(initial),
        List::Cons(node) => {
            let acc = try_reduce(&node.rest, initial, f)?;
            f(&node.value, acc)
        }
    }
}

impl<T: Display> Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("()"),
            Self::Cons(node) => write!(f, "({} {})", node.value, node.rest),
        }
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("Nil"),
            Self::Cons(node) => f
                .debug_tuple("Cons")
                .field(&node.value)
                .field(&node.rest)
                .finish(),
        }
    }
}

struct Emit<'a, T>(&'a List<T>);

impl<'a, T: Display> Display for Emit<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            List::Nil => f.write_str("Nil()"),
            List::Cons(node) => write!(f, "Cons({}, {})", node.value, Emit(&node.rest)),
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        values
            .into_iter()
            .rev()
            .fold(Self::Nil, |rest, value| Self::cons(value, rest))
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the values of a [`List`], created by [`List::iter`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    next: &'a List<T>,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { next: self.next }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let (value, rest) = self.next.uncons()?;
        self.next = rest;
        Some(value)
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}
