//! Persistent recursive data structures and their graph serialization.
//!
//! The crate provides two immutable, structurally shared data types:
//!
//!  - [`List`], a singly-linked cons list.
//!  - [`Tree`], a binary tree whose flattening filter produces a [`List`].
//!
//! Both come with the usual structural-recursion algorithms (mapping,
//! filtering, folding) and can be turned into a flat sequence of node and edge
//! records with [`graph::ToElements`], ready to be handed to a graph renderer.
//!
//! The algorithms on [`List`] and [`Tree`] recurse on the native stack. The
//! [`iterative`] module offers versions of the deeply recursing ones that keep
//! their work on the heap and produce identical results.
//!
//! # Example
//!
//! ```
//! use recgraph::graph::ToElements;
//! use recgraph::List;
//!
//! let ls = List::cons(2, List::cons(1, List::nil()));
//! let elements = ls.to_elements();
//!
//! assert_eq!(elements.nodes().count(), 3);
//! assert_eq!(elements.edges().count(), 2);
//! assert_eq!(elements.root().map(|root| root.id()), Some("cons4"));
//! ```
use thiserror::Error;

pub mod fixtures;
pub mod graph;
pub mod iterative;
pub mod list;
pub mod tree;

pub use list::List;
pub use tree::Tree;

/// Error returned when accessing a component of an empty list or tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the structure is empty")]
pub struct EmptyStructure;
