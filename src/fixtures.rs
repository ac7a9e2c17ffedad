//! Named example values, used throughout the documentation and tests.
//!
//! The lists are descending chains, each one extending the previous one:
//!
//! ```text
//! ls0 = Nil
//! ls1 = Cons(1, Nil)
//! ls2 = Cons(2, ls1)
//! ...
//! ls5 = Cons(5, ls4)
//! ```
//!
//! The trees are built from each other in the same way:
//!
//! ```text
//! t0 = Leaf
//! t1 = LeafNode(1)
//! t2 = Node(2, t1, Leaf)
//! t3 = Node(3, t1, LeafNode(2))
//! t4 = Node(4, t3, t2)
//! ```
use crate::{List, Tree};

pub fn ls0() -> List<i32> {
    List::nil()
}

pub fn ls1() -> List<i32> {
    List::cons(1, ls0())
}

pub fn ls2() -> List<i32> {
    List::cons(2, ls1())
}

pub fn ls3() -> List<i32> {
    List::cons(3, ls2())
}

pub fn ls4() -> List<i32> {
    List::cons(4, ls3())
}

pub fn ls5() -> List<i32> {
    List::cons(5, ls4())
}

pub fn t0() -> Tree<i32> {
    Tree::leaf()
}

pub fn t1() -> Tree<i32> {
    Tree::leaf_node(1)
}

pub fn t2() -> Tree<i32> {
    Tree::node(2, t1(), t0())
}

pub fn t3() -> Tree<i32> {
    Tree::node(3, t1(), Tree::leaf_node(2))
}

/// Both occurrences of `t1` in the result are the same node.
pub fn t4() -> Tree<i32> {
    let t1 = t1();
    let t2 = Tree::node(2, t1.clone(), t0());
    let t3 = Tree::node(3, t1, Tree::leaf_node(2));
    Tree::node(4, t3, t2)
}
