use std::fmt::Display;

use bitvec::vec::BitVec;
use tracing::{debug, trace_span};

use super::{Element, Elements, IdGen, Role, ToElements};
use crate::Tree;

impl<T: Display> ToElements for Tree<T> {
    fn to_elements(&self) -> Elements {
        let _span = trace_span!("to_elements", structure = "tree").entered();
        let mut ids = IdGen::default();
        let mut out = Vec::new();
        serialize(self, &mut ids, &mut out);
        finish(out)
    }

    fn to_elements_iterative(&self) -> Elements {
        let _span = trace_span!("to_elements_iterative", structure = "tree").entered();
        let mut ids = IdGen::default();
        let mut out = Vec::new();

        // Pending subtrees together with the output slot reserved for them.
        // A set bit marks a node whose subtrees have already been scheduled.
        let mut frames = vec![(self, 0)];
        let mut expanded: BitVec = BitVec::new();
        expanded.push(false);

        // Output positions of the roots of completed subtrees.
        let mut roots = Vec::new();

        while let (Some((tree, slot)), Some(done)) = (frames.pop(), expanded.pop()) {
            match tree {
                Tree::Leaf => {
                    roots.push(out.len());
                    out.push(Element::terminal(ids.fresh(Role::Leaf)));
                }
                Tree::Node(node) if !done => {
                    let slot = out.len();
                    out.extend([
                        Element::placeholder(),
                        Element::placeholder(),
                        Element::placeholder(),
                    ]);
                    frames.push((tree, slot));
                    expanded.push(true);
                    frames.push((node.right(), 0));
                    expanded.push(false);
                    frames.push((node.left(), 0));
                    expanded.push(false);
                }
                Tree::Node(node) => {
                    let (Some(right), Some(left)) = (roots.pop(), roots.pop()) else {
                        unreachable!("subtrees are serialized before their parent");
                    };
                    let left = out[left].id().to_owned();
                    let right = out[right].id().to_owned();
                    place(&mut out, slot, &mut ids, node.value(), left, right);
                    roots.push(slot);
                }
            }
        }

        finish(out)
    }
}

/// Appends the records of `t` to `out`, root first.
fn serialize<T: Display>(t: &Tree<T>, ids: &mut IdGen, out: &mut Vec<Element>) {
    let Tree::Node(node) = t else {
        out.push(Element::terminal(ids.fresh(Role::Leaf)));
        return;
    };

    // The node and its two edges precede both subtrees in the output but are
    // only numbered once both subtrees have been serialized.
    let slot = out.len();
    out.extend([
        Element::placeholder(),
        Element::placeholder(),
        Element::placeholder(),
    ]);

    serialize(node.left(), ids, out);
    let left = out[slot + 3].id().to_owned();
    let right_slot = out.len();
    serialize(node.right(), ids, out);
    let right = out[right_slot].id().to_owned();

    place(out, slot, ids, node.value(), left, right);
}

/// Fills the three slots reserved for a node and its edges.
fn place<T: Display>(
    out: &mut [Element],
    slot: usize,
    ids: &mut IdGen,
    value: &T,
    left: String,
    right: String,
) {
    let id = ids.fresh(Role::Node);
    let left_edge = ids.fresh(Role::Edge);
    let right_edge = ids.fresh(Role::Edge);
    out[slot] = Element::labelled(id.clone(), value.to_string());
    out[slot + 1] = Element::edge(left_edge, id.clone(), left);
    out[slot + 2] = Element::edge(right_edge, id, right);
}

fn finish(out: Vec<Element>) -> Elements {
    let elements = Elements::from(out);
    debug!(
        nodes = elements.nodes().count(),
        edges = elements.edges().count(),
        "serialized tree"
    );
    elements
}
