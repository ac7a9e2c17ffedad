use std::fmt::Display;

use tracing::{debug, trace_span};

use super::{Element, Elements, IdGen, Role, ToElements};
use crate::List;

impl<T: Display> ToElements for List<T> {
    fn to_elements(&self) -> Elements {
        let _span = trace_span!("to_elements", structure = "list").entered();
        let mut ids = IdGen::default();
        let mut out = Vec::new();
        serialize(self, &mut ids, &mut out);
        finish(out)
    }

    fn to_elements_iterative(&self) -> Elements {
        let _span = trace_span!("to_elements_iterative", structure = "list").entered();
        let mut cells = Vec::new();
        let mut current = self;
        while let List::Cons(node) = current {
            cells.push(node);
            current = node.rest();
        }

        // Identifiers are handed out from the end of the list, so the records
        // are produced back to front and reversed afterwards.
        let mut ids = IdGen::default();
        let mut target = ids.fresh(Role::Nil);
        let mut out = Vec::with_capacity(2 * cells.len() + 1);
        out.push(Element::terminal(target.clone()));

        for node in cells.iter().rev() {
            let id = ids.fresh(Role::Cons);
            let edge = ids.fresh(Role::Edge);
            out.push(Element::edge(edge, id.clone(), target));
            out.push(Element::labelled(id.clone(), node.value().to_string()));
            target = id;
        }

        out.reverse();
        finish(out)
    }
}

/// Appends the records of `ls` to `out`, root first.
fn serialize<T: Display>(ls: &List<T>, ids: &mut IdGen, out: &mut Vec<Element>) {
    let List::Cons(node) = ls else {
        out.push(Element::terminal(ids.fresh(Role::Nil)));
        return;
    };

    // The cell and its edge precede the rest in the output but are only
    // numbered once the rest has been serialized.
    let slot = out.len();
    out.extend([Element::placeholder(), Element::placeholder()]);
    serialize(node.rest(), ids, out);

    let id = ids.fresh(Role::Cons);
    let edge = ids.fresh(Role::Edge);
    let target = out[slot + 2].id().to_owned();
    out[slot] = Element::labelled(id.clone(), node.value().to_string());
    out[slot + 1] = Element::edge(edge, id, target);
}

fn finish(out: Vec<Element>) -> Elements {
    let elements = Elements::from(out);
    debug!(
        nodes = elements.nodes().count(),
        edges = elements.edges().count(),
        "serialized list"
    );
    elements
}
