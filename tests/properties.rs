use std::collections::HashSet;

use proptest::collection::vec;
use proptest::prelude::*;

use recgraph::graph::{Element, ToElements};
use recgraph::{iterative, EmptyStructure, List, Tree};

/// Plain description of a tree, so that strategies never hold `Rc`s.
#[derive(Debug, Clone)]
enum Shape {
    Leaf,
    Node(i32, Box<Shape>, Box<Shape>),
}

fn shape() -> impl Strategy<Value = Shape> {
    Just(Shape::Leaf).prop_recursive(8, 64, 2, |inner| {
        (-100..100i32, inner.clone(), inner)
            .prop_map(|(value, left, right)| Shape::Node(value, Box::new(left), Box::new(right)))
    })
}

fn build(shape: &Shape) -> Tree<i32> {
    match shape {
        Shape::Leaf => Tree::leaf(),
        Shape::Node(value, left, right) => Tree::node(*value, build(left), build(right)),
    }
}

fn pre_order(shape: &Shape, out: &mut Vec<i32>) {
    if let Shape::Node(value, left, right) = shape {
        out.push(*value);
        pre_order(left, out);
        pre_order(right, out);
    }
}

fn values() -> impl Strategy<Value = Vec<i32>> {
    vec(-100..100i32, 0..64)
}

fn to_vec(ls: &List<i32>) -> Vec<i32> {
    ls.iter().copied().collect()
}

fn list(values: &[i32]) -> List<i32> {
    values.iter().copied().collect()
}

fn distinct_ids(elements: &[Element]) -> bool {
    let ids: HashSet<_> = elements.iter().map(Element::id).collect();
    ids.len() == elements.len()
}

#[test]
fn empty_list_accessors_fail() {
    let ls = List::<i32>::nil();
    assert_eq!(ls.length(), 0);
    assert_eq!(ls.head(), Err(EmptyStructure));
    assert_eq!(ls.tail().map(List::length), Err(EmptyStructure));
    assert_eq!(Tree::<i32>::leaf().height(), 0);
}

proptest! {
    #[test]
    fn length_counts_cons_cells(xs in values(), x in any::<i32>()) {
        let ls = list(&xs);
        prop_assert_eq!(ls.length(), xs.len());
        prop_assert_eq!(List::cons(x, ls.clone()).length(), 1 + ls.length());
    }

    #[test]
    fn head_and_tail_of_cons(xs in values(), x in any::<i32>()) {
        let ls = List::cons(x, list(&xs));
        prop_assert_eq!(ls.head(), Ok(&x));
        prop_assert_eq!(to_vec(ls.tail().unwrap()), xs);
    }

    #[test]
    fn append_laws(xs in values(), ys in values(), zs in values()) {
        let (a, b, c) = (list(&xs), list(&ys), list(&zs));
        prop_assert_eq!(to_vec(&List::nil().append(&b)), ys.clone());
        prop_assert_eq!(
            to_vec(&a.append(&b).append(&c)),
            to_vec(&a.append(&b.append(&c)))
        );
        prop_assert_eq!(to_vec(&a.append(&b)), [xs, ys].concat());
    }

    #[test]
    fn map_laws(xs in values()) {
        let ls = list(&xs);
        let f = |x: &i32| x * 2;
        let g = |x: &i32| x + 1;
        prop_assert_eq!(to_vec(&ls.map(|x| *x)), xs);
        prop_assert_eq!(to_vec(&ls.map(g).map(f)), to_vec(&ls.map(|x| f(&g(x)))));
    }

    #[test]
    fn reverse_is_an_involution(xs in values()) {
        let ls = list(&xs);
        prop_assert_eq!(to_vec(&ls.reverse().reverse()), xs.clone());
        prop_assert_eq!(to_vec(&ls.reverse()), xs.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn filter_extremes(xs in values()) {
        let ls = list(&xs);
        prop_assert_eq!(to_vec(&ls.filter(|_| true)), xs);
        prop_assert!(ls.filter(|_| false).is_nil());
    }

    #[test]
    fn folds(xs in values()) {
        let ls = list(&xs);
        let foldr = ls.foldr(0i64, |x, acc| i64::from(*x) - acc);
        prop_assert_eq!(ls.reduce(0i64, |x, acc| i64::from(*x) - acc), foldr);
        prop_assert_eq!(ls.foldl(0i64, |x, acc| i64::from(*x) - acc), foldr);
        prop_assert_eq!(
            ls.fold_left(0i64, |acc, x| acc - i64::from(*x)),
            xs.iter().fold(0i64, |acc, x| acc - i64::from(*x))
        );
    }

    #[test]
    fn iterative_list_operations_agree(xs in values(), ys in values()) {
        let (a, b) = (list(&xs), list(&ys));
        prop_assert_eq!(iterative::length(&a), a.length());
        prop_assert_eq!(to_vec(&iterative::append(&a, &b)), to_vec(&a.append(&b)));
        prop_assert_eq!(to_vec(&iterative::map(&a, |x| x - 1)), to_vec(&a.map(|x| x - 1)));
        prop_assert_eq!(
            to_vec(&iterative::filter(&a, |x| *x > 0)),
            to_vec(&a.filter(|x| *x > 0))
        );
        prop_assert_eq!(
            iterative::reduce(&a, 1i64, |x, acc| i64::from(*x) - acc),
            a.reduce(1i64, |x, acc| i64::from(*x) - acc)
        );
    }

    #[test]
    fn height_recurrence(shape in shape()) {
        let t = build(&shape);
        match &t {
            Tree::Leaf => prop_assert_eq!(t.height(), 0),
            Tree::Node(node) => prop_assert_eq!(
                t.height(),
                1 + node.left().height().max(node.right().height())
            ),
        }
    }

    #[test]
    fn flattening_filter_counts_survivors(shape in shape(), pivot in -100..100i32) {
        let t = build(&shape);
        let mut all = Vec::new();
        pre_order(&shape, &mut all);

        let expected: Vec<_> = all.iter().copied().filter(|v| *v < pivot).collect();
        let filtered = t.filter(|v| *v < pivot);
        prop_assert_eq!(filtered.length(), expected.len());
        prop_assert_eq!(to_vec(&filtered), expected);
    }

    #[test]
    fn strange_filter_keeps_survivors(shape in shape(), pivot in -100..100i32) {
        let t = build(&shape);
        let filtered = t.strange_filter(|v| *v < pivot);
        let survivors = t.reduce(0usize, |v, count| count + usize::from(*v < pivot));
        prop_assert_eq!(filtered.size(), survivors);
        prop_assert!(filtered.reduce(true, |v, ok| ok && *v < pivot));
    }

    #[test]
    fn iterative_tree_operations_agree(shape in shape()) {
        let t = build(&shape);
        prop_assert_eq!(iterative::height(&t), t.height());
        prop_assert_eq!(iterative::size(&t), t.size());
        prop_assert_eq!(iterative::map_tree(&t, |v| v * 3).emit(), t.map(|v| v * 3).emit());
        prop_assert_eq!(
            to_vec(&iterative::filter_tree(&t, |v| v % 2 == 0)),
            to_vec(&t.filter(|v| v % 2 == 0))
        );
        prop_assert_eq!(
            iterative::reduce_tree(&t, 0i64, |v, acc| acc.wrapping_mul(3).wrapping_add(i64::from(*v))),
            t.reduce(0i64, |v, acc| acc.wrapping_mul(3).wrapping_add(i64::from(*v)))
        );
    }

    #[test]
    fn list_graph_shape(xs in values()) {
        let ls = list(&xs);
        let elements = ls.to_elements();
        prop_assert_eq!(elements.nodes().count(), xs.len() + 1);
        prop_assert_eq!(elements.edges().count(), xs.len());
        prop_assert!(distinct_ids(elements.as_slice()));
        let label = xs.first().map(ToString::to_string);
        prop_assert_eq!(elements.root().and_then(|root| root.label()), label.as_deref());
        prop_assert_eq!(elements, ls.to_elements_iterative());
    }

    #[test]
    fn tree_graph_shape(shape in shape()) {
        let t = build(&shape);
        let n = t.size();
        let elements = t.to_elements();
        prop_assert_eq!(elements.nodes().count(), n + (n + 1));
        prop_assert_eq!(elements.edges().count(), 2 * n);
        prop_assert!(distinct_ids(elements.as_slice()));

        let root = elements.root().map(|root| root.id().to_owned());
        let expected = if t.is_leaf() { "leaf" } else { "node" };
        prop_assert!(root.map_or(false, |id| id.starts_with(expected)));
        prop_assert_eq!(elements, t.to_elements_iterative());
    }
}
