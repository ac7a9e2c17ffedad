//! Serialization of lists and trees into flat sequences of graph elements.
//!
//! Every cons cell, tree node and terminal (`Nil` or `Leaf`) becomes a node
//! record, and every link from a cell or node to its substructure becomes an
//! edge record. Terminals are kept as real nodes so that the bottom of the
//! recursion stays visible when the graph is drawn.
//!
//! Identifiers are generated from a counter that is local to a single
//! serialization and prefixed by the role of the element (`nil`, `cons`,
//! `leaf`, `node` or `edge`). Substructures receive their identifiers before
//! the node that holds them, but the records are emitted root first:
//!
//! ```text
//! Cons(1, Nil)  =>  cons2 (label 1), edge3 (cons2 -> nil1), nil1
//! ```
//!
//! Consumers may rely on the first element being the record of the root.
use std::fmt::{self, Display};
use std::slice;

mod list;
mod tree;

/// Structures that can be serialized into graph [`Elements`].
pub trait ToElements {
    /// Serializes the structure, recursing once per level.
    fn to_elements(&self) -> Elements;

    /// Serializes the structure using an explicit stack.
    ///
    /// The result is identical to [`ToElements::to_elements`].
    fn to_elements_iterative(&self) -> Elements;
}

/// A node of the serialized graph.
///
/// Terminal variants have no label, everything else is labelled with the
/// text form of its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    id: String,
    label: Option<String>,
}

impl NodeRecord {
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// A directed edge of the serialized graph, from a node to its substructure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    id: String,
    source: String,
    target: String,
}

impl EdgeRecord {
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// A single record of the serialized graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Node(NodeRecord),
    Edge(EdgeRecord),
}

impl Element {
    fn terminal(id: String) -> Self {
        Self::Node(NodeRecord { id, label: None })
    }

    fn labelled(id: String, label: String) -> Self {
        Self::Node(NodeRecord {
            id,
            label: Some(label),
        })
    }

    fn edge(id: String, source: String, target: String) -> Self {
        Self::Edge(EdgeRecord { id, source, target })
    }

    /// Stands in for a record whose identifier is not known yet.
    fn placeholder() -> Self {
        Self::terminal(String::new())
    }

    /// The identifier of the record.
    #[inline]
    pub fn id(&self) -> &str {
        match self {
            Self::Node(node) => node.id(),
            Self::Edge(edge) => edge.id(),
        }
    }

    #[inline]
    pub fn as_node(&self) -> Option<&NodeRecord> {
        match self {
            Self::Node(node) => Some(node),
            Self::Edge(_) => None,
        }
    }

    #[inline]
    pub fn as_edge(&self) -> Option<&EdgeRecord> {
        match self {
            Self::Node(_) => None,
            Self::Edge(edge) => Some(edge),
        }
    }
}

/// The ordered records produced by serializing a structure.
///
/// The [`Display`] implementation renders an inspectable dump with one record
/// per line, in the shape expected by cytoscape-style renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Elements {
    elements: Vec<Element>,
}

impl Elements {
    /// The record of the root of the serialized structure.
    #[inline]
    pub fn root(&self) -> Option<&NodeRecord> {
        self.elements.first().and_then(Element::as_node)
    }

    /// Iterates over all records in order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Iterates over the node records in order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord> + '_ {
        self.elements.iter().filter_map(Element::as_node)
    }

    /// Iterates over the edge records in order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeRecord> + '_ {
        self.elements.iter().filter_map(Element::as_edge)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    #[inline]
    pub fn into_vec(self) -> Vec<Element> {
        self.elements
    }
}

impl From<Vec<Element>> for Elements {
    fn from(elements: Vec<Element>) -> Self {
        Self { elements }
    }
}

impl<'a> IntoIterator for &'a Elements {
    type Item = &'a Element;
    type IntoIter = slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Elements {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl Display for Elements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return f.write_str("[]");
        }

        f.write_str("[\n")?;
        for (index, element) in self.elements.iter().enumerate() {
            let separator = if index + 1 < self.elements.len() { "," } else { "" };
            writeln!(f, "  {element}{separator}")?;
        }
        f.write_str("]")
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(NodeRecord { id, label: None }) => {
                write!(f, "{{ data: {{ id: {} }} }}", Quoted(id))
            }
            Self::Node(NodeRecord {
                id,
                label: Some(label),
            }) => write!(
                f,
                "{{ data: {{ id: {}, label: {} }} }}",
                Quoted(id),
                Quoted(label)
            ),
            Self::Edge(EdgeRecord { id, source, target }) => write!(
                f,
                "{{ data: {{ id: {}, source: {}, target: {} }} }}",
                Quoted(id),
                Quoted(source),
                Quoted(target)
            ),
        }
    }
}

/// Single-quoted string literal.
struct Quoted<'a>(&'a str);

impl<'a> Display for Quoted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("'")?;
        for c in self.0.chars() {
            match c {
                '\'' => f.write_str("\\'")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("'")
    }
}

/// The role of a generated identifier, used as its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Nil,
    Cons,
    Leaf,
    Node,
    Edge,
}

impl Role {
    fn prefix(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Cons => "cons",
            Self::Leaf => "leaf",
            Self::Node => "node",
            Self::Edge => "edge",
        }
    }
}

/// Generator of fresh identifiers, scoped to a single serialization.
#[derive(Debug, Default)]
struct IdGen {
    count: usize,
}

impl IdGen {
    fn fresh(&mut self, role: Role) -> String {
        self.count += 1;
        format!("{}{}", role.prefix(), self.count)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fresh_ids_count_across_roles() {
        let mut ids = IdGen::default();
        assert_eq!(ids.fresh(Role::Nil), "nil1");
        assert_eq!(ids.fresh(Role::Cons), "cons2");
        assert_eq!(ids.fresh(Role::Edge), "edge3");
        assert_eq!(ids.fresh(Role::Leaf), "leaf4");
        assert_eq!(ids.fresh(Role::Node), "node5");
    }

    #[test]
    fn display_dump() {
        let elements = Elements::from(vec![
            Element::labelled("cons2".into(), "it's".into()),
            Element::edge("edge3".into(), "cons2".into(), "nil1".into()),
            Element::terminal("nil1".into()),
        ]);

        assert_eq!(
            elements.to_string(),
            "[\n\
             \x20 { data: { id: 'cons2', label: 'it\\'s' } },\n\
             \x20 { data: { id: 'edge3', source: 'cons2', target: 'nil1' } },\n\
             \x20 { data: { id: 'nil1' } }\n\
             ]"
        );
        assert_eq!(Elements::default().to_string(), "[]");
    }

    #[test]
    fn accessors() {
        let elements = Elements::from(vec![
            Element::labelled("cons2".into(), "1".into()),
            Element::edge("edge3".into(), "cons2".into(), "nil1".into()),
            Element::terminal("nil1".into()),
        ]);

        assert_eq!(elements.root().map(NodeRecord::id), Some("cons2"));
        assert_eq!(elements.root().and_then(NodeRecord::label), Some("1"));
        assert_eq!(elements.len(), 3);
        assert_eq!(elements.nodes().count(), 2);
        assert_eq!(elements.edges().map(EdgeRecord::target).collect::<Vec<_>>(), ["nil1"]);
        assert!(elements.iter().map(Element::id).eq(["cons2", "edge3", "nil1"]));
    }
}
