//! Conversion of list elements into type-named relations

use tracing::debug;

use super::{NamedNode, Node, Value};
use crate::vocab::rdf;

impl Node {
    /// Rewrites the list emulation into relations named by type.
    ///
    /// Node children under an index relation or `rdf:value` that have
    /// exactly one type move to a relation named by that type; other node
    /// children stay where they are. Literals and references found there
    /// move to `rdf:value`. Children are rewritten recursively. If
    /// `remove_type` is set, the `rdf:type` of this node and of the re-keyed
    /// children is dropped.
    ///
    /// If afterwards a single `rdf:value` is all that is left, that value is
    /// returned in place of the node.
    pub fn as_unordered(&self, remove_type: bool) -> Value {
        collapse(Value::Node(self.restructure(remove_type)))
    }

    fn restructure(&self, remove_type: bool) -> Node {
        let result = Node::new();
        for (relation, values) in self.entries() {
            if remove_type && relation == rdf::TYPE {
                continue;
            }
            if !(rdf::is_index_relation(&relation) || relation == rdf::VALUE) {
                result.put_all(relation, values);
                continue;
            }
            for value in values {
                let Some(child) = value.as_node() else {
                    result.put(rdf::VALUE, value);
                    continue;
                };
                match child.get_type() {
                    Ok(rdf_type) => {
                        result.put(rdf_type, unordered(&value, remove_type));
                    }
                    Err(e) => {
                        debug!("Keeping child under {}: {}", relation, e);
                        result.put(relation.clone(), unordered(&value, false));
                    }
                }
            }
        }
        result
    }
}

impl NamedNode {
    /// Like [`Node::as_unordered`], keeping the identifier
    pub fn as_unordered(&self, remove_type: bool) -> Value {
        let restructured = self.node().restructure(remove_type);
        collapse(Value::NamedNode(NamedNode::from_node(
            self.identifier(),
            restructured,
        )))
    }
}

fn unordered(value: &Value, remove_type: bool) -> Value {
    match value {
        Value::Node(node) => node.as_unordered(remove_type),
        Value::NamedNode(node) => node.as_unordered(remove_type),
        other => other.clone(),
    }
}

/// Several surviving `rdf:value`s leave the node as it is.
fn collapse(value: Value) -> Value {
    let single = value.as_node().and_then(|node| {
        let relations = node.read();
        match (relations.len(), relations.get(rdf::VALUE).map(Vec::as_slice)) {
            (1, Some([single])) => Some(single.clone()),
            _ => None,
        }
    });
    single.unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Literal;

    const TITLE: &str = "http://example.org/Title";
    const AUTHOR: &str = "http://example.org/Author";
    const NAME: &str = "http://www.loc.gov/mods/v3#name";
    const USE: &str = "http://www.loc.gov/METS/use";

    #[test]
    fn test_single_typed_child_is_rekeyed() {
        let node = Node::new();
        let child = Node::with_type(TITLE);
        node.add(child.clone()).unwrap();

        let kept = node.as_unordered(false);
        let kept = kept.as_node().unwrap();
        assert_eq!(kept.first(), None);
        assert_eq!(kept.get(TITLE).node().unwrap(), child);

        let stripped = node.as_unordered(true);
        let stripped = stripped.as_node().unwrap();
        let child = stripped.get(TITLE).node().unwrap();
        assert!(!child.contains_key(rdf::TYPE));
    }

    #[test]
    fn test_children_with_values() {
        let node = Node::new();
        let max = Node::with_type(NAME);
        max.set_value("Max");
        let moritz = Node::with_type(NAME);
        moritz.set_value("Moritz");
        node.add(max).unwrap();
        node.add(moritz).unwrap();
        node.put_literal(USE, "foobar");

        let outcome = node.as_unordered(false);
        let outcome = outcome.as_node().unwrap();

        assert_eq!(outcome.first(), None);
        assert_eq!(outcome.last(), None);
        assert_eq!(outcome.get(NAME).len(), 2);
        assert_eq!(outcome.get(USE).len(), 1);
    }

    #[test]
    fn test_untyped_children_stay_indexed() {
        let node = Node::new();
        node.add(Node::new().with(AUTHOR, Literal::plain("a"))).unwrap();
        let doubly = Node::with_type(AUTHOR);
        doubly.put_reference(rdf::TYPE, TITLE);
        node.add(doubly).unwrap();

        let outcome = node.as_unordered(false);
        let outcome = outcome.as_node().unwrap();

        assert_eq!(outcome.first(), Some(1));
        assert_eq!(outcome.last(), Some(2));
        assert!(!outcome.contains_key(AUTHOR));
    }

    #[test]
    fn test_single_value_collapses() {
        let node = Node::with_type(NAME);
        node.set_value("Max");

        assert_eq!(
            node.as_unordered(true),
            Value::Literal(Literal::plain("Max"))
        );
        assert!(node.as_unordered(false).as_node().is_some());
    }

    #[test]
    fn test_several_values_do_not_collapse() {
        let node = Node::new();
        node.add(Literal::plain("a")).unwrap();
        node.add(Literal::plain("b")).unwrap();

        let outcome = node.as_unordered(false);
        assert_eq!(outcome.as_node().unwrap().get(rdf::VALUE).len(), 2);
    }

    #[test]
    fn test_named_node_keeps_identifier() {
        let named = NamedNode::with_type("http://example.org/n", AUTHOR);
        named.add(Node::with_type(TITLE)).unwrap();

        match named.as_unordered(false) {
            Value::NamedNode(outcome) => {
                assert_eq!(outcome.identifier(), "http://example.org/n");
                assert!(outcome.contains_key(TITLE));
            }
            other => panic!("expected a named node, got {:?}", other),
        }
    }
}
