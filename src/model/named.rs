//! Nodes carrying an identifier

use std::fmt;
use std::ops::Deref;

use super::{Node, NodeReference};

/// A node that also has an IRI
///
/// Dereferences to [`Node`] for the relation operations. Two named nodes
/// are equal if identifiers and relations are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedNode {
    identifier: String,
    node: Node,
}

impl NamedNode {
    /// Create a named node without relations
    pub fn new(identifier: impl Into<String>) -> Self {
        Self::from_node(identifier, Node::new())
    }

    /// Create a named node with an `rdf:type` reference
    pub fn with_type(identifier: impl Into<String>, rdf_type: impl Into<String>) -> Self {
        Self::from_node(identifier, Node::with_type(rdf_type))
    }

    /// Give an existing vertex an identifier. The vertex stays shared with
    /// other handles of `node`.
    pub fn from_node(identifier: impl Into<String>, node: Node) -> Self {
        Self {
            identifier: identifier.into(),
            node,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The relation container of this node
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// A bare reference to this node
    pub fn to_reference(&self) -> NodeReference {
        NodeReference::new(self.identifier.clone())
    }

    /// Builder form of [`Node::put`]
    pub fn with(self, relation: impl Into<String>, value: impl Into<super::Value>) -> Self {
        self.node.put(relation, value);
        self
    }
}

impl Deref for NamedNode {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.node
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.identifier)?;
        self.node.fmt_indented(f, 0)
    }
}
