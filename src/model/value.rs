//! The closed set of values and their capabilities

use std::fmt;

use super::{LangString, Literal, NamedNode, Node, NodeError, NodeReference, NodeResult};

/// A value linked from a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Literal(Literal),
    LangString(LangString),
    NodeReference(NodeReference),
    Node(Node),
    NamedNode(NamedNode),
}

/// Structural capability of a value
///
/// Queries on a [`QueryResult`](crate::result::QueryResult) select values
/// by the capabilities they have. A named node, for example, is matched by
/// both node-shaped and identifiable queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Holds relations (anonymous or named node)
    Node,
    /// Node with an identifier
    NamedNode,
    /// Any literal, typed or language-tagged
    Literal,
    /// Language-tagged string
    LangString,
    /// Bare reference
    NodeReference,
    /// Carries an identifier (reference or named node)
    Identifiable,
    /// Content can be inspected (literals and nodes)
    AccessibleObject,
    /// Anything that is not a literal
    NodeType,
}

impl Value {
    /// The capabilities of this value
    pub fn capabilities(&self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Value::Literal(_) => &[Literal, AccessibleObject],
            Value::LangString(_) => &[Literal, LangString, AccessibleObject],
            Value::NodeReference(_) => &[NodeReference, Identifiable, NodeType],
            Value::Node(_) => &[Node, AccessibleObject, NodeType],
            Value::NamedNode(_) => &[Node, NamedNode, Identifiable, AccessibleObject, NodeType],
        }
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Whether this value has every one of the capabilities. An empty set
    /// is satisfied by every value.
    pub fn has_all(&self, capabilities: &[Capability]) -> bool {
        capabilities.iter().all(|capability| self.has(*capability))
    }

    /// The identifier of a reference or named node
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Value::NodeReference(reference) => Some(reference.identifier()),
            Value::NamedNode(node) => Some(node.identifier()),
            _ => None,
        }
    }

    /// The relations of a node or named node
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            Value::NamedNode(node) => Some(node.node()),
            _ => None,
        }
    }

    /// Resolves the type of this value.
    ///
    /// A node has the identifier of its single `rdf:type` object; a literal
    /// has its datatype. References have no type.
    pub fn get_type(&self) -> NodeResult<String> {
        match self {
            Value::Literal(literal) => Ok(literal.datatype().to_string()),
            Value::LangString(lang_string) => Ok(lang_string.datatype().to_string()),
            Value::NodeReference(reference) => Err(NodeError::Missing(format!(
                "type of reference {}",
                reference.identifier()
            ))),
            Value::Node(node) => node.get_type(),
            Value::NamedNode(node) => node.get_type(),
        }
    }

    /// Tests whether this value fulfills a condition. An absent condition
    /// always matches.
    pub fn matches(&self, condition: Option<&Value>) -> bool {
        match self {
            Value::Literal(literal) => literal.matches(condition),
            Value::LangString(lang_string) => lang_string.matches(condition),
            Value::NodeReference(reference) => reference.matches(condition),
            Value::Node(node) => node.matches(condition),
            Value::NamedNode(node) => node.matches(condition),
        }
    }

    /// Textual leaf: the value of a literal or the IRI of a reference
    pub fn leaf(&self) -> Option<&str> {
        match self {
            Value::Literal(literal) => Some(literal.value()),
            Value::LangString(lang_string) => Some(lang_string.value()),
            Value::NodeReference(reference) => Some(reference.identifier()),
            Value::Node(_) | Value::NamedNode(_) => None,
        }
    }

    /// The lexical value of either kind of literal
    pub fn literal_value(&self) -> Option<&str> {
        match self {
            Value::Literal(literal) => Some(literal.value()),
            Value::LangString(lang_string) => Some(lang_string.value()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Literal(literal) => literal.fmt(f),
            Value::LangString(lang_string) => lang_string.fmt(f),
            Value::NodeReference(reference) => reference.fmt(f),
            Value::Node(node) => node.fmt(f),
            Value::NamedNode(node) => node.fmt(f),
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        Value::Literal(literal)
    }
}

impl From<LangString> for Value {
    fn from(lang_string: LangString) -> Self {
        Value::LangString(lang_string)
    }
}

impl From<NodeReference> for Value {
    fn from(reference: NodeReference) -> Self {
        Value::NodeReference(reference)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

impl From<NamedNode> for Value {
    fn from(node: NamedNode) -> Self {
        Value::NamedNode(node)
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        Value::Node(node.clone())
    }
}

impl From<&NamedNode> for Value {
    fn from(node: &NamedNode) -> Self {
        Value::NamedNode(node.clone())
    }
}
