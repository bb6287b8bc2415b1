//! Node: the mutable graph vertex
//!
//! A node maps relation IRIs to insertion-ordered sequences of values.
//! A relation may link the same value twice, and a relation whose last value
//! is removed disappears from the map.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use super::{Literal, NodeError, NodeReference, NodeResult, Value};
use crate::result::QueryResult;
use crate::vocab::rdf;

/// Wildcard accepted by the lookup operations in place of a relation,
/// meaning "any relation"
pub const ANY_RELATION: &str = "*";

pub(crate) type Relations = IndexMap<String, Vec<Value>>;

/// A graph vertex holding a relation multimap
///
/// `Node` is a handle: clones share the same vertex, so a change made
/// through one handle is seen through all others. Equality holds for two
/// handles of the same vertex, or for two vertices with equal relations.
///
/// The graph keeps no parent pointers. Reference cycles are allowed but
/// keep their vertices alive, and structural operations such as equality
/// or [`Display`](fmt::Display) do not terminate on them.
#[derive(Clone, Default)]
pub struct Node {
    inner: Arc<RwLock<Relations>>,
}

impl Node {
    /// Create an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node with an `rdf:type` reference
    pub fn with_type(rdf_type: impl Into<String>) -> Self {
        let node = Self::new();
        node.put(rdf::TYPE, NodeReference::new(rdf_type));
        node
    }

    /// Whether both handles refer to the same vertex
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Relations> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Relations> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn address(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }

    /// All values of a relation, or of every relation for [`ANY_RELATION`]
    pub fn get(&self, relation: &str) -> QueryResult {
        if relation == ANY_RELATION {
            return self.read().values().flatten().cloned().collect();
        }
        self.read()
            .get(relation)
            .map(|values| values.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Values of a relation whose type is `type_filter`
    pub fn get_typed(&self, relation: &str, type_filter: &str) -> QueryResult {
        self.get(relation)
            .into_iter()
            .filter(|value| value.get_type().is_ok_and(|t| t == type_filter))
            .collect()
    }

    /// Values of a relation that themselves link `id_value` via
    /// `id_relation`, as literal text or reference IRI
    pub fn get_identified(&self, relation: &str, id_relation: &str, id_value: &str) -> QueryResult {
        self.get(relation)
            .into_iter()
            .filter(|value| {
                value
                    .as_node()
                    .is_some_and(|node| node.get(id_relation).leaves().contains(id_value))
            })
            .collect()
    }

    /// Values of a relation that fulfill a condition
    pub fn get_matching(&self, relation: &str, condition: Option<&Value>) -> QueryResult {
        self.get(relation)
            .into_iter()
            .filter(|value| value.matches(condition))
            .collect()
    }

    /// Direct children, linked by any relation, carrying `rdf_type` among
    /// their types
    pub fn get_by_type(&self, rdf_type: &str) -> QueryResult {
        self.child_nodes()
            .filter(|value| value.as_node().is_some_and(|node| node.has_type(rdf_type)))
            .collect()
    }

    /// Direct children of type `rdf_type` whose `id_relation` holds the
    /// text `id_value`
    pub fn get_by_type_with_id(&self, rdf_type: &str, id_relation: &str, id_value: &str) -> QueryResult {
        self.child_nodes()
            .filter(|value| {
                value.as_node().is_some_and(|node| {
                    node.has_type(rdf_type) && node.get(id_relation).strings().contains(id_value)
                })
            })
            .collect()
    }

    /// Finds the one value in the graph below this node that carries the
    /// identifier, a named node or else a reference.
    ///
    /// Returns [`NodeError::Missing`] if there is none and
    /// [`NodeError::Ambiguous`] if two distinct named nodes carry it.
    pub fn get_by_identifier(&self, identifier: &str) -> NodeResult<Value> {
        let mut visited = HashSet::new();
        visited.insert(self.address());
        let mut named = Vec::new();
        let mut reference = None;
        let mut pending = self.snapshot();
        while let Some(value) = pending.pop() {
            if let Value::NodeReference(r) = &value {
                if r.identifier() == identifier && reference.is_none() {
                    reference = Some(value.clone());
                }
                continue;
            }
            let Some(node) = value.as_node() else {
                continue;
            };
            if !visited.insert(node.address()) {
                continue;
            }
            pending.extend(node.snapshot());
            if value.identifier() == Some(identifier) {
                named.push(value.clone());
            }
        }
        match named.len() {
            0 => reference.ok_or_else(|| NodeError::Missing(format!("node {}", identifier))),
            1 => Ok(named.remove(0)),
            n => Err(NodeError::Ambiguous(format!(
                "{} distinct nodes are identified by {}",
                n, identifier
            ))),
        }
    }

    /// The identifier of the one `rdf:type` of this node
    pub fn get_type(&self) -> NodeResult<String> {
        let relations = self.read();
        let types = relations.get(rdf::TYPE).map(Vec::as_slice).unwrap_or_default();
        match types {
            [] => Err(NodeError::Missing("rdf:type".to_string())),
            [single] => single
                .identifier()
                .map(str::to_string)
                .ok_or_else(|| NodeError::Missing("identifiable rdf:type".to_string())),
            several => Err(NodeError::Ambiguous(format!(
                "node has {} rdf:type relations",
                several.len()
            ))),
        }
    }

    /// Identifiers of all `rdf:type` objects
    pub fn types(&self) -> Vec<String> {
        self.read()
            .get(rdf::TYPE)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|value| value.identifier().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_type(&self, rdf_type: &str) -> bool {
        self.read().get(rdf::TYPE).is_some_and(|values| {
            values.iter().any(|value| value.identifier() == Some(rdf_type))
        })
    }

    /// Relation IRIs in insertion order
    pub fn relations(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Snapshot of the full relation map
    pub fn entries(&self) -> Vec<(String, Vec<Value>)> {
        self.read()
            .iter()
            .map(|(relation, values)| (relation.clone(), values.clone()))
            .collect()
    }

    pub fn contains_key(&self, relation: &str) -> bool {
        self.read().contains_key(relation)
    }

    /// Whether any relation links the value
    pub fn contains(&self, value: &Value) -> bool {
        self.snapshot().iter().any(|candidate| candidate == value)
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Number of relations
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Number of linked values over all relations, saturating
    pub fn size(&self) -> usize {
        self.read()
            .values()
            .fold(0usize, |total, values| total.saturating_add(values.len()))
    }

    /// Node-shaped children over all relations. Literals and references are
    /// skipped; use [`Node::get`] for those.
    pub fn iter(&self) -> impl Iterator<Item = Value> {
        self.child_nodes()
    }

    fn child_nodes(&self) -> impl Iterator<Item = Value> {
        self.snapshot()
            .into_iter()
            .filter(|value| value.has(super::Capability::Node))
    }

    pub(crate) fn snapshot(&self) -> Vec<Value> {
        self.read().values().flatten().cloned().collect()
    }

    /// Links a value, keeping what the relation already links
    pub fn put(&self, relation: impl Into<String>, value: impl Into<Value>) -> &Self {
        self.write()
            .entry(relation.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Links a fresh plain literal
    pub fn put_literal(&self, relation: impl Into<String>, text: impl Into<String>) -> &Self {
        self.put(relation, Literal::plain(text))
    }

    /// Links a reference
    pub fn put_reference(&self, relation: impl Into<String>, identifier: impl Into<String>) -> &Self {
        self.put(relation, NodeReference::new(identifier))
    }

    pub fn put_all<I>(&self, relation: impl Into<String>, values: I) -> &Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut values = values.into_iter().map(Into::into).peekable();
        if values.peek().is_some() {
            self.write().entry(relation.into()).or_default().extend(values);
        }
        self
    }

    /// Builder form of [`Node::put`]
    pub fn with(self, relation: impl Into<String>, value: impl Into<Value>) -> Self {
        self.put(relation, value);
        self
    }

    /// Replaces everything a relation links, returning the previous values.
    /// An empty replacement removes the relation.
    pub fn replace<I>(&self, relation: &str, values: I) -> Vec<Value>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let mut relations = self.write();
        if values.is_empty() {
            relations.shift_remove(relation).unwrap_or_default()
        } else {
            relations
                .insert(relation.to_string(), values)
                .unwrap_or_default()
        }
    }

    /// Removes the first occurrence of the value from every relation
    /// linking it. Returns whether anything was removed.
    pub fn remove(&self, value: &Value) -> bool {
        let hits: Vec<(String, usize)> = self
            .read()
            .iter()
            .filter_map(|(relation, values)| {
                values
                    .iter()
                    .position(|candidate| candidate == value)
                    .map(|position| (relation.clone(), position))
            })
            .collect();
        if hits.is_empty() {
            return false;
        }
        let mut relations = self.write();
        for (relation, position) in hits {
            remove_at(&mut relations, &relation, position);
        }
        true
    }

    /// Removes a relation with all its values
    pub fn remove_relation(&self, relation: &str) -> Vec<Value> {
        self.write().shift_remove(relation).unwrap_or_default()
    }

    /// Tests this node against a condition node: each relation of the
    /// condition must be present here, and each of its values must be
    /// matched by a distinct value of that relation. [`ANY_RELATION`] in the
    /// condition matches values of any relation.
    pub fn matches(&self, condition: Option<&Value>) -> bool {
        let condition = match condition {
            None => return true,
            Some(condition) => match condition.as_node() {
                Some(node) => node,
                None => return false,
            },
        };
        if condition.ptr_eq(self) {
            return true;
        }
        for (relation, wanted) in condition.entries() {
            let candidates = if relation == ANY_RELATION {
                self.snapshot()
            } else {
                match self.read().get(&relation) {
                    Some(values) => values.clone(),
                    None => return false,
                }
            };
            let mut open = wanted;
            for candidate in candidates {
                if open.is_empty() {
                    break;
                }
                if candidate.has(super::Capability::AccessibleObject) {
                    open.retain(|wanted| !candidate.matches(Some(wanted)));
                } else if let Some(position) = open
                    .iter()
                    .position(|wanted| candidate.matches(Some(wanted)))
                {
                    open.remove(position);
                }
            }
            if !open.is_empty() {
                return false;
            }
        }
        true
    }

    /// Whether this node, used as a condition, describes a literal: it may
    /// only link `rdf:type` to the datatype and `rdf:value` to the value.
    pub(crate) fn describes_literal(&self, datatype: &str, value: &str) -> bool {
        self.read().iter().all(|(relation, objects)| match relation.as_str() {
            rdf::TYPE => objects.iter().all(|o| o.identifier() == Some(datatype)),
            rdf::VALUE => objects.iter().all(|o| o.literal_value() == Some(value)),
            _ => false,
        })
    }

    pub(crate) fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let mut attributes = BTreeMap::new();
        let mut elements = BTreeMap::new();
        for (relation, values) in self.entries() {
            match rdf::sequence_number_of(&relation) {
                Some(index) => {
                    elements.insert(index, (relation, values));
                }
                None => {
                    attributes.insert(relation.clone(), (relation, values));
                }
            }
        }
        for (relation, values) in attributes.into_values().chain(elements.into_values()) {
            for value in values {
                write!(f, "{:indent$}{}", "", relation, indent = indent)?;
                match &value {
                    Value::Node(node) => {
                        writeln!(f, " {{")?;
                        node.fmt_indented(f, indent + 2)?;
                        writeln!(f, "{:indent$}}}", "", indent = indent)?;
                    }
                    Value::NamedNode(node) => {
                        writeln!(f, " {{")?;
                        writeln!(f, "{:indent$}[{}]", "", node.identifier(), indent = indent + 2)?;
                        node.node().fmt_indented(f, indent + 2)?;
                        writeln!(f, "{:indent$}}}", "", indent = indent)?;
                    }
                    other => writeln!(f, " = {}", other)?,
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn remove_at(relations: &mut Relations, relation: &str, position: usize) -> Option<Value> {
    let values = relations.get_mut(relation)?;
    if position >= values.len() {
        return None;
    }
    let removed = values.remove(position);
    if values.is_empty() {
        relations.shift_remove(relation);
    }
    Some(removed)
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.read() == *other.read()
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("relations", &*self.read())
            .finish()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LangString, NamedNode};

    const TITLE: &str = "http://example.org/title";
    const AUTHOR: &str = "http://example.org/author";

    #[test]
    fn test_put_is_additive() {
        let node = Node::new();
        let a = Value::from(Literal::plain("a"));
        let b = Value::from(Literal::plain("b"));

        node.put(TITLE, a.clone()).put(TITLE, b.clone());

        let values: Vec<Value> = node.get(TITLE).into_iter().collect();
        assert_eq!(values.len(), 2);
        assert!(values.contains(&a));
        assert!(values.contains(&b));
        assert!(node.contains_key(TITLE));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let node = Node::new();
        node.put_literal(TITLE, "same").put_literal(TITLE, "same");

        assert_eq!(node.get(TITLE).len(), 2);
        assert_eq!(node.size(), 2);
    }

    #[test]
    fn test_remove_prunes_empty_relation() {
        let node = Node::new();
        let a = Value::from(Literal::plain("a"));
        node.put(TITLE, a.clone());

        assert!(node.remove(&a));
        assert!(!node.contains_key(TITLE));
        assert!(node.is_empty());
        assert!(!node.remove(&a));
    }

    #[test]
    fn test_remove_takes_one_occurrence_per_relation() {
        let node = Node::new();
        let a = Value::from(Literal::plain("a"));
        node.put(TITLE, a.clone()).put(TITLE, a.clone()).put(AUTHOR, a.clone());

        assert!(node.remove(&a));
        assert_eq!(node.get(TITLE).len(), 1);
        assert!(!node.contains_key(AUTHOR));
    }

    #[test]
    fn test_replace_returns_previous() {
        let node = Node::new();
        node.put_literal(TITLE, "old");

        let previous = node.replace(TITLE, [Literal::plain("new")]);
        assert_eq!(previous, vec![Value::from(Literal::plain("old"))]);
        assert_eq!(node.get(TITLE).strings_joined(""), "new");

        let previous = node.replace(TITLE, Vec::<Value>::new());
        assert_eq!(previous.len(), 1);
        assert!(!node.contains_key(TITLE));
    }

    #[test]
    fn test_get_any_relation() {
        let node = Node::new();
        node.put_literal(TITLE, "t").put_literal(AUTHOR, "a");

        assert_eq!(node.get(ANY_RELATION).len(), 2);
        assert!(node.get("http://example.org/missing").is_empty());
    }

    #[test]
    fn test_get_type() {
        let node = Node::new();
        assert!(matches!(node.get_type(), Err(NodeError::Missing(_))));

        node.put_reference(rdf::TYPE, "http://example.org/Book");
        assert_eq!(node.get_type().unwrap(), "http://example.org/Book");

        node.put_reference(rdf::TYPE, "http://example.org/Work");
        assert!(matches!(node.get_type(), Err(NodeError::Ambiguous(_))));
        assert!(node.has_type("http://example.org/Work"));
        assert_eq!(node.types().len(), 2);
    }

    #[test]
    fn test_get_by_type() {
        let node = Node::new();
        let mods = NamedNode::with_type("http://localhost/test/nodeID", "http://www.loc.gov/mods/v3#mods");
        node.put_literal(TITLE, "javac.exe")
            .put_reference(AUTHOR, "https://www.kitodo.org/")
            .put("http://www.loc.gov/METS/type", mods.clone());

        let found = node.get_by_type("http://www.loc.gov/mods/v3#mods");
        assert_eq!(found.len(), 1);
        assert_eq!(found.named_node().unwrap(), mods);
        assert!(node.get_by_type("http://example.org/None").is_empty());
    }

    #[test]
    fn test_get_by_type_with_id() {
        let node = Node::new();
        let first = Node::with_type("http://example.org/Div");
        first.put_literal("http://example.org/id", "d1");
        let second = Node::with_type("http://example.org/Div");
        second.put_literal("http://example.org/id", "d2");
        node.put(AUTHOR, first.clone()).put(AUTHOR, second);

        let found = node.get_by_type_with_id("http://example.org/Div", "http://example.org/id", "d1");
        assert_eq!(found.node().unwrap(), first);
    }

    #[test]
    fn test_get_by_identifier() {
        let node = Node::new();
        let mods = NamedNode::new("http://localhost/test/nodeID");
        let kitodo = NodeReference::new("https://www.kitodo.org/");
        node.put(TITLE, mods.clone()).put(AUTHOR, kitodo.clone());

        assert_eq!(
            node.get_by_identifier("http://localhost/test/nodeID").unwrap(),
            Value::from(mods)
        );
        assert_eq!(
            node.get_by_identifier("https://www.kitodo.org/").unwrap(),
            Value::from(kitodo)
        );
        assert!(matches!(
            node.get_by_identifier("http://example.org/none"),
            Err(NodeError::Missing(_))
        ));
    }

    #[test]
    fn test_get_by_identifier_searches_whole_graph() {
        let root = Node::new();
        let middle = Node::new();
        let deep = NamedNode::new("http://example.org/deep");
        middle.put(TITLE, deep.clone());
        root.put(AUTHOR, middle);

        assert_eq!(
            root.get_by_identifier("http://example.org/deep").unwrap(),
            Value::from(deep)
        );
    }

    #[test]
    fn test_get_by_identifier_ambiguous() {
        let root = Node::new();
        root.put(TITLE, NamedNode::new("X")).put(AUTHOR, NamedNode::new("X"));

        assert!(matches!(
            root.get_by_identifier("X"),
            Err(NodeError::Ambiguous(_))
        ));
    }

    #[test]
    fn test_get_by_identifier_shared_node_counts_once() {
        let root = Node::new();
        let shared = NamedNode::new("X");
        root.put(TITLE, shared.clone()).put(AUTHOR, shared.clone());

        assert!(root.get_by_identifier("X").is_ok());
    }

    #[test]
    fn test_get_identified() {
        let node = Node::new();
        let child = Node::new();
        child.put_literal("http://example.org/id", "LOG_0001");
        node.put(AUTHOR, child.clone()).put(AUTHOR, Node::new());

        let found = node.get_identified(AUTHOR, "http://example.org/id", "LOG_0001");
        assert_eq!(found.len(), 1);
        assert!(found.node().unwrap().ptr_eq(&child));
    }

    #[test]
    fn test_matches() {
        let node = Node::new();
        node.put_literal(TITLE, "Moby Dick")
            .put(AUTHOR, LangString::new("Herman Melville", "en"))
            .put_reference(rdf::TYPE, "http://example.org/Book");

        assert!(node.matches(None));

        let condition = Node::new();
        condition.put_literal(TITLE, "Moby Dick");
        assert!(node.matches(Some(&Value::from(condition.clone()))));

        condition.put_reference(rdf::TYPE, "http://example.org/Book");
        assert!(node.matches(Some(&Value::from(condition.clone()))));

        condition.put_literal(TITLE, "Typee");
        assert!(!node.matches(Some(&Value::from(condition))));

        let any = Node::new();
        any.put(ANY_RELATION, Literal::plain("Moby Dick"));
        assert!(node.matches(Some(&Value::from(any))));

        assert!(!node.matches(Some(&Value::from(Literal::plain("Moby Dick")))));
    }

    #[test]
    fn test_iter_skips_literals() {
        let node = Node::new();
        node.put_literal(TITLE, "t")
            .put(AUTHOR, Node::new())
            .put(AUTHOR, NamedNode::new("http://example.org/a"))
            .put_reference(AUTHOR, "http://example.org/b");

        assert_eq!(node.iter().count(), 2);
    }

    #[test]
    fn test_structural_equality() {
        let a = Node::new();
        a.put_literal(TITLE, "x");
        let b = Node::new();
        b.put_literal(TITLE, "x");

        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));

        b.put_literal(AUTHOR, "y");
        assert_ne!(a, b);
    }

    #[test]
    fn test_shared_handle() {
        let a = Node::new();
        let b = a.clone();
        b.put_literal(TITLE, "x");

        assert!(a.contains_key(TITLE));
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn test_display() {
        let node = Node::with_type("http://example.org/Book");
        node.put_literal(TITLE, "Moby Dick");
        let shown = node.to_string();

        assert!(shown.contains("http://example.org/title = \"Moby Dick\""));
        assert!(shown.contains(&format!("{} = <http://example.org/Book>", rdf::TYPE)));
    }
}
