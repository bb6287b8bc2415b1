//! Conversion between node graphs and RDF triples

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use oxrdf::{BlankNode, Literal as RdfLiteral, NamedNode as RdfNamedNode, Subject, Term, Triple};
use tracing::warn;

use super::serialization::{Recursion, SerializeError, SerializeResult};
use crate::model::{LangString, Literal, NamedNode, Node, NodeReference, Value};
use crate::result::QueryResult;
use crate::vocab::xsd;

/// Converts the graph reachable from `root` into triples.
///
/// The triples of one subject are kept together, with a subject placed
/// before the subjects it links to.
pub(crate) fn to_triples(root: &Value, recursion: Recursion) -> SerializeResult<Vec<Triple>> {
    let mut collector = TripleCollector::default();
    collector.convert(root, recursion)?;
    Ok(collector.triples)
}

#[derive(Default)]
struct TripleCollector {
    triples: Vec<Triple>,
    /// Node address → blank node label
    blank_nodes: HashMap<usize, BlankNode>,
    /// Named nodes whose relations were already written
    expanded: HashSet<String>,
}

impl TripleCollector {
    fn convert(&mut self, value: &Value, recursion: Recursion) -> SerializeResult<Term> {
        match value {
            Value::Literal(literal) => Ok(Term::Literal(to_literal(literal)?)),
            Value::LangString(lang_string) => Ok(Term::Literal(to_lang_literal(lang_string)?)),
            Value::NodeReference(reference) => {
                Ok(Term::NamedNode(to_named_node(reference.identifier())?))
            }
            Value::Node(node) => {
                let address = node.address();
                if let Some(blank) = self.blank_nodes.get(&address) {
                    return Ok(Term::BlankNode(blank.clone()));
                }
                let blank = BlankNode::new(format!("n{}", self.blank_nodes.len()))
                    .map_err(|e| SerializeError::Serialize(e.to_string()))?;
                self.blank_nodes.insert(address, blank.clone());
                self.expand(Subject::BlankNode(blank.clone()), node, recursion.for_children())?;
                Ok(Term::BlankNode(blank))
            }
            Value::NamedNode(node) => {
                let iri = to_named_node(node.identifier())?;
                if recursion != Recursion::Never && self.expanded.insert(node.identifier().to_string()) {
                    self.expand(Subject::NamedNode(iri.clone()), node.node(), recursion.for_children())?;
                }
                Ok(Term::NamedNode(iri))
            }
        }
    }

    fn expand(&mut self, subject: Subject, node: &Node, recursion: Recursion) -> SerializeResult<()> {
        let position = self.triples.len();
        let mut own = Vec::new();
        for (relation, values) in node.entries() {
            let predicate = to_named_node(&relation)?;
            for value in &values {
                let object = self.convert(value, recursion)?;
                own.push(Triple::new(subject.clone(), predicate.clone(), object));
            }
        }
        let children = self.triples.split_off(position);
        self.triples.extend(own);
        self.triples.extend(children);
        Ok(())
    }
}

fn to_named_node(iri: &str) -> SerializeResult<RdfNamedNode> {
    RdfNamedNode::new(iri).map_err(|e| SerializeError::InvalidIri(format!("{}: {}", iri, e)))
}

fn to_literal(literal: &Literal) -> SerializeResult<RdfLiteral> {
    if literal.is_plain() {
        return Ok(RdfLiteral::new_simple_literal(literal.value()));
    }
    Ok(RdfLiteral::new_typed_literal(
        literal.value(),
        to_named_node(literal.datatype())?,
    ))
}

fn to_lang_literal(lang_string: &LangString) -> SerializeResult<RdfLiteral> {
    RdfLiteral::new_language_tagged_literal(lang_string.value(), lang_string.language_tag())
        .map_err(|e| SerializeError::InvalidLiteral(format!("{}: {}", lang_string, e)))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SubjectKey {
    Iri(String),
    Blank(String),
}

/// Rebuilds a node graph from triples.
///
/// IRI subjects become named nodes shared by every triple that links to
/// them, blank nodes become anonymous nodes. IRIs that are never a subject
/// become references. The result holds the subjects never used as an
/// object; a graph in which every subject is linked returns its first
/// subject.
pub(crate) fn to_graph(triples: &[Triple]) -> QueryResult {
    let mut subjects: IndexMap<SubjectKey, Value> = IndexMap::new();
    for triple in triples {
        match &triple.subject {
            Subject::NamedNode(iri) => {
                subjects
                    .entry(SubjectKey::Iri(iri.as_str().to_string()))
                    .or_insert_with(|| Value::NamedNode(NamedNode::new(iri.as_str())));
            }
            Subject::BlankNode(blank) => {
                subjects
                    .entry(SubjectKey::Blank(blank.as_str().to_string()))
                    .or_insert_with(|| Value::Node(Node::new()));
            }
            #[allow(unreachable_patterns)]
            _ => warn!("Skipping quoted triple subject"),
        }
    }

    let mut objects = HashSet::new();
    let mut blank_objects: HashMap<String, Node> = HashMap::new();
    for triple in triples {
        let key = match &triple.subject {
            Subject::NamedNode(iri) => SubjectKey::Iri(iri.as_str().to_string()),
            Subject::BlankNode(blank) => SubjectKey::Blank(blank.as_str().to_string()),
            #[allow(unreachable_patterns)]
            _ => continue,
        };
        let Some(node) = subjects.get(&key).and_then(Value::as_node).cloned() else {
            continue;
        };

        let object = match &triple.object {
            Term::NamedNode(iri) => {
                let key = SubjectKey::Iri(iri.as_str().to_string());
                match subjects.get(&key) {
                    Some(value) => {
                        objects.insert(key);
                        value.clone()
                    }
                    None => Value::NodeReference(NodeReference::new(iri.as_str())),
                }
            }
            Term::BlankNode(blank) => {
                let key = SubjectKey::Blank(blank.as_str().to_string());
                let value = match subjects.get(&key) {
                    Some(value) => value.clone(),
                    None => Value::Node(
                        blank_objects
                            .entry(blank.as_str().to_string())
                            .or_default()
                            .clone(),
                    ),
                };
                objects.insert(key);
                value
            }
            Term::Literal(literal) => from_literal(literal),
            #[allow(unreachable_patterns)]
            _ => {
                warn!("Skipping quoted triple object");
                continue;
            }
        };
        node.put(triple.predicate.as_str(), object);
    }

    let roots: QueryResult = subjects
        .iter()
        .filter(|(key, _)| !objects.contains(*key))
        .map(|(_, value)| value.clone())
        .collect();
    if roots.is_empty() {
        return subjects.values().take(1).cloned().collect();
    }
    roots
}

fn from_literal(literal: &RdfLiteral) -> Value {
    if let Some(language) = literal.language() {
        return Value::LangString(LangString::new(literal.value(), language));
    }
    let datatype = literal.datatype();
    if datatype.as_str() == xsd::XmlSchema::String.iri() {
        Value::Literal(Literal::plain(literal.value()))
    } else {
        Value::Literal(Literal::new(literal.value(), datatype.as_str()))
    }
}
