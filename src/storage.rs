//! Creation of graph values
//!
//! [`Storage`] is the narrow contract through which callers mint nodes and
//! values. [`MemoryStorage`] keeps everything in process memory and
//! validates identifiers as absolute IRIs.

use oxiri::Iri;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::model::{is_valid_language, LangString, Literal, NamedNode, Node, NodeReference, Value};
use crate::result::QueryResult;
use crate::vocab::rdf;

/// Storage errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Identifier, reference or type is not an absolute IRI
    #[error("Invalid IRI: {0:?}")]
    InvalidIri(String),

    /// Datatype reserved for language-tagged strings
    #[error("Datatype {0:?} requires a language, create a lang string instead")]
    InvalidDatatype(String),

    /// Language is empty or malformed
    #[error("Invalid language: {0:?}")]
    InvalidLanguage(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

fn check_iri(iri: &str) -> StorageResult<()> {
    match Iri::parse(iri) {
        Ok(_) => Ok(()),
        Err(e) => {
            debug!("Rejected IRI {:?}: {}", iri, e);
            Err(StorageError::InvalidIri(iri.to_string()))
        }
    }
}

/// Factory for nodes and values
pub trait Storage {
    /// Create an empty anonymous node
    fn create_node(&self) -> Node {
        Node::new()
    }

    /// Create an anonymous node with an `rdf:type`
    fn create_typed_node(&self, rdf_type: &str) -> StorageResult<Node> {
        check_iri(rdf_type)?;
        Ok(Node::with_type(rdf_type))
    }

    fn create_named_node(&self, identifier: &str) -> StorageResult<NamedNode> {
        check_iri(identifier)?;
        Ok(NamedNode::new(identifier))
    }

    fn create_typed_named_node(&self, identifier: &str, rdf_type: &str) -> StorageResult<NamedNode> {
        check_iri(identifier)?;
        check_iri(rdf_type)?;
        Ok(NamedNode::with_type(identifier, rdf_type))
    }

    /// Create a plain literal
    fn create_literal(&self, value: &str) -> Literal {
        Literal::plain(value)
    }

    /// Create a typed literal. An empty datatype yields a plain literal.
    fn create_typed_literal(&self, value: &str, datatype: &str) -> StorageResult<Literal> {
        if datatype == rdf::LANG_STRING {
            return Err(StorageError::InvalidDatatype(datatype.to_string()));
        }
        if !datatype.is_empty() {
            check_iri(datatype)?;
        }
        Ok(Literal::new(value, datatype))
    }

    fn create_lang_string(&self, value: &str, language: &str) -> StorageResult<LangString> {
        if !is_valid_language(language) {
            return Err(StorageError::InvalidLanguage(language.to_string()));
        }
        Ok(LangString::new(value, language))
    }

    fn create_node_reference(&self, identifier: &str) -> StorageResult<NodeReference> {
        check_iri(identifier)?;
        Ok(NodeReference::new(identifier))
    }

    fn create_result(&self) -> QueryResult {
        QueryResult::new()
    }

    /// Whether text should be read as a URI rather than as a literal
    fn looks_like_uri(&self, text: &str) -> bool;

    /// Create the natural leaf for a piece of text: a reference if the text
    /// looks like a URI, else a language-tagged string if a language is
    /// given, else a plain literal.
    fn create_leaf(&self, value: &str, language: Option<&str>) -> StorageResult<Value> {
        if self.looks_like_uri(value) {
            if let Ok(reference) = self.create_node_reference(value) {
                return Ok(Value::NodeReference(reference));
            }
        }
        match language.filter(|language| !language.is_empty()) {
            Some(language) => Ok(Value::LangString(self.create_lang_string(value, language)?)),
            None => Ok(Value::Literal(self.create_literal(value))),
        }
    }
}

/// In-memory storage
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    uri_scheme: Regex,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            uri_scheme: Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$").unwrap(),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn looks_like_uri(&self, text: &str) -> bool {
        self.uri_scheme.is_match(text)
    }
}
