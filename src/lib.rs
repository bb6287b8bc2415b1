//! ldgraph: an in-memory linked-data graph
//!
//! Nodes hold relations to literals, language-tagged strings, references
//! and other nodes, accessed through a typed multimap API. Lookups return a
//! [`QueryResult`] that is narrowed to the value kind the caller expects,
//! with strict rules for missing and ambiguous data. Graphs are written as
//! RDF or plain XML and read back from RDF.
//!
//! # Architecture
//!
//! - `vocab`: well-known terms, XML-Schema datatypes, prefix tables
//! - `model`: values, nodes and the list emulation on top of relations
//! - `result`: query results and their capability-based accessors
//! - `storage`: the factory callers create values through
//! - `rdf`: conversion to and from the RDF serializations and plain XML
//! - `config`: writer settings loadable from YAML
//!
//! ## Example Usage
//!
//! ```rust
//! use ldgraph::{MemoryStorage, Storage};
//!
//! let storage = MemoryStorage::new();
//! let book = storage
//!     .create_typed_named_node("http://example.org/moby-dick", "http://example.org/Book")
//!     .unwrap();
//! book.put_literal("http://purl.org/dc/terms/title", "Moby Dick");
//! book.add(storage.create_lang_string("Call me Ishmael.", "en").unwrap()).unwrap();
//!
//! let title = book.get("http://purl.org/dc/terms/title").literal().unwrap();
//! assert_eq!(title.value(), "Moby Dick");
//! assert_eq!(book.get_type().unwrap(), "http://example.org/Book");
//! assert_eq!(book.last(), Some(1));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod model;
pub mod rdf;
pub mod result;
pub mod storage;
pub mod vocab;

// Re-export main types for convenience
pub use model::{
    AnyLiteral, Capability, LangString, Literal, NamedNode, Node, NodeError, NodeReference,
    NodeResult, Value, ANY_RELATION,
};

pub use result::{ExpectationFault, LinkedDataError, LinkedDataResult, QueryResult};

pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};

pub use rdf::{
    ParseError, ParseResult, RdfFormat, RdfWriter, Recursion, SerializeError, SerializeResult,
};

pub use config::{ConfigError, ConfigResult, WriterConfig};

pub use vocab::{Namespaces, PrefixError, XmlSchema};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
