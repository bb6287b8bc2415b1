//! RDF import and export of node graphs
//!
//! A node graph is written as triples in one of the RDF serializations, or
//! as a plain XML document in which the list emulation becomes document
//! order. The RDF serializations can also be read back into a node graph.
//!
//! # Example
//!
//! ```rust
//! use ldgraph::model::{Literal, NamedNode, Value};
//! use ldgraph::rdf::{self, RdfFormat};
//! use ldgraph::vocab::Namespaces;
//!
//! let book = NamedNode::with_type("http://example.org/book/1", "http://example.org/Book");
//! book.put("http://purl.org/dc/terms/title", Literal::plain("Moby Dick"));
//!
//! let turtle = rdf::write(&Value::from(&book), &Namespaces::new(), Vec::new(), RdfFormat::Turtle).unwrap();
//! let roots = rdf::read(turtle.as_slice(), RdfFormat::Turtle).unwrap();
//! assert_eq!(roots.named_node().unwrap().identifier(), "http://example.org/book/1");
//! ```

mod convert;
mod serialization;

pub use serialization::{
    read, read_str, write, write_file, ParseError, ParseResult, RdfFormat, RdfWriter, Recursion,
    SerializeError, SerializeResult,
};
