//! Fixed vocabulary of the graph model
//!
//! Well-known terms of the rdf: and rdf-schema: namespaces, the XML-Schema
//! datatype table and prefix handling for compact IRI notation.

pub mod namespace;
pub mod rdf;
pub mod rdfs;
pub mod xsd;

pub use namespace::{Namespaces, PrefixError, PrefixResult};
pub use xsd::XmlSchema;
