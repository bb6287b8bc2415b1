//! Linked-data value model
//!
//! A [`Value`] is exactly one of five variants:
//!
//! - [`Literal`]: a scalar with an optional datatype
//! - [`LangString`]: a scalar with a language instead of a datatype
//! - [`NodeReference`]: an opaque IRI
//! - [`Node`]: an anonymous vertex holding a relation multimap
//! - [`NamedNode`]: a vertex that also carries an IRI
//!
//! Nodes are shared handles. Cloning a [`Node`] yields another handle to
//! the same vertex, so a vertex can be linked from several parents.

mod literal;
mod named;
mod node;
mod reference;
mod sequence;
mod unordered;
mod value;

pub use literal::{AnyLiteral, LangString, Literal};
pub(crate) use literal::is_valid_language;
pub use named::NamedNode;
pub use node::{Node, ANY_RELATION};
pub use reference::NodeReference;
pub use value::{Capability, Value};

use thiserror::Error;

/// Structural faults of node accessors
///
/// These indicate a graph that does not have the shape the caller assumed.
/// Check with [`Node::has_type`] or [`Node::contains_key`] first when the
/// shape is not known.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// Exactly one was required, none was found
    #[error("Missing: {0}")]
    Missing(String),

    /// Exactly one was required, several were found
    #[error("Ambiguous: {0}")]
    Ambiguous(String),

    /// Relation is not a list index relation
    #[error("Not an index: {0}")]
    NotAnIndex(String),

    /// Index below the first list index
    #[error("Index out of range: {0}")]
    IndexOutOfRange(u64),

    /// Index does not fit the index space
    #[error("Index not representable: {0}")]
    NotRepresentable(String),
}

pub type NodeResult<T> = Result<T, NodeError>;
