//! Terms of the RDF syntax namespace
//!
//! The container membership properties `rdf:_1`, `rdf:_2`, ... are used by
//! [`Node`](crate::model::Node) to emulate an ordered list on top of its
//! relation multimap.

/// The RDF syntax namespace
pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Prefix of the container membership properties. Appending a decimal
/// number yields the relation of a list index.
pub const SEQ_NO_PREFIX: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#_";

/// The lowest list index
pub const FIRST_INDEX: u64 = 1;

pub const ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";
pub const ALT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Alt";
pub const BAG: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Bag";
pub const DATATYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#datatype";
pub const DESCRIPTION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Description";
pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
pub const HTML: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#HTML";
pub const ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ID";
pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
pub const LI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#li";
pub const LIST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#List";
pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
pub const NODE_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nodeID";
pub const OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";
pub const PARSE_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#parseType";
pub const PLAIN_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#PlainLiteral";
pub const PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
pub const PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF";
pub const RESOURCE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#resource";
pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
pub const SEQ: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Seq";
pub const STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";
pub const SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";
pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
pub const XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";

/// Returns the relation addressing list index `index`.
pub fn index_relation(index: u64) -> String {
    format!("{}{}", SEQ_NO_PREFIX, index)
}

/// Returns the list index a relation addresses, if it is a container
/// membership property with an index of at least [`FIRST_INDEX`].
///
/// ```
/// use ldgraph::vocab::rdf;
///
/// assert_eq!(rdf::sequence_number_of("http://www.w3.org/1999/02/22-rdf-syntax-ns#_3"), Some(3));
/// assert_eq!(rdf::sequence_number_of(rdf::TYPE), None);
/// ```
pub fn sequence_number_of(relation: &str) -> Option<u64> {
    index_digits(relation)?
        .parse::<u64>()
        .ok()
        .filter(|index| *index >= FIRST_INDEX)
}

/// The decimal suffix of an index relation in canonical form, as produced
/// by [`index_relation`]. Leading zeros are not canonical: `rdf:_01` is an
/// ordinary relation, not a list index.
pub(crate) fn index_digits(relation: &str) -> Option<&str> {
    let digits = relation.strip_prefix(SEQ_NO_PREFIX)?;
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    canonical.then_some(digits)
}

/// Whether the relation is a container membership property.
pub fn is_index_relation(relation: &str) -> bool {
    relation.starts_with(SEQ_NO_PREFIX)
}
