//! Typed views over lookup results
//!
//! A [`QueryResult`] holds the values a lookup produced. Accessors select
//! values by [`Capability`] and enforce multiplicity:
//!
//! - `node()`, `literal()`, `value()`, ... return a [`LinkedDataError`]
//!   when there is no match or the match is not unique
//! - `node_expectable()`, ... panic instead, for call sites that checked
//!   `is_unique_node()` before
//! - `node_or_else(default)`, ... fall back to a default
//!
//! A result is unique for a capability only if it holds exactly one match
//! *and* exactly one value overall. One literal next to one node is not a
//! unique literal, because the lookup itself was ambiguous.

use std::collections::HashSet;

use rayon::prelude::*;
use thiserror::Error;

use crate::model::{AnyLiteral, Capability, LangString, NamedNode, Node, NodeReference, Value};

/// Recoverable lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkedDataError {
    /// No value of the requested kind
    #[error("No data: no {0} in result")]
    NoData(String),

    /// More than one value where one was requested
    #[error("Ambiguous data: {0}")]
    AmbiguousData(String),
}

pub type LinkedDataResult<T> = Result<T, LinkedDataError>;

/// Violated expectation of an `_expectable` accessor, used as panic message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpectationFault {
    #[error("Not found: expected exactly one {0}, found none")]
    NotFound(String),

    #[error("Too many: expected exactly one {0}, found {1} values")]
    TooMany(String, usize),
}

/// Values produced by a lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    values: Vec<Value>,
}

fn describe(capabilities: &[Capability]) -> String {
    match capabilities {
        [] => "value".to_string(),
        _ => capabilities
            .iter()
            .map(|capability| format!("{:?}", capability))
            .collect::<Vec<_>>()
            .join("+"),
    }
}

impl QueryResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Counts values having all `capabilities`, stopping at `limit`.
    pub fn count_until(&self, limit: usize, capabilities: &[Capability]) -> usize {
        self.values
            .iter()
            .filter(|value| value.has_all(capabilities))
            .take(limit)
            .count()
    }

    /// All values having all `capabilities`, in no particular order
    pub fn subset(&self, capabilities: &[Capability]) -> Vec<Value> {
        self.values
            .iter()
            .filter(|value| value.has_all(capabilities))
            .cloned()
            .collect()
    }

    pub fn is_any_of(&self, capabilities: &[Capability]) -> bool {
        self.count_until(1, capabilities) > 0
    }

    /// Exactly one value has the capabilities and exactly one value is
    /// present at all.
    pub fn is_unique_of(&self, capabilities: &[Capability]) -> bool {
        self.count_until(2, capabilities) == 1 && self.count_until(2, &[]) == 1
    }

    /// The one value having the capabilities.
    ///
    /// Fails with [`LinkedDataError::NoData`] if none has them and with
    /// [`LinkedDataError::AmbiguousData`] if several do, or if other values
    /// are present besides the match.
    pub fn singleton(&self, capabilities: &[Capability]) -> LinkedDataResult<Value> {
        match self.count_until(2, capabilities) {
            0 => Err(LinkedDataError::NoData(describe(capabilities))),
            1 if self.count_until(2, &[]) == 1 => Ok(self.values[0].clone()),
            _ => Err(LinkedDataError::AmbiguousData(format!(
                "{} values where one {} was requested",
                self.values.len(),
                describe(capabilities)
            ))),
        }
    }

    /// Like [`QueryResult::singleton`], for callers that already checked
    /// uniqueness.
    ///
    /// # Panics
    ///
    /// With [`ExpectationFault::NotFound`] or [`ExpectationFault::TooMany`]
    /// if the result does not hold exactly one value with the capabilities.
    #[track_caller]
    pub fn expectable_singleton(&self, capabilities: &[Capability]) -> Value {
        match self.singleton(capabilities) {
            Ok(value) => value,
            Err(LinkedDataError::NoData(_)) => {
                panic!("{}", ExpectationFault::NotFound(describe(capabilities)))
            }
            Err(LinkedDataError::AmbiguousData(_)) => panic!(
                "{}",
                ExpectationFault::TooMany(describe(capabilities), self.values.len())
            ),
        }
    }

    /// The unique value
    pub fn value(&self) -> LinkedDataResult<Value> {
        self.singleton(&[])
    }

    /// The unique value
    ///
    /// # Panics
    ///
    /// If the result is empty or holds several values.
    #[track_caller]
    pub fn expectable(&self) -> Value {
        self.expectable_singleton(&[])
    }

    /// The unique value, or `default`
    pub fn or_else(&self, default: Value) -> Value {
        self.or_else_get(|| default)
    }

    pub fn or_else_get(&self, default: impl FnOnce() -> Value) -> Value {
        if self.is_unique() {
            self.values[0].clone()
        } else {
            default()
        }
    }

    pub fn is_any(&self) -> bool {
        !self.values.is_empty()
    }

    pub fn is_unique(&self) -> bool {
        self.count_until(2, &[]) == 1
    }

    /// Calls `action` for every value. Calls may run in parallel and in any
    /// order.
    pub fn for_each<F>(&self, action: F)
    where
        F: Fn(Value) + Send + Sync,
    {
        self.values.par_iter().cloned().for_each(action);
    }

    /// Literal values and reference IRIs. Nodes contribute nothing, named
    /// ones included.
    pub fn leaves(&self) -> HashSet<String> {
        self.values
            .iter()
            .filter_map(|value| value.leaf().map(str::to_string))
            .collect()
    }

    /// The leaves in result order, without repetition, joined by `separator`
    pub fn leaves_joined(&self, separator: &str) -> String {
        join_distinct(self.values.iter().filter_map(Value::leaf), separator)
    }

    /// Literal values only
    pub fn strings(&self) -> HashSet<String> {
        self.values
            .iter()
            .filter_map(|value| value.literal_value().map(str::to_string))
            .collect()
    }

    /// The literal values in result order, without repetition, joined by
    /// `separator`
    pub fn strings_joined(&self, separator: &str) -> String {
        join_distinct(self.values.iter().filter_map(Value::literal_value), separator)
    }
}

fn join_distinct<'a>(texts: impl Iterator<Item = &'a str>, separator: &str) -> String {
    let mut seen = HashSet::new();
    texts
        .filter(|text| seen.insert(*text))
        .collect::<Vec<_>>()
        .join(separator)
}

fn to_value(value: &Value) -> Option<Value> {
    Some(value.clone())
}

fn to_lang_string(value: &Value) -> Option<LangString> {
    match value {
        Value::LangString(lang_string) => Some(lang_string.clone()),
        _ => None,
    }
}

fn to_literal(value: &Value) -> Option<AnyLiteral> {
    match value {
        Value::Literal(literal) => Some(AnyLiteral::Typed(literal.clone())),
        Value::LangString(lang_string) => Some(AnyLiteral::Lang(lang_string.clone())),
        _ => None,
    }
}

fn to_named_node(value: &Value) -> Option<NamedNode> {
    match value {
        Value::NamedNode(node) => Some(node.clone()),
        _ => None,
    }
}

fn to_node(value: &Value) -> Option<Node> {
    value.as_node().cloned()
}

fn to_node_reference(value: &Value) -> Option<NodeReference> {
    match value {
        Value::NodeReference(reference) => Some(reference.clone()),
        _ => None,
    }
}

/// Generates the accessor family of one capability.
macro_rules! capability_family {
    (
        $name:literal, $capability:expr, $ty:ty, $convert:ident,
        $one:ident, $all:ident, $expectable:ident, $or_else:ident, $or_else_get:ident,
        $is_any:ident, $is_unique:ident, $for_each:ident
    ) => {
        impl QueryResult {
            #[doc = concat!("The unique ", $name, "; see [`QueryResult::singleton`]")]
            pub fn $one(&self) -> LinkedDataResult<$ty> {
                let value = self.singleton(&[$capability])?;
                $convert(&value).ok_or_else(|| LinkedDataError::NoData($name.to_string()))
            }

            #[doc = concat!("Every ", $name, ", in no particular order")]
            pub fn $all(&self) -> Vec<$ty> {
                self.values.iter().filter(|v| v.has($capability)).filter_map($convert).collect()
            }

            #[doc = concat!("The unique ", $name, "\n\n# Panics\n\nIf there is not exactly one value, being a ", $name, ".")]
            #[track_caller]
            pub fn $expectable(&self) -> $ty {
                let value = self.expectable_singleton(&[$capability]);
                match $convert(&value) {
                    Some(converted) => converted,
                    None => panic!("{}", ExpectationFault::NotFound($name.to_string())),
                }
            }

            #[doc = concat!("The unique ", $name, ", or `default`")]
            pub fn $or_else(&self, default: $ty) -> $ty {
                self.$or_else_get(|| default)
            }

            pub fn $or_else_get(&self, default: impl FnOnce() -> $ty) -> $ty {
                if self.is_unique_of(&[$capability]) {
                    if let Some(converted) = self.values.first().and_then($convert) {
                        return converted;
                    }
                }
                default()
            }

            pub fn $is_any(&self) -> bool {
                self.is_any_of(&[$capability])
            }

            pub fn $is_unique(&self) -> bool {
                self.is_unique_of(&[$capability])
            }

            #[doc = concat!("Calls `action` for every ", $name, ", possibly in parallel")]
            pub fn $for_each<F>(&self, action: F)
            where
                F: Fn($ty) + Send + Sync,
            {
                self.values
                    .par_iter()
                    .filter(|v| v.has($capability))
                    .filter_map($convert)
                    .for_each(action);
            }
        }
    };
}

capability_family!(
    "accessible object", Capability::AccessibleObject, Value, to_value,
    accessible_object, accessible_objects, accessible_object_expectable,
    accessible_object_or_else, accessible_object_or_else_get,
    is_any_accessible_object, is_unique_accessible_object, for_each_accessible_object
);

capability_family!(
    "identifiable node", Capability::Identifiable, Value, to_value,
    identifiable_node, identifiable_nodes, identifiable_node_expectable,
    identifiable_node_or_else, identifiable_node_or_else_get,
    is_any_identifiable_node, is_unique_identifiable_node, for_each_identifiable_node
);

capability_family!(
    "language-tagged string", Capability::LangString, LangString, to_lang_string,
    lang_string, lang_strings, lang_string_expectable,
    lang_string_or_else, lang_string_or_else_get,
    is_any_lang_string, is_unique_lang_string, for_each_lang_string
);

capability_family!(
    "literal", Capability::Literal, AnyLiteral, to_literal,
    literal, literals, literal_expectable,
    literal_or_else, literal_or_else_get,
    is_any_literal, is_unique_literal, for_each_literal
);

capability_family!(
    "named node", Capability::NamedNode, NamedNode, to_named_node,
    named_node, named_nodes, named_node_expectable,
    named_node_or_else, named_node_or_else_get,
    is_any_named_node, is_unique_named_node, for_each_named_node
);

capability_family!(
    "node", Capability::Node, Node, to_node,
    node, nodes, node_expectable,
    node_or_else, node_or_else_get,
    is_any_node, is_unique_node, for_each_node
);

capability_family!(
    "node reference", Capability::NodeReference, NodeReference, to_node_reference,
    node_reference, node_references, node_reference_expectable,
    node_reference_or_else, node_reference_or_else_get,
    is_any_node_reference, is_unique_node_reference, for_each_node_reference
);

capability_family!(
    "node type", Capability::NodeType, Value, to_value,
    node_type, node_types, node_type_expectable,
    node_type_or_else, node_type_or_else_get,
    is_any_node_type, is_unique_node_type, for_each_node_type
);

impl FromIterator<Value> for QueryResult {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a Value> for QueryResult {
    fn from_iter<I: IntoIterator<Item = &'a Value>>(iter: I) -> Self {
        iter.into_iter().cloned().collect()
    }
}

impl From<Vec<Value>> for QueryResult {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl Extend<Value> for QueryResult {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl IntoIterator for QueryResult {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
