//! Namespace and prefix management
//!
//! This module handles namespace prefixes for compact IRI notation, both
//! for the `@prefix` header of Turtle output and for the element and
//! attribute names of the plain XML writer.

use indexmap::IndexMap;
use oxiri::Iri;
use thiserror::Error;

use super::{rdf, rdfs, xsd};

/// The namespace reserved for `xmlns` declarations
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// The namespace reserved for the `xml:` prefix
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Prefix errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Not a compact IRI
    #[error("Invalid compact IRI: {0}")]
    InvalidIri(String),

    /// Prefix is not a Turtle prefix name
    #[error("Invalid prefix name: {0:?}")]
    InvalidPrefix(String),

    /// Namespace is not an absolute IRI ending in `#` or `/`
    #[error("Namespace of prefix {prefix} must be an absolute IRI ending in '#' or '/': {namespace}")]
    InvalidNamespace { prefix: String, namespace: String },
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Prefix table with on-demand prefixes for XML output
///
/// Preset prefixes map to namespaces ending in `#` or `/`. When the XML
/// writer meets a namespace without a preset, a fresh prefix `a`, `b`, ...,
/// `z`, `aa`, ... is assigned.
#[derive(Debug, Clone)]
pub struct Namespaces {
    /// Prefix → namespace IRI
    prefixes: IndexMap<String, String>,
    /// Namespace → prefix, in order of first use by the XML writer
    used: IndexMap<String, String>,
    next: u64,
}

impl Namespaces {
    /// Create a prefix table knowing `rdf` and `rdfs`
    pub fn new() -> Self {
        let mut namespaces = Self::empty();
        namespaces
            .prefixes
            .insert("rdf".to_string(), rdf::NAMESPACE.to_string());
        namespaces
            .prefixes
            .insert("rdfs".to_string(), rdfs::NAMESPACE.to_string());
        namespaces
    }

    /// Create a prefix table without any prefix
    pub fn empty() -> Self {
        Self {
            prefixes: IndexMap::new(),
            used: IndexMap::new(),
            next: 0,
        }
    }

    /// Create a prefix table with `rdf`, `rdfs` and the given presets
    pub fn with_presets<I, P, N>(presets: I) -> PrefixResult<Self>
    where
        I: IntoIterator<Item = (P, N)>,
        P: Into<String>,
        N: Into<String>,
    {
        let mut namespaces = Self::new();
        for (prefix, namespace) in presets {
            namespaces.add_prefix(prefix, namespace)?;
        }
        Ok(namespaces)
    }

    /// Add a prefix. The prefix must be usable both in a Turtle `@prefix`
    /// header and as an XML namespace prefix; the namespace must be an
    /// absolute IRI ending in `#` or `/`.
    pub fn add_prefix(
        &mut self,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
    ) -> PrefixResult<()> {
        let prefix = prefix.into();
        let namespace = namespace.into();
        if !is_prefix_name(&prefix) {
            return Err(PrefixError::InvalidPrefix(prefix));
        }
        let separated = namespace.ends_with('#') || namespace.ends_with('/');
        if !separated || Iri::parse(namespace.as_str()).is_err() {
            return Err(PrefixError::InvalidNamespace { prefix, namespace });
        }
        self.prefixes.insert(prefix, namespace);
        Ok(())
    }

    /// Get the namespace for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Expand a compact IRI (prefix:local) to a full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        match compact_iri.split_once(':') {
            Some((prefix, local)) => Ok(concat(self.get_iri(prefix)?, local)),
            None => Err(PrefixError::InvalidIri(compact_iri.to_string())),
        }
    }

    /// Compact an IRI using the longest matching namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, namespace)| iri.starts_with(namespace.as_str()))
            .max_by_key(|(_, namespace)| namespace.len())
            .map(|(prefix, namespace)| format!("{}:{}", prefix, &iri[namespace.len()..]))
    }

    /// All preset prefixes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str()))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Abbreviates an element IRI to a qualified XML name, assigning a
    /// prefix to its namespace if needed.
    pub fn abbreviate_element(&mut self, element: &str) -> String {
        let namespace = namespace_of(element);
        if namespace.is_empty() {
            return element.to_string();
        }
        let prefix = self.available(namespace);
        format!("{}:{}", prefix, local_name_of(element))
    }

    /// Abbreviates an attribute IRI. An attribute in the namespace of its
    /// element is written without prefix.
    pub fn abbreviate_attribute(&mut self, element: &str, attribute: &str) -> String {
        let namespace = namespace_of(attribute);
        if namespace.is_empty() {
            return attribute.to_string();
        }
        let prefix = self.available(namespace);
        let local = local_name_of(attribute);
        if namespace_of(element) == namespace {
            local.to_string()
        } else {
            format!("{}:{}", prefix, local)
        }
    }

    /// `xmlns:` declarations for every namespace abbreviated so far
    pub fn xmlns_declarations(&self) -> Vec<(String, String)> {
        self.used
            .iter()
            .filter(|(namespace, _)| constant_prefix(namespace).is_none())
            .map(|(namespace, prefix)| (format!("xmlns:{}", prefix), namespace.clone()))
            .collect()
    }

    fn available(&mut self, namespace: &str) -> String {
        if let Some(prefix) = self.used.get(namespace) {
            return prefix.clone();
        }
        let prefix = match constant_prefix(namespace) {
            Some(prefix) => prefix.to_string(),
            None => {
                match self
                    .prefixes
                    .iter()
                    .find(|(_, preset)| preset.as_str() == namespace)
                {
                    Some((prefix, _)) => prefix.clone(),
                    None => self.next_free_prefix(),
                }
            }
        };
        self.used.insert(namespace.to_string(), prefix.clone());
        prefix
    }

    fn next_free_prefix(&mut self) -> String {
        loop {
            self.next += 1;
            let candidate = as_letters(self.next);
            let taken = self.prefixes.contains_key(&candidate)
                || candidate == "xml"
                || candidate == "xmlns"
                || self.used.values().any(|prefix| *prefix == candidate);
            if !taken {
                return candidate;
            }
        }
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Self::new()
    }
}

/// Well-known prefixes used for display purposes, `rdf`, `rdfs` and `xsd`
pub(crate) fn well_known() -> Namespaces {
    let mut namespaces = Namespaces::new();
    namespaces
        .prefixes
        .insert("xsd".to_string(), xsd::NAMESPACE.to_string());
    namespaces
}

/// Joins namespace and local name, inserting `#` if the namespace does
/// not already end in a separator.
pub fn concat(namespace: &str, local_name: &str) -> String {
    if namespace.ends_with('/') || namespace.ends_with('#') {
        format!("{}{}", namespace, local_name)
    } else {
        format!("{}#{}", namespace, local_name)
    }
}

/// The part of an IRI after `#`, or else after the last `/`
pub fn local_name_of(iri: &str) -> &str {
    match iri.find('#') {
        Some(pos) => &iri[pos + 1..],
        None => &iri[iri.rfind('/').map_or(0, |pos| pos + 1)..],
    }
}

/// The part of an IRI up to and including `#`, or else the last `/`
pub fn namespace_of(iri: &str) -> &str {
    match iri.find('#') {
        Some(pos) => &iri[..=pos],
        None => &iri[..iri.rfind('/').map_or(0, |pos| pos + 1)],
    }
}

/// A non-empty Turtle `PN_PREFIX`: a letter, then letters, digits, `_`,
/// `-`, `.` or `·`, not ending in `.`
fn is_prefix_name(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_alphabetic()
        && !prefix.ends_with('.')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\u{B7}'))
}

fn constant_prefix(namespace: &str) -> Option<&'static str> {
    match namespace {
        XMLNS_NAMESPACE => Some("xmlns"),
        XML_NAMESPACE | "http://www.w3.org/XML/1998/namespace#" => Some("xml"),
        _ => None,
    }
}

/// Spreadsheet-column style numbering: 1 → a, 26 → z, 27 → aa
fn as_letters(mut value: u64) -> String {
    let mut letters = Vec::new();
    while value > 0 {
        value -= 1;
        letters.push(b'a' + (value % 26) as u8);
        value /= 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}
