//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL) and N3
//! - N-Triples (NT)
//! - RDF/XML, linear and abbreviated
//! - plain XML (write only)

mod rdfxml;
mod turtle;
mod xml;

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use super::convert;
use crate::config::WriterConfig;
use crate::model::Value;
use crate::result::QueryResult;
use crate::vocab::{Namespaces, PrefixError};

/// Indentation used when none is configured
pub(crate) const DEFAULT_INDENT: usize = 2;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum RdfFormat {
    /// N-Triples format (.nt)
    NTriples,
    /// Notation 3 (.n3), written in its Turtle subset
    N3,
    /// RDF/XML format (.rdf), one description per triple
    RdfXml,
    /// RDF/XML format, indented and grouped by subject
    RdfXmlAbbrev,
    /// Turtle format (.ttl)
    Turtle,
    /// Plain XML document following the list emulation
    Xml,
}

impl RdfFormat {
    /// Look up a format by its conventional name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "N-TRIPLE" | "N-TRIPLES" | "NTRIPLES" | "NT" => Some(RdfFormat::NTriples),
            "N3" => Some(RdfFormat::N3),
            "RDF/XML" | "RDFXML" => Some(RdfFormat::RdfXml),
            "RDF/XML-ABBREV" | "RDFXML-ABBREV" => Some(RdfFormat::RdfXmlAbbrev),
            "TURTLE" | "TTL" => Some(RdfFormat::Turtle),
            "XML" => Some(RdfFormat::Xml),
            _ => None,
        }
    }

    /// The conventional name of the format
    pub fn name(self) -> &'static str {
        match self {
            RdfFormat::NTriples => "N-TRIPLE",
            RdfFormat::N3 => "N3",
            RdfFormat::RdfXml => "RDF/XML",
            RdfFormat::RdfXmlAbbrev => "RDF/XML-ABBREV",
            RdfFormat::Turtle => "TURTLE",
            RdfFormat::Xml => "XML",
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RdfFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RdfFormat::from_name(s).ok_or_else(|| ParseError::UnknownFormat(s.to_string()))
    }
}

impl TryFrom<String> for RdfFormat {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// How far named nodes are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recursion {
    /// Every reachable named node is written with its relations
    #[default]
    Always,
    /// Named nodes are only referenced by their identifier
    Never,
    /// Only the relations of the root are written
    RootOnly,
}

impl Recursion {
    /// The flag the children of a node are converted with
    pub(crate) fn for_children(self) -> Recursion {
        match self {
            Recursion::Always => Recursion::Always,
            Recursion::Never | Recursion::RootOnly => Recursion::Never,
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported format
    #[error("Unsupported format: {0:?}")]
    UnsupportedFormat(RdfFormat),

    /// No format goes by that name
    #[error("Unknown format: {0}")]
    UnknownFormat(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Relation, identifier or datatype is not an IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Literal cannot be represented in RDF
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    /// Prefix table rejected
    #[error("Prefix error: {0}")]
    Prefix(#[from] PrefixError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Indexed elements do not form the sequence 1..=n
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(String),

    /// More than one element under one index
    #[error("Too many elements with index {0}, must not be more than one")]
    SeveralElementsForSameIndex(u64),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// Writes node graphs in one format
///
/// ```rust
/// use ldgraph::model::{Node, Value};
/// use ldgraph::rdf::{RdfFormat, RdfWriter};
///
/// let node = Node::with_type("http://example.org/Book");
/// let xml = RdfWriter::new(RdfFormat::Xml).write_to_string(&Value::from(node)).unwrap();
/// assert!(xml.contains("Book"));
/// ```
#[derive(Debug, Clone)]
pub struct RdfWriter {
    format: RdfFormat,
    recursion: Recursion,
    indent: Option<usize>,
    namespaces: Namespaces,
}

impl RdfWriter {
    /// Create a writer with full recursion, default indentation and the
    /// `rdf` and `rdfs` prefixes
    pub fn new(format: RdfFormat) -> Self {
        Self {
            format,
            recursion: Recursion::default(),
            indent: Some(DEFAULT_INDENT),
            namespaces: Namespaces::new(),
        }
    }

    /// Create a writer from a configuration, validating its prefixes
    pub fn from_config(config: &WriterConfig) -> SerializeResult<Self> {
        let namespaces = Namespaces::with_presets(
            config
                .prefixes
                .iter()
                .map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str())),
        )?;
        Ok(Self {
            format: config.format,
            recursion: config.recursion,
            indent: config.indent,
            namespaces,
        })
    }

    pub fn with_recursion(mut self, recursion: Recursion) -> Self {
        self.recursion = recursion;
        self
    }

    /// Set the indentation. `None` writes without line breaks where the
    /// format allows it.
    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_namespaces(mut self, namespaces: Namespaces) -> Self {
        self.namespaces = namespaces;
        self
    }

    pub fn format(&self) -> RdfFormat {
        self.format
    }

    pub fn recursion(&self) -> Recursion {
        self.recursion
    }

    /// Write the graph reachable from `root` and hand back the destination
    pub fn write<W: Write>(&self, root: &Value, destination: W) -> SerializeResult<W> {
        if self.format == RdfFormat::Xml {
            return xml::write(root, self.namespaces.clone(), self.indent, destination);
        }

        let triples = convert::to_triples(root, self.recursion)?;
        debug!("Writing {} triples as {}", triples.len(), self.format);

        match self.format {
            RdfFormat::Turtle | RdfFormat::N3 => {
                turtle::write_turtle(&triples, &self.namespaces, destination)
            }
            RdfFormat::NTriples => turtle::write_ntriples(&triples, destination),
            RdfFormat::RdfXml => rdfxml::write(&triples, None, destination),
            RdfFormat::RdfXmlAbbrev => rdfxml::write(
                &triples,
                Some(self.indent.unwrap_or(DEFAULT_INDENT)),
                destination,
            ),
            RdfFormat::Xml => unreachable!("XML is handled above"),
        }
    }

    pub fn write_to_string(&self, root: &Value) -> SerializeResult<String> {
        let output = self.write(root, Vec::new())?;
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }

    /// Write to a file, which is closed again before returning
    pub fn write_file(&self, root: &Value, path: impl AsRef<Path>) -> SerializeResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = self.write(root, BufWriter::new(file))?;
        writer.flush()?;
        info!("Wrote {} to {}", self.format, path.display());
        Ok(())
    }
}

/// Write the graph reachable from `root` in one format
pub fn write<W: Write>(
    root: &Value,
    prefixes: &Namespaces,
    destination: W,
    format: RdfFormat,
) -> SerializeResult<W> {
    RdfWriter::new(format)
        .with_namespaces(prefixes.clone())
        .write(root, destination)
}

/// Write the graph reachable from `root` to a file
pub fn write_file(
    root: &Value,
    prefixes: &Namespaces,
    path: impl AsRef<Path>,
    format: RdfFormat,
) -> SerializeResult<()> {
    RdfWriter::new(format)
        .with_namespaces(prefixes.clone())
        .write_file(root, path)
}

/// Read a node graph. The result holds the subjects that no triple links
/// to, in order of appearance.
pub fn read<R: BufRead>(reader: R, format: RdfFormat) -> ParseResult<QueryResult> {
    let triples = match format {
        RdfFormat::Turtle | RdfFormat::N3 => turtle::parse_turtle(reader)?,
        RdfFormat::NTriples => turtle::parse_ntriples(reader)?,
        RdfFormat::RdfXml | RdfFormat::RdfXmlAbbrev => rdfxml::parse(reader)?,
        RdfFormat::Xml => return Err(ParseError::UnsupportedFormat(format)),
    };
    debug!("Read {} triples as {}", triples.len(), format);
    Ok(convert::to_graph(&triples))
}

pub fn read_str(input: &str, format: RdfFormat) -> ParseResult<QueryResult> {
    read(input.as_bytes(), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!(RdfFormat::from_name("turtle"), Some(RdfFormat::Turtle));
        assert_eq!(RdfFormat::from_name("TTL"), Some(RdfFormat::Turtle));
        assert_eq!(RdfFormat::from_name("N-Triple"), Some(RdfFormat::NTriples));
        assert_eq!(RdfFormat::from_name("rdf/xml-abbrev"), Some(RdfFormat::RdfXmlAbbrev));
        assert_eq!(RdfFormat::from_name("JSON-LD"), None);
        assert_eq!("n3".parse::<RdfFormat>().unwrap(), RdfFormat::N3);
        assert!(matches!(
            "yaml".parse::<RdfFormat>(),
            Err(ParseError::UnknownFormat(_))
        ));
        for format in [
            RdfFormat::NTriples,
            RdfFormat::N3,
            RdfFormat::RdfXml,
            RdfFormat::RdfXmlAbbrev,
            RdfFormat::Turtle,
            RdfFormat::Xml,
        ] {
            assert_eq!(RdfFormat::from_name(format.name()), Some(format));
        }
    }

    #[test]
    fn test_recursion_for_children() {
        assert_eq!(Recursion::Always.for_children(), Recursion::Always);
        assert_eq!(Recursion::RootOnly.for_children(), Recursion::Never);
        assert_eq!(Recursion::Never.for_children(), Recursion::Never);
    }

    #[test]
    fn test_xml_cannot_be_read() {
        assert!(matches!(
            read_str("<a/>", RdfFormat::Xml),
            Err(ParseError::UnsupportedFormat(RdfFormat::Xml))
        ));
    }
}
