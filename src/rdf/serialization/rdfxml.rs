//! RDF/XML implementation

use std::io::{BufRead, Write};

use oxrdf::Triple;
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_xml::{RdfXmlError, RdfXmlFormatter, RdfXmlParser};

use super::turtle::{convert_triple, invalid_data, with_rio_triple};
use super::{ParseError, ParseResult, SerializeError, SerializeResult};

/// Write triples as RDF/XML. With an indentation the output is pretty
/// printed and consecutive triples of a subject share one description.
pub(super) fn write<W: Write>(
    triples: &[Triple],
    indentation: Option<usize>,
    destination: W,
) -> SerializeResult<W> {
    let mut formatter = match indentation {
        Some(size) => RdfXmlFormatter::with_indentation(destination, size)?,
        None => RdfXmlFormatter::new(destination)?,
    };
    for triple in triples {
        with_rio_triple(triple, |rio_triple| formatter.format(rio_triple))
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;
    }
    formatter
        .finish()
        .map_err(|e| SerializeError::Serialize(e.to_string()))
}

pub(super) fn parse<R: BufRead>(reader: R) -> ParseResult<Vec<Triple>> {
    let mut parser = RdfXmlParser::new(reader, None);
    let mut triples = Vec::new();
    let res: Result<(), RdfXmlError> = parser.parse_all(&mut |t| {
        triples.push(convert_triple(t).map_err(invalid_data)?);
        Ok(())
    });
    res.map_err(|e| ParseError::Parse(e.to_string()))?;
    Ok(triples)
}
