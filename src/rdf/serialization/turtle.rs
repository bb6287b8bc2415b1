//! Turtle, N3 and N-Triples implementation

use std::io::{BufRead, Write};

use oxrdf::{BlankNode, Literal, NamedNode, Subject, Term, Triple};
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser, TurtleError, TurtleFormatter, TurtleParser};

use super::{ParseError, ParseResult, SerializeError, SerializeResult};
use crate::vocab::Namespaces;

/// Write triples as Turtle, preceded by a `@prefix` line per preset prefix.
/// The same text is valid N3.
pub(super) fn write_turtle<W: Write>(
    triples: &[Triple],
    namespaces: &Namespaces,
    mut destination: W,
) -> SerializeResult<W> {
    for (prefix, namespace) in namespaces.iter() {
        writeln!(destination, "@prefix {}: <{}> .", prefix, namespace)?;
    }
    if !namespaces.is_empty() {
        writeln!(destination)?;
    }

    let mut formatter = TurtleFormatter::new(destination);
    for triple in triples {
        with_rio_triple(triple, |rio_triple| formatter.format(rio_triple))
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;
    }
    formatter
        .finish()
        .map_err(|e| SerializeError::Serialize(e.to_string()))
}

pub(super) fn write_ntriples<W: Write>(triples: &[Triple], destination: W) -> SerializeResult<W> {
    let mut formatter = NTriplesFormatter::new(destination);
    for triple in triples {
        with_rio_triple(triple, |rio_triple| formatter.format(rio_triple))
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;
    }
    formatter
        .finish()
        .map_err(|e| SerializeError::Serialize(e.to_string()))
}

/// Lends the rio view of a triple to a formatter
pub(super) fn with_rio_triple<T>(
    triple: &Triple,
    format: impl FnOnce(&rio_api::model::Triple<'_>) -> T,
) -> T {
    let subject = match &triple.subject {
        Subject::NamedNode(n) => rio_api::model::Subject::NamedNode(rio_api::model::NamedNode {
            iri: n.as_str(),
        }),
        Subject::BlankNode(b) => {
            rio_api::model::Subject::BlankNode(rio_api::model::BlankNode { id: b.as_str() })
        }
        #[allow(unreachable_patterns)]
        _ => unreachable!("quoted triples are never produced"),
    };

    let predicate = rio_api::model::NamedNode {
        iri: triple.predicate.as_str(),
    };

    let object = match &triple.object {
        Term::NamedNode(n) => rio_api::model::Term::NamedNode(rio_api::model::NamedNode {
            iri: n.as_str(),
        }),
        Term::BlankNode(b) => {
            rio_api::model::Term::BlankNode(rio_api::model::BlankNode { id: b.as_str() })
        }
        Term::Literal(l) => rio_api::model::Term::Literal(rio_literal(l)),
        #[allow(unreachable_patterns)]
        _ => unreachable!("quoted triples are never produced"),
    };

    format(&rio_api::model::Triple {
        subject,
        predicate,
        object,
    })
}

fn rio_literal(l: &Literal) -> rio_api::model::Literal<'_> {
    if let Some(language) = l.language() {
        return rio_api::model::Literal::LanguageTaggedString {
            value: l.value(),
            language,
        };
    }
    let datatype = l.datatype();
    if datatype.as_str() == "http://www.w3.org/2001/XMLSchema#string" {
        rio_api::model::Literal::Simple { value: l.value() }
    } else {
        rio_api::model::Literal::Typed {
            value: l.value(),
            datatype: rio_api::model::NamedNode {
                iri: datatype.as_str(),
            },
        }
    }
}

/// Parse Turtle (and the Turtle subset of N3)
pub(super) fn parse_turtle<R: BufRead>(reader: R) -> ParseResult<Vec<Triple>> {
    let mut parser = TurtleParser::new(reader, None);
    let mut triples = Vec::new();
    let res: Result<(), TurtleError> = parser.parse_all(&mut |t| {
        triples.push(convert_triple(t).map_err(invalid_data)?);
        Ok(())
    });
    res.map_err(|e| ParseError::Parse(e.to_string()))?;
    Ok(triples)
}

pub(super) fn parse_ntriples<R: BufRead>(reader: R) -> ParseResult<Vec<Triple>> {
    let mut parser = NTriplesParser::new(reader);
    let mut triples = Vec::new();
    let res: Result<(), TurtleError> = parser.parse_all(&mut |t| {
        triples.push(convert_triple(t).map_err(invalid_data)?);
        Ok(())
    });
    res.map_err(|e| ParseError::Parse(e.to_string()))?;
    Ok(triples)
}

pub(super) fn invalid_data(e: ParseError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
}

pub(super) fn convert_triple(t: rio_api::model::Triple<'_>) -> ParseResult<Triple> {
    Ok(Triple::new(
        convert_subject(t.subject)?,
        convert_named_node(t.predicate)?,
        convert_object(t.object)?,
    ))
}

fn convert_subject(s: rio_api::model::Subject<'_>) -> ParseResult<Subject> {
    match s {
        rio_api::model::Subject::NamedNode(n) => Ok(Subject::NamedNode(convert_named_node(n)?)),
        rio_api::model::Subject::BlankNode(b) => Ok(Subject::BlankNode(convert_blank_node(b)?)),
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_named_node(n: rio_api::model::NamedNode<'_>) -> ParseResult<NamedNode> {
    NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_blank_node(b: rio_api::model::BlankNode<'_>) -> ParseResult<BlankNode> {
    BlankNode::new(b.id).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_object(o: rio_api::model::Term<'_>) -> ParseResult<Term> {
    match o {
        rio_api::model::Term::NamedNode(n) => Ok(Term::NamedNode(convert_named_node(n)?)),
        rio_api::model::Term::BlankNode(b) => Ok(Term::BlankNode(convert_blank_node(b)?)),
        rio_api::model::Term::Literal(l) => Ok(Term::Literal(convert_literal(l)?)),
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}

fn convert_literal(l: rio_api::model::Literal<'_>) -> ParseResult<Literal> {
    match l {
        rio_api::model::Literal::Simple { value } => Ok(Literal::new_simple_literal(value)),
        rio_api::model::Literal::LanguageTaggedString { value, language } => {
            Literal::new_language_tagged_literal(value, language)
                .map_err(|e| ParseError::Parse(e.to_string()))
        }
        rio_api::model::Literal::Typed { value, datatype } => Ok(Literal::new_typed_literal(
            value,
            convert_named_node(datatype)?,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = r#"
        @prefix ex: <http://example.org/> .
        ex:moby a ex:Book ;
            ex:title "Moby Dick" ;
            ex:abstract "Call me Ishmael."@en ;
            ex:pages "635"^^<http://www.w3.org/2001/XMLSchema#integer> ;
            ex:publisher [ ex:name "Harper" ] .
    "#;

    #[test]
    fn test_parse_turtle() {
        let triples = parse_turtle(INPUT.as_bytes()).unwrap();
        assert_eq!(triples.len(), 6);
        assert!(triples
            .iter()
            .any(|t| matches!(&t.object, Term::Literal(l) if l.language() == Some("en"))));
    }

    #[test]
    fn test_parse_invalid_turtle() {
        assert!(matches!(
            parse_turtle("ex:a ex:b".as_bytes()),
            Err(ParseError::Parse(_))
        ));
    }

    #[test]
    fn test_turtle_prefix_lines() {
        let triples = parse_turtle(INPUT.as_bytes()).unwrap();
        let mut namespaces = Namespaces::empty();
        namespaces.add_prefix("ex", "http://example.org/").unwrap();

        let output = String::from_utf8(write_turtle(&triples, &namespaces, Vec::new()).unwrap()).unwrap();
        assert!(output.starts_with("@prefix ex: <http://example.org/> .\n"));
        assert_eq!(parse_turtle(output.as_bytes()).unwrap().len(), 6);
    }

    #[test]
    fn test_ntriples_line_per_triple() {
        let triples = parse_turtle(INPUT.as_bytes()).unwrap();
        let output = String::from_utf8(write_ntriples(&triples, Vec::new()).unwrap()).unwrap();

        assert_eq!(output.lines().count(), 6);
        assert_eq!(parse_ntriples(output.as_bytes()).unwrap().len(), 6);
    }
}
