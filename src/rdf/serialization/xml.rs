//! Plain XML writer
//!
//! Writes a node as an XML document in which the list emulation becomes
//! document order: the element is named by the node type, indexed values
//! become child elements or text in index order, and single-valued plain
//! relations become attributes. Other relations are wrapped in an
//! `rdf:predicate` element naming the relation.

use std::collections::{BTreeMap, HashSet};
use std::io::Write;

use super::{SerializeError, SerializeResult};
use crate::model::{Node, Value};
use crate::vocab::namespace::XML_NAMESPACE;
use crate::vocab::{rdf, Namespaces};

/// Names a literal wrapped in an element of its own
const XLINK_HREF: &str = "http://www.w3.org/1999/xlink#href";

pub(super) fn write<W: Write>(
    root: &Value,
    namespaces: Namespaces,
    indent: Option<usize>,
    mut destination: W,
) -> SerializeResult<W> {
    let Some(node) = root.as_node() else {
        return Err(SerializeError::Serialize(format!(
            "Only nodes can be written as XML, not {}",
            root
        )));
    };

    let mut builder = DocumentBuilder {
        namespaces,
        open: HashSet::new(),
    };
    let element_type = type_or_default(root);
    let mut element = builder.node_element(node, root.identifier(), &element_type)?;
    for (name, namespace) in builder.namespaces.xmlns_declarations() {
        element.set_attribute(name, namespace);
    }

    write!(destination, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#)?;
    if indent.is_some() {
        writeln!(destination)?;
    }
    element.write(&mut destination, indent, 0)?;
    if indent.is_some() {
        writeln!(destination)?;
    }
    Ok(destination)
}

fn type_or_default(value: &Value) -> String {
    value.get_type().unwrap_or_else(|_| rdf::DESCRIPTION.to_string())
}

/// Whether whitespace must be preserved: leading, trailing or repeated
/// whitespace
fn requires_preservation(text: &str) -> bool {
    let starts = text.chars().next().is_some_and(char::is_whitespace);
    let ends = text.chars().last().is_some_and(char::is_whitespace);
    let repeated = text
        .chars()
        .zip(text.chars().skip(1))
        .any(|(a, b)| a.is_whitespace() && b.is_whitespace());
    starts || ends || repeated
}

/// Whether a name matches the XML `NCName` production, restricted to the
/// characters `Namespaces` can produce
fn is_nc_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\u{B7}'))
}

/// Whether a name is a qualified XML name, `prefix:local` or `local`
fn is_qualified_name(name: &str) -> bool {
    match name.split_once(':') {
        Some((prefix, local)) => is_nc_name(prefix) && is_nc_name(local),
        None => is_nc_name(name),
    }
}

fn check_name(name: String, iri: &str) -> SerializeResult<String> {
    if is_qualified_name(&name) {
        Ok(name)
    } else {
        Err(SerializeError::Serialize(format!(
            "{} cannot be written as an XML name, got {:?}",
            iri, name
        )))
    }
}

struct DocumentBuilder {
    namespaces: Namespaces,
    /// Addresses of the nodes whose elements are being built
    open: HashSet<usize>,
}

impl DocumentBuilder {
    fn element_name(&mut self, element: &str) -> SerializeResult<String> {
        check_name(self.namespaces.abbreviate_element(element), element)
    }

    fn attribute_name(&mut self, element: &str, attribute: &str) -> SerializeResult<String> {
        check_name(self.namespaces.abbreviate_attribute(element, attribute), attribute)
    }

    fn node_element(
        &mut self,
        node: &Node,
        identifier: Option<&str>,
        element_type: &str,
    ) -> SerializeResult<Element> {
        let address = node.address();
        if !self.open.insert(address) {
            return Err(SerializeError::Serialize(format!(
                "Node of type {} contains itself",
                element_type
            )));
        }

        let mut element = Element::new(self.element_name(element_type)?);
        if let Some(identifier) = identifier {
            let about = self.namespaces.abbreviate_attribute(element_type, rdf::ABOUT);
            element.set_attribute(about, identifier.to_string());
        }

        let mut ordered = BTreeMap::new();
        let mut bags = Vec::new();
        for (relation, values) in node.entries() {
            if let Some(index) = rdf::sequence_number_of(&relation) {
                match values.as_slice() {
                    [single] => {
                        ordered.insert(index, single.clone());
                    }
                    _ => return Err(SerializeError::SeveralElementsForSameIndex(index)),
                }
                continue;
            }
            match values.as_slice() {
                [Value::Literal(literal)] => {
                    let name = self.attribute_name(element_type, &relation)?;
                    element.set_attribute(name, literal.value().to_string());
                }
                [Value::NodeReference(reference)] => {
                    if relation != rdf::TYPE {
                        let name = self.attribute_name(element_type, &relation)?;
                        element.set_attribute(name, reference.identifier().to_string());
                    }
                }
                _ => bags.push((relation, values)),
            }
        }

        if let (Some(first), Some(last)) = (ordered.keys().next(), ordered.keys().next_back()) {
            if *first != rdf::FIRST_INDEX {
                return Err(SerializeError::IndexOutOfBounds(format!(
                    "First element at illegal index {}, must be {}",
                    first,
                    rdf::FIRST_INDEX
                )));
            }
            if ordered.len() as u64 != *last {
                return Err(SerializeError::IndexOutOfBounds(format!(
                    "{} elements found, but {} expected",
                    ordered.len(),
                    last
                )));
            }
        }

        for value in ordered.values() {
            match value {
                Value::Node(_) | Value::NamedNode(_) => {
                    let child = self.value_element(value)?;
                    element.children.push(Content::Element(child));
                }
                Value::Literal(literal) => {
                    element.children.push(Content::Text(literal.value().to_string()))
                }
                Value::LangString(lang_string) => element
                    .children
                    .push(Content::Text(lang_string.value().to_string())),
                Value::NodeReference(reference) => element
                    .children
                    .push(Content::Text(reference.identifier().to_string())),
            }
        }

        for (relation, values) in bags {
            let mut predicate = Element::new(self.namespaces.abbreviate_element(rdf::PREDICATE));
            let value_name = self.namespaces.abbreviate_attribute(rdf::PREDICATE, rdf::VALUE);
            predicate.set_attribute(value_name, relation);
            let property_name = self.namespaces.abbreviate_attribute(rdf::PREDICATE, rdf::PROPERTY);
            predicate.set_attribute(property_name, rdf::BAG.to_string());
            for value in &values {
                let child = self.value_element(value)?;
                predicate.children.push(Content::Element(child));
            }
            element.children.push(Content::Element(predicate));
        }

        self.open.remove(&address);
        Ok(element)
    }

    /// Element for a value in a bag or in the list emulation
    fn value_element(&mut self, value: &Value) -> SerializeResult<Element> {
        match value {
            Value::Node(node) => self.node_element(node, None, &type_or_default(value)),
            Value::NamedNode(node) => {
                self.node_element(node.node(), Some(node.identifier()), &type_or_default(value))
            }
            Value::NodeReference(reference) => {
                let mut element = Element::new(self.namespaces.abbreviate_element(rdf::DESCRIPTION));
                let about = self.namespaces.abbreviate_attribute(rdf::DESCRIPTION, rdf::ABOUT);
                element.set_attribute(about, reference.identifier().to_string());
                Ok(element)
            }
            Value::Literal(_) | Value::LangString(_) => {
                let mut element = Element::new(self.namespaces.abbreviate_element(XLINK_HREF));
                if let Value::LangString(lang_string) = value {
                    let lang = format!("{}#lang", XML_NAMESPACE);
                    let name = self.namespaces.abbreviate_attribute(XLINK_HREF, &lang);
                    element.set_attribute(name, lang_string.language_tag());
                }
                let text = value.literal_value().unwrap_or_default();
                if requires_preservation(text) {
                    let space = format!("{}#space", XML_NAMESPACE);
                    let name = self.namespaces.abbreviate_attribute(XLINK_HREF, &space);
                    element.set_attribute(name, "preserve".to_string());
                }
                element.children.push(Content::Text(text.to_string()));
                Ok(element)
            }
        }
    }
}

enum Content {
    Element(Element),
    Text(String),
}

struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Content>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing an earlier one of the same name
    fn set_attribute(&mut self, name: String, value: String) {
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some(attribute) => attribute.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    fn write<W: Write>(&self, out: &mut W, indent: Option<usize>, depth: usize) -> std::io::Result<()> {
        write!(out, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(out, " {}=\"{}\"", name, escape(value, true))?;
        }
        if self.children.is_empty() {
            return write!(out, "/>");
        }
        write!(out, ">")?;

        let mixed = self.children.iter().any(|child| matches!(child, Content::Text(_)));
        match indent {
            Some(width) if !mixed => {
                for child in &self.children {
                    if let Content::Element(element) = child {
                        write!(out, "\n{}", " ".repeat(width * (depth + 1)))?;
                        element.write(out, indent, depth + 1)?;
                    }
                }
                write!(out, "\n{}", " ".repeat(width * depth))?;
            }
            _ => {
                for child in &self.children {
                    match child {
                        Content::Element(element) => element.write(out, None, 0)?,
                        Content::Text(text) => write!(out, "{}", escape(text, false))?,
                    }
                }
            }
        }
        write!(out, "</{}>", self.name)
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            '\n' if attribute => escaped.push_str("&#10;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
