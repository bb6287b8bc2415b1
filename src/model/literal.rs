//! Literal values

use std::fmt;
use std::hash::{Hash, Hasher};

use super::Value;
use crate::vocab::{namespace, rdf, XmlSchema};

/// An immutable scalar with an optional datatype
///
/// A literal without datatype, one typed `rdf:PlainLiteral` and one typed
/// `xsd:string` are all plain and compare equal.
#[derive(Debug, Clone)]
pub struct Literal {
    value: String,
    datatype: Option<String>,
}

impl Literal {
    /// Create a plain literal
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
        }
    }

    /// Create a literal of the given datatype. An empty datatype, as well as
    /// `rdf:PlainLiteral` and `xsd:string`, yield a plain literal. So does
    /// `rdf:langString`, which only a [`LangString`] may carry.
    pub fn new(value: impl Into<String>, datatype: &str) -> Self {
        Self {
            value: value.into(),
            datatype: normalize_datatype(datatype),
        }
    }

    /// Create an `xsd:integer` literal
    pub fn integer(value: i128) -> Self {
        Self::new(value.to_string(), XmlSchema::Integer.iri())
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The datatype IRI; `rdf:PlainLiteral` for plain literals
    pub fn datatype(&self) -> &str {
        self.datatype.as_deref().unwrap_or(rdf::PLAIN_LITERAL)
    }

    pub fn is_plain(&self) -> bool {
        self.datatype.is_none()
    }

    /// Tests whether this literal fulfills a condition.
    ///
    /// An absent condition always matches. A literal condition matches if
    /// its value is empty or equal and its datatype is equal. A node
    /// condition may only constrain `rdf:type` and `rdf:value`.
    pub fn matches(&self, condition: Option<&Value>) -> bool {
        match condition {
            None => true,
            Some(Value::Literal(other)) => {
                (other.value.is_empty() || other.value == self.value)
                    && other.datatype == self.datatype
            }
            Some(Value::Node(node)) => node.describes_literal(self.datatype(), &self.value),
            Some(Value::NamedNode(node)) => node.describes_literal(self.datatype(), &self.value),
            Some(Value::LangString(_)) | Some(Value::NodeReference(_)) => false,
        }
    }
}

fn normalize_datatype(datatype: &str) -> Option<String> {
    match datatype {
        "" | rdf::PLAIN_LITERAL | rdf::LANG_STRING => None,
        _ if datatype == XmlSchema::String.iri() => None,
        _ => Some(datatype.to_string()),
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.datatype == other.datatype
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.datatype.hash(state);
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.datatype {
            None => write_quoted(f, &self.value),
            Some(datatype) => {
                if XmlSchema::from_iri(datatype).is_some_and(XmlSchema::is_integer) {
                    return f.write_str(&self.value);
                }
                write_quoted(f, &self.value)?;
                match namespace::well_known().compact(datatype) {
                    Some(compact) => write!(f, "^^{}", compact),
                    None => write!(f, "^^<{}>", datatype),
                }
            }
        }
    }
}

/// A string with a language in place of a datatype
#[derive(Debug, Clone)]
pub struct LangString {
    value: String,
    language: String,
}

impl LangString {
    /// Create a language-tagged string. The language is kept as given;
    /// [`LangString::language_tag`] derives the normalized tag.
    pub fn new(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: language.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The language as it was given
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The normalized IETF BCP 47 language tag
    ///
    /// ```
    /// use ldgraph::model::LangString;
    ///
    /// assert_eq!(LangString::new("Grüß Gott", "DE_at").language_tag(), "de-AT");
    /// assert_eq!(LangString::new("你好", "zh-hant-tw").language_tag(), "zh-Hant-TW");
    /// ```
    pub fn language_tag(&self) -> String {
        normalize_language_tag(&self.language)
    }

    /// Always `rdf:langString`
    pub fn datatype(&self) -> &str {
        rdf::LANG_STRING
    }

    pub fn matches(&self, condition: Option<&Value>) -> bool {
        match condition {
            None => true,
            Some(Value::LangString(other)) => {
                (other.value.is_empty() || other.value == self.value)
                    && other.language_tag() == self.language_tag()
            }
            Some(Value::Node(node)) => node.describes_literal(rdf::LANG_STRING, &self.value),
            Some(Value::NamedNode(node)) => node.describes_literal(rdf::LANG_STRING, &self.value),
            Some(Value::Literal(_)) | Some(Value::NodeReference(_)) => false,
        }
    }
}

impl PartialEq for LangString {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.language_tag() == other.language_tag()
    }
}

impl Eq for LangString {}

impl Hash for LangString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.language_tag().hash(state);
    }
}

impl fmt::Display for LangString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(f, &self.value)?;
        write!(f, "@{}", self.language_tag())
    }
}

/// Whether a language is acceptable for a [`LangString`]: one or more
/// alphanumeric subtags of at most 8 characters, separated by `-` or `_`,
/// starting with an alphabetic one.
pub(crate) fn is_valid_language(language: &str) -> bool {
    let mut subtags = language.split(['-', '_']);
    let primary_ok = subtags.next().is_some_and(|primary| {
        !primary.is_empty() && primary.len() <= 8 && primary.chars().all(|c| c.is_ascii_alphabetic())
    });
    primary_ok
        && subtags.all(|subtag| {
            !subtag.is_empty() && subtag.len() <= 8 && subtag.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

fn normalize_language_tag(language: &str) -> String {
    let mut tag = Vec::new();
    let mut private_use = false;
    for (position, subtag) in language.split(['-', '_']).enumerate() {
        let lower = subtag.to_ascii_lowercase();
        if position == 0 || private_use {
            private_use |= lower == "x";
            tag.push(lower);
            continue;
        }
        private_use = lower == "x";
        let alphabetic = subtag.chars().all(|c| c.is_ascii_alphabetic());
        let normalized = match subtag.len() {
            2 if alphabetic => subtag.to_ascii_uppercase(),
            4 if alphabetic => {
                let mut chars = lower.chars();
                chars
                    .next()
                    .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                    .unwrap_or_default()
            }
            _ => lower,
        };
        tag.push(normalized);
    }
    tag.join("-")
}

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            _ => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

/// Either kind of literal, as returned by the literal accessors of a
/// [`QueryResult`](crate::result::QueryResult)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyLiteral {
    Typed(Literal),
    Lang(LangString),
}

impl AnyLiteral {
    pub fn value(&self) -> &str {
        match self {
            AnyLiteral::Typed(literal) => literal.value(),
            AnyLiteral::Lang(lang_string) => lang_string.value(),
        }
    }

    pub fn datatype(&self) -> &str {
        match self {
            AnyLiteral::Typed(literal) => literal.datatype(),
            AnyLiteral::Lang(lang_string) => lang_string.datatype(),
        }
    }

    /// The normalized language tag of a language-tagged string
    pub fn language(&self) -> Option<String> {
        match self {
            AnyLiteral::Typed(_) => None,
            AnyLiteral::Lang(lang_string) => Some(lang_string.language_tag()),
        }
    }

    pub fn matches(&self, condition: Option<&Value>) -> bool {
        match self {
            AnyLiteral::Typed(literal) => literal.matches(condition),
            AnyLiteral::Lang(lang_string) => lang_string.matches(condition),
        }
    }
}

impl fmt::Display for AnyLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyLiteral::Typed(literal) => literal.fmt(f),
            AnyLiteral::Lang(lang_string) => lang_string.fmt(f),
        }
    }
}

impl From<Literal> for AnyLiteral {
    fn from(literal: Literal) -> Self {
        AnyLiteral::Typed(literal)
    }
}

impl From<LangString> for AnyLiteral {
    fn from(lang_string: LangString) -> Self {
        AnyLiteral::Lang(lang_string)
    }
}

impl From<AnyLiteral> for Value {
    fn from(literal: AnyLiteral) -> Self {
        match literal {
            AnyLiteral::Typed(literal) => Value::Literal(literal),
            AnyLiteral::Lang(lang_string) => Value::LangString(lang_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    #[test]
    fn test_plain_literal_equivalence() {
        let plain = Literal::plain("Lorem ipsum");
        let rdf_plain = Literal::new("Lorem ipsum", rdf::PLAIN_LITERAL);
        let xsd_string = Literal::new("Lorem ipsum", XmlSchema::String.iri());
        let empty_type = Literal::new("Lorem ipsum", "");

        assert_eq!(plain, rdf_plain);
        assert_eq!(plain, xsd_string);
        assert_eq!(plain, empty_type);
        assert!(plain.is_plain());
        assert_eq!(plain.datatype(), rdf::PLAIN_LITERAL);
        assert_ne!(plain, Literal::new("Lorem ipsum", rdf::HTML));
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::integer(42).to_string(), "42");
        assert_eq!(
            Literal::new("42", XmlSchema::UnsignedByte.iri()).to_string(),
            "42"
        );
        assert_eq!(Literal::plain("Lorem").to_string(), "\"Lorem\"");
        assert_eq!(
            Literal::new("<p/>", rdf::HTML).to_string(),
            "\"<p/>\"^^rdf:HTML"
        );
        assert_eq!(
            Literal::new("true", XmlSchema::Boolean.iri()).to_string(),
            "\"true\"^^xsd:boolean"
        );
        assert_eq!(
            Literal::new("x", "http://example.org/dt").to_string(),
            "\"x\"^^<http://example.org/dt>"
        );
    }

    #[test]
    fn test_literal_matches_literal() {
        let literal = Literal::new("42", XmlSchema::Int.iri());

        assert!(literal.matches(None));
        assert!(literal.matches(Some(&Value::Literal(Literal::new("", XmlSchema::Int.iri())))));
        assert!(literal.matches(Some(&Value::Literal(Literal::new("42", XmlSchema::Int.iri())))));
        assert!(!literal.matches(Some(&Value::Literal(Literal::new("43", XmlSchema::Int.iri())))));
        assert!(!literal.matches(Some(&Value::Literal(Literal::plain("42")))));
    }

    #[test]
    fn test_literal_matches_node() {
        let literal = Literal::new("42", XmlSchema::Int.iri());

        let condition = Node::new();
        condition.put_reference(rdf::TYPE, XmlSchema::Int.iri());
        condition.put_literal(rdf::VALUE, "42");
        assert!(literal.matches(Some(&Value::Node(condition.clone()))));

        condition.put_literal("http://example.org/unit", "cm");
        assert!(!literal.matches(Some(&Value::Node(condition))));

        let wrong_type = Node::new();
        wrong_type.put_reference(rdf::TYPE, XmlSchema::Long.iri());
        assert!(!literal.matches(Some(&Value::Node(wrong_type))));
    }

    #[test]
    fn test_language_tag() {
        assert_eq!(LangString::new("x", "EN").language_tag(), "en");
        assert_eq!(LangString::new("x", "en_gb").language_tag(), "en-GB");
        assert_eq!(LangString::new("x", "sr-latn-rs").language_tag(), "sr-Latn-RS");
        assert_eq!(LangString::new("x", "es-419").language_tag(), "es-419");
        assert_eq!(LangString::new("x", "de-x-Phonebk").language_tag(), "de-x-phonebk");
        assert_eq!(LangString::new("x", "de"), LangString::new("x", "DE"));
    }

    #[test]
    fn test_valid_language() {
        assert!(is_valid_language("la"));
        assert!(is_valid_language("en-US"));
        assert!(is_valid_language("de_AT"));
        assert!(!is_valid_language(""));
        assert!(!is_valid_language("en-"));
        assert!(!is_valid_language("1en"));
        assert!(!is_valid_language("en US"));
    }

    #[test]
    fn test_any_literal() {
        let typed = AnyLiteral::from(Literal::plain("Moby Dick"));
        let lang = AnyLiteral::from(LangString::new("Moby Dick", "en"));

        assert_eq!(typed.value(), "Moby Dick");
        assert_eq!(typed.language(), None);
        assert_eq!(lang.datatype(), rdf::LANG_STRING);
        assert_eq!(lang.language(), Some("en".to_string()));
        assert_eq!(lang.to_string(), "\"Moby Dick\"@en");
    }
}
