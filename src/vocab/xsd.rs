//! XML-Schema datatypes
//!
//! The table reproduces the datatype IRIs together with the inclusive value
//! bounds of the integer family. Bounds are `i128` so that both
//! `xsd:long` and `xsd:unsignedLong` fit.

use std::fmt;

/// The XML-Schema namespace
pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

macro_rules! xml_schema {
    ($( $variant:ident => $local:literal, $min:expr, $max:expr; )*) => {
        /// An XML-Schema datatype
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum XmlSchema {
            $( $variant, )*
        }

        impl XmlSchema {
            /// All datatypes, in IRI order
            pub const ALL: &'static [XmlSchema] = &[$( XmlSchema::$variant, )*];

            /// The full datatype IRI
            pub fn iri(self) -> &'static str {
                match self {
                    $( XmlSchema::$variant => concat!("http://www.w3.org/2001/XMLSchema#", $local), )*
                }
            }

            /// Inclusive lower bound, for bounded integer types
            pub fn minimum(self) -> Option<i128> {
                match self {
                    $( XmlSchema::$variant => $min, )*
                }
            }

            /// Inclusive upper bound, for bounded integer types
            pub fn maximum(self) -> Option<i128> {
                match self {
                    $( XmlSchema::$variant => $max, )*
                }
            }
        }
    };
}

xml_schema! {
    AnyUri => "anyURI", None, None;
    Base64Binary => "base64Binary", None, None;
    Boolean => "boolean", None, None;
    Byte => "byte", Some(-128), Some(127);
    Date => "date", None, None;
    DateTime => "dateTime", None, None;
    Decimal => "decimal", None, None;
    Double => "double", None, None;
    Duration => "duration", None, None;
    Entities => "ENTITIES", None, None;
    Entity => "ENTITY", None, None;
    Float => "float", None, None;
    GDay => "gDay", None, None;
    GMonth => "gMonth", None, None;
    GMonthDay => "gMonthDay", None, None;
    GYear => "gYear", None, None;
    GYearMonth => "gYearMonth", None, None;
    HexBinary => "hexBinary", None, None;
    Id => "ID", None, None;
    IdRef => "IDREF", None, None;
    IdRefs => "IDREFS", None, None;
    Int => "int", Some(-2_147_483_648), Some(2_147_483_647);
    Integer => "integer", None, None;
    Language => "language", None, None;
    Long => "long", Some(-9_223_372_036_854_775_808), Some(9_223_372_036_854_775_807);
    Name => "Name", None, None;
    NcName => "NCName", None, None;
    NegativeInteger => "negativeInteger", None, Some(-1);
    NmToken => "NMTOKEN", None, None;
    NmTokens => "NMTOKENS", None, None;
    NonNegativeInteger => "nonNegativeInteger", Some(0), None;
    NonPositiveInteger => "nonPositiveInteger", None, Some(0);
    NormalizedString => "normalizedString", None, None;
    Notation => "NOTATION", None, None;
    PositiveInteger => "positiveInteger", Some(1), None;
    QName => "QName", None, None;
    Short => "short", Some(-32_768), Some(32_767);
    String => "string", None, None;
    Time => "time", None, None;
    Token => "token", None, None;
    UnsignedByte => "unsignedByte", Some(0), Some(255);
    UnsignedInt => "unsignedInt", Some(0), Some(4_294_967_295);
    UnsignedLong => "unsignedLong", Some(0), Some(18_446_744_073_709_551_615);
    UnsignedShort => "unsignedShort", Some(0), Some(65_535);
}

impl XmlSchema {
    /// Looks up a datatype by its full IRI.
    pub fn from_iri(iri: &str) -> Option<Self> {
        let local = iri.strip_prefix(NAMESPACE)?;
        Self::ALL
            .iter()
            .copied()
            .find(|datatype| &datatype.iri()[NAMESPACE.len()..] == local)
    }

    /// Whether values of this type are whole numbers.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            XmlSchema::Byte
                | XmlSchema::Int
                | XmlSchema::Integer
                | XmlSchema::Long
                | XmlSchema::NegativeInteger
                | XmlSchema::NonNegativeInteger
                | XmlSchema::NonPositiveInteger
                | XmlSchema::PositiveInteger
                | XmlSchema::Short
                | XmlSchema::UnsignedByte
                | XmlSchema::UnsignedInt
                | XmlSchema::UnsignedLong
                | XmlSchema::UnsignedShort
        )
    }

    /// Whether `value` lies within the inclusive bounds of this type.
    /// Unbounded sides always pass.
    pub fn admits(self, value: i128) -> bool {
        self.minimum().map_or(true, |min| value >= min)
            && self.maximum().map_or(true, |max| value <= max)
    }
}

/// Inclusive lower bound of the datatype with the given IRI
pub fn get_minimum(datatype: &str) -> Option<i128> {
    XmlSchema::from_iri(datatype).and_then(XmlSchema::minimum)
}

/// Inclusive upper bound of the datatype with the given IRI
pub fn get_maximum(datatype: &str) -> Option<i128> {
    XmlSchema::from_iri(datatype).and_then(XmlSchema::maximum)
}

impl fmt::Display for XmlSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xsd:{}", &self.iri()[NAMESPACE.len()..])
    }
}
