//! References to identified resources

use std::fmt;

use super::Value;

/// An opaque IRI identifying a resource inside or outside the dataset.
/// Two references are equal if their identifiers are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeReference {
    identifier: String,
}

impl NodeReference {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// A reference matches an absent condition, or a condition naming the
    /// same resource.
    pub fn matches(&self, condition: Option<&Value>) -> bool {
        match condition {
            None => true,
            Some(condition) => condition.identifier() == Some(self.identifier.as_str()),
        }
    }
}

impl fmt::Display for NodeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.identifier)
    }
}

impl From<&str> for NodeReference {
    fn from(identifier: &str) -> Self {
        Self::new(identifier)
    }
}
