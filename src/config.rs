//! Writer configuration
//!
//! ```yaml
//! format: turtle
//! recursion: root_only
//! indent: 4
//! prefixes:
//!   mods: "http://www.loc.gov/mods/v3#"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::rdf::{RdfFormat, Recursion};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings of an [`RdfWriter`](crate::rdf::RdfWriter)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Output format, by conventional name
    pub format: RdfFormat,
    /// How far named nodes are written out
    pub recursion: Recursion,
    /// Indentation width; `null` for none
    pub indent: Option<usize>,
    /// Prefix → namespace, in addition to `rdf` and `rdfs`
    pub prefixes: BTreeMap<String, String>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            format: RdfFormat::Turtle,
            recursion: Recursion::Always,
            indent: Some(2),
            prefixes: BTreeMap::new(),
        }
    }
}

impl WriterConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
