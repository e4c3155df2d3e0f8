use crate::GenericDocument;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The runtime kind of a property's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    Long,
    Double,
    Boolean,
    Bytes,
    Document,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Long => "long",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Bytes => "bytes",
            Self::Document => "document",
        };
        f.write_str(name)
    }
}

/// A typed array of values stored under one document property.
///
/// Arrays keep insertion order. An empty array is never stored in a
/// [`GenericDocument`] by the mapper; absence is expressed by omitting the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum PropertyValues {
    String(Vec<String>),
    Long(Vec<i64>),
    Double(Vec<f64>),
    Boolean(Vec<bool>),
    Bytes(Vec<Vec<u8>>),
    Document(Vec<GenericDocument>),
}

impl PropertyValues {
    /// Returns the kind of values held.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Long(_) => ValueKind::Long,
            Self::Double(_) => ValueKind::Double,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Document(_) => ValueKind::Document,
        }
    }

    /// Number of values in the array.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::String(v) => v.len(),
            Self::Long(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::Boolean(v) => v.len(),
            Self::Bytes(v) => v.len(),
            Self::Document(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<String>> for PropertyValues {
    fn from(values: Vec<String>) -> Self {
        Self::String(values)
    }
}

impl From<Vec<i64>> for PropertyValues {
    fn from(values: Vec<i64>) -> Self {
        Self::Long(values)
    }
}

impl From<Vec<f64>> for PropertyValues {
    fn from(values: Vec<f64>) -> Self {
        Self::Double(values)
    }
}

impl From<Vec<bool>> for PropertyValues {
    fn from(values: Vec<bool>) -> Self {
        Self::Boolean(values)
    }
}

impl From<Vec<Vec<u8>>> for PropertyValues {
    fn from(values: Vec<Vec<u8>>) -> Self {
        Self::Bytes(values)
    }
}

impl From<Vec<GenericDocument>> for PropertyValues {
    fn from(values: Vec<GenericDocument>) -> Self {
        Self::Document(values)
    }
}
