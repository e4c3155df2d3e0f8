use crate::PropertyValues;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A schema-tagged document keyed by `(namespace, id)`.
///
/// All record data flows through this type. Each property maps to a typed
/// value array; the structure is defined by the schema named in
/// `schema_type`. Documents are immutable: use [`GenericDocument::to_builder`]
/// to derive a modified copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericDocument {
    namespace: String,
    id: String,
    schema_type: String,
    #[serde(default)]
    creation_timestamp_millis: i64,
    #[serde(default)]
    ttl_millis: i64,
    #[serde(default)]
    score: i32,
    #[serde(default)]
    properties: BTreeMap<String, PropertyValues>,
}

impl GenericDocument {
    /// Starts building a document.
    pub fn builder(
        namespace: impl Into<String>,
        id: impl Into<String>,
        schema_type: impl Into<String>,
    ) -> GenericDocumentBuilder {
        GenericDocumentBuilder::new(namespace, id, schema_type)
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn schema_type(&self) -> &str {
        &self.schema_type
    }

    #[must_use]
    pub const fn creation_timestamp_millis(&self) -> i64 {
        self.creation_timestamp_millis
    }

    /// Time-to-live in milliseconds; 0 means the document never expires.
    #[must_use]
    pub const fn ttl_millis(&self) -> i64 {
        self.ttl_millis
    }

    #[must_use]
    pub const fn score(&self) -> i32 {
        self.score
    }

    /// All populated properties, ordered by name.
    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<String, PropertyValues> {
        &self.properties
    }

    /// Names of populated properties, ordered.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Raw value array stored under `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValues> {
        self.properties.get(name)
    }

    /// Whether `name` is populated.
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Extract a string array. `None` if absent or not a string property.
    #[must_use]
    pub fn property_string_array(&self, name: &str) -> Option<&[String]> {
        match self.property(name)? {
            PropertyValues::String(v) => Some(v),
            _ => None,
        }
    }

    /// Extract the first string value.
    #[must_use]
    pub fn property_string(&self, name: &str) -> Option<&str> {
        self.property_string_array(name)?.first().map(String::as_str)
    }

    /// Extract a long array. `None` if absent or not a long property.
    #[must_use]
    pub fn property_long_array(&self, name: &str) -> Option<&[i64]> {
        match self.property(name)? {
            PropertyValues::Long(v) => Some(v),
            _ => None,
        }
    }

    /// Extract the first long value.
    #[must_use]
    pub fn property_long(&self, name: &str) -> Option<i64> {
        self.property_long_array(name)?.first().copied()
    }

    /// Extract a double array. `None` if absent or not a double property.
    #[must_use]
    pub fn property_double_array(&self, name: &str) -> Option<&[f64]> {
        match self.property(name)? {
            PropertyValues::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Extract the first double value.
    #[must_use]
    pub fn property_double(&self, name: &str) -> Option<f64> {
        self.property_double_array(name)?.first().copied()
    }

    /// Extract a boolean array. `None` if absent or not a boolean property.
    #[must_use]
    pub fn property_boolean_array(&self, name: &str) -> Option<&[bool]> {
        match self.property(name)? {
            PropertyValues::Boolean(v) => Some(v),
            _ => None,
        }
    }

    /// Extract the first boolean value.
    #[must_use]
    pub fn property_boolean(&self, name: &str) -> Option<bool> {
        self.property_boolean_array(name)?.first().copied()
    }

    /// Extract a byte-array array. `None` if absent or not a bytes property.
    #[must_use]
    pub fn property_bytes_array(&self, name: &str) -> Option<&[Vec<u8>]> {
        match self.property(name)? {
            PropertyValues::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Extract the first byte array.
    #[must_use]
    pub fn property_bytes(&self, name: &str) -> Option<&[u8]> {
        self.property_bytes_array(name)?.first().map(Vec::as_slice)
    }

    /// Extract nested documents. `None` if absent or not a document property.
    #[must_use]
    pub fn property_document_array(&self, name: &str) -> Option<&[Self]> {
        match self.property(name)? {
            PropertyValues::Document(v) => Some(v),
            _ => None,
        }
    }

    /// Extract the first nested document.
    #[must_use]
    pub fn property_document(&self, name: &str) -> Option<&Self> {
        self.property_document_array(name)?.first()
    }

    /// Returns a builder seeded with a copy of this document.
    ///
    /// Changes made through the builder never affect `self`.
    #[must_use]
    pub fn to_builder(&self) -> GenericDocumentBuilder {
        GenericDocumentBuilder { doc: self.clone() }
    }
}

/// Builds a [`GenericDocument`].
#[derive(Debug, Clone)]
pub struct GenericDocumentBuilder {
    doc: GenericDocument,
}

impl GenericDocumentBuilder {
    pub fn new(
        namespace: impl Into<String>,
        id: impl Into<String>,
        schema_type: impl Into<String>,
    ) -> Self {
        Self {
            doc: GenericDocument {
                namespace: namespace.into(),
                id: id.into(),
                schema_type: schema_type.into(),
                creation_timestamp_millis: 0,
                ttl_millis: 0,
                score: 0,
                properties: BTreeMap::new(),
            },
        }
    }

    #[must_use]
    pub fn creation_timestamp_millis(mut self, millis: i64) -> Self {
        self.doc.creation_timestamp_millis = millis;
        self
    }

    #[must_use]
    pub fn ttl_millis(mut self, millis: i64) -> Self {
        self.doc.ttl_millis = millis;
        self
    }

    #[must_use]
    pub fn score(mut self, score: i32) -> Self {
        self.doc.score = score;
        self
    }

    /// Stores `values` under `name`, replacing any previous array.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, values: impl Into<PropertyValues>) -> Self {
        self.set_property(name, values);
        self
    }

    /// In-place form of [`GenericDocumentBuilder::property`].
    pub fn set_property(&mut self, name: impl Into<String>, values: impl Into<PropertyValues>) {
        self.doc.properties.insert(name.into(), values.into());
    }

    #[must_use]
    pub fn property_string<I, S>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        self.property(name, values)
    }

    #[must_use]
    pub fn property_long(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = i64>,
    ) -> Self {
        self.property(name, values.into_iter().collect::<Vec<_>>())
    }

    #[must_use]
    pub fn property_double(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = f64>,
    ) -> Self {
        self.property(name, values.into_iter().collect::<Vec<_>>())
    }

    #[must_use]
    pub fn property_boolean(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = bool>,
    ) -> Self {
        self.property(name, values.into_iter().collect::<Vec<_>>())
    }

    #[must_use]
    pub fn property_bytes(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = Vec<u8>>,
    ) -> Self {
        self.property(name, values.into_iter().collect::<Vec<_>>())
    }

    #[must_use]
    pub fn property_document(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = GenericDocument>,
    ) -> Self {
        self.property(name, values.into_iter().collect::<Vec<_>>())
    }

    /// Removes `name` if present.
    #[must_use]
    pub fn clear_property(mut self, name: &str) -> Self {
        self.doc.properties.remove(name);
        self
    }

    #[must_use]
    pub fn build(self) -> GenericDocument {
        self.doc
    }
}
