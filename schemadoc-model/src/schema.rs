use crate::{MappingError, MappingResult, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Describes a document type: its name and the properties it may carry.
///
/// A `Schema` is only obtainable through [`SchemaBuilder::build`] (or
/// deserialization, which goes through the same checks), so property names
/// are always unique and the schema is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDef", into = "SchemaDef")]
pub struct Schema {
    schema_type: String,
    properties: Vec<PropertyConfig>,
}

impl Schema {
    /// Starts building a schema with the given type name.
    pub fn builder(schema_type: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(schema_type)
    }

    /// The schema type name documents are tagged with.
    #[must_use]
    pub fn schema_type(&self) -> &str {
        &self.schema_type
    }

    /// Property definitions in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyConfig] {
        &self.properties
    }

    /// Looks up a property definition by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyConfig> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Whether documents stored under `previous` remain valid under `self`.
    ///
    /// A change is incompatible when it removes a property, changes a
    /// property's value kind or nested schema type, tightens a cardinality,
    /// or adds a new required property.
    #[must_use]
    pub fn is_compatible_with(&self, previous: &Self) -> bool {
        let retained = previous.properties.iter().all(|old| {
            self.property(&old.name).is_some_and(|new| {
                new.value_kind() == old.value_kind()
                    && nested_type(&new.kind) == nested_type(&old.kind)
                    && new.cardinality.admits(old.cardinality)
            })
        });
        let no_new_required = self.properties.iter().all(|new| {
            new.cardinality != Cardinality::Required || previous.property(&new.name).is_some()
        });
        retained && no_new_required
    }

    /// Schema types referenced by document-kind properties, first occurrence
    /// order, without duplicates.
    #[must_use]
    pub fn referenced_schema_types(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.properties
            .iter()
            .filter_map(|p| match &p.kind {
                PropertyKind::Document { schema_type, .. } => Some(schema_type.as_str()),
                _ => None,
            })
            .filter(|s| seen.insert(*s))
            .collect()
    }
}

/// Incrementally assembles a [`Schema`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    schema_type: String,
    properties: Vec<PropertyConfig>,
}

impl SchemaBuilder {
    pub fn new(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: schema_type.into(),
            properties: Vec::new(),
        }
    }

    /// Appends a property definition.
    #[must_use]
    pub fn add_property(mut self, property: PropertyConfig) -> Self {
        self.properties.push(property);
        self
    }

    /// Validates and freezes the schema.
    pub fn build(self) -> MappingResult<Schema> {
        if self.schema_type.is_empty() {
            return Err(MappingError::InvalidSchema(
                "schema type name must not be empty".into(),
            ));
        }

        let mut names = HashSet::new();
        for property in &self.properties {
            if property.name.is_empty() {
                return Err(MappingError::InvalidSchema(format!(
                    "`{}` declares a property with an empty name",
                    self.schema_type
                )));
            }
            if !names.insert(property.name.as_str()) {
                return Err(MappingError::InvalidSchema(format!(
                    "`{}` declares property `{}` more than once",
                    self.schema_type, property.name
                )));
            }
            property.check(&self.schema_type)?;
        }

        Ok(Schema {
            schema_type: self.schema_type,
            properties: self.properties,
        })
    }
}

/// Serialized shape of a schema; `property` matches the TOML
/// `[[schema.property]]` table array.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SchemaDef {
    name: String,
    #[serde(default, rename = "property", alias = "properties")]
    properties: Vec<PropertyConfig>,
}

impl TryFrom<SchemaDef> for Schema {
    type Error = MappingError;

    fn try_from(def: SchemaDef) -> Result<Self, Self::Error> {
        def.properties
            .into_iter()
            .fold(SchemaBuilder::new(def.name), SchemaBuilder::add_property)
            .build()
    }
}

impl From<Schema> for SchemaDef {
    fn from(schema: Schema) -> Self {
        Self {
            name: schema.schema_type,
            properties: schema.properties,
        }
    }
}

/// A single property definition within a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyConfig {
    pub name: String,
    #[serde(default)]
    pub cardinality: Cardinality,
    #[serde(flatten)]
    pub kind: PropertyKind,
}

impl PropertyConfig {
    fn simple(name: &str, cardinality: Cardinality, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            cardinality,
            kind,
        }
    }

    /// Shorthand for a string property with no tokenization or indexing.
    pub fn string(name: &str, cardinality: Cardinality) -> Self {
        Self::simple(name, cardinality, PropertyKind::String(StringOptions::default()))
    }

    /// Shorthand for a string property with explicit options.
    pub fn string_with(name: &str, cardinality: Cardinality, options: StringOptions) -> Self {
        Self::simple(name, cardinality, PropertyKind::String(options))
    }

    /// Shorthand for an unindexed 64-bit integer property.
    pub fn long(name: &str, cardinality: Cardinality) -> Self {
        Self::long_with(name, cardinality, LongIndexing::None)
    }

    /// Shorthand for a 64-bit integer property with an indexing mode.
    pub fn long_with(name: &str, cardinality: Cardinality, indexing: LongIndexing) -> Self {
        Self::simple(name, cardinality, PropertyKind::Long { indexing })
    }

    /// Shorthand for a double property.
    pub fn double(name: &str, cardinality: Cardinality) -> Self {
        Self::simple(name, cardinality, PropertyKind::Double)
    }

    /// Shorthand for a boolean property.
    pub fn boolean(name: &str, cardinality: Cardinality) -> Self {
        Self::simple(name, cardinality, PropertyKind::Boolean)
    }

    /// Shorthand for a byte-array property.
    pub fn bytes(name: &str, cardinality: Cardinality) -> Self {
        Self::simple(name, cardinality, PropertyKind::Bytes)
    }

    /// Shorthand for a nested document property whose nested properties are
    /// not indexed.
    pub fn document(name: &str, schema_type: &str, cardinality: Cardinality) -> Self {
        Self::document_with(name, schema_type, cardinality, false)
    }

    /// Shorthand for a nested document property.
    pub fn document_with(
        name: &str,
        schema_type: &str,
        cardinality: Cardinality,
        index_nested_properties: bool,
    ) -> Self {
        Self::simple(
            name,
            cardinality,
            PropertyKind::Document {
                schema_type: schema_type.into(),
                index_nested_properties,
            },
        )
    }

    /// The value kind documents must store under this property.
    #[must_use]
    pub const fn value_kind(&self) -> ValueKind {
        self.kind.value_kind()
    }

    fn check(&self, schema_type: &str) -> MappingResult<()> {
        match &self.kind {
            PropertyKind::String(options) => {
                if options.tokenizer == TokenizerType::None
                    && options.indexing != StringIndexing::None
                {
                    return Err(MappingError::InvalidSchema(format!(
                        "`{schema_type}.{}` is indexed but has no tokenizer",
                        self.name
                    )));
                }
                if options.joinable == JoinableValueType::QualifiedId
                    && self.cardinality == Cardinality::Repeated
                {
                    return Err(MappingError::InvalidSchema(format!(
                        "`{schema_type}.{}` is joinable and cannot be repeated",
                        self.name
                    )));
                }
            }
            PropertyKind::Document {
                schema_type: nested,
                ..
            } if nested.is_empty() => {
                return Err(MappingError::InvalidSchema(format!(
                    "`{schema_type}.{}` references an unnamed schema",
                    self.name
                )));
            }
            _ => {}
        }
        Ok(())
    }
}

/// How many values a property may hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Any number of values, including none.
    Repeated,
    /// Zero or one value.
    #[default]
    Optional,
    /// Exactly one value.
    Required,
}

impl Cardinality {
    /// Whether every value count allowed by `other` is also allowed by `self`.
    #[must_use]
    pub const fn admits(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Repeated, _)
                | (Self::Optional, Self::Optional | Self::Required)
                | (Self::Required, Self::Required)
        )
    }
}

fn nested_type(kind: &PropertyKind) -> Option<&str> {
    match kind {
        PropertyKind::Document { schema_type, .. } => Some(schema_type.as_str()),
        _ => None,
    }
}

/// The value kind of a property together with its kind-specific options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyKind {
    String(StringOptions),
    Long {
        #[serde(default)]
        indexing: LongIndexing,
    },
    Double,
    Boolean,
    Bytes,
    Document {
        schema_type: String,
        #[serde(default)]
        index_nested_properties: bool,
    },
}

impl PropertyKind {
    #[must_use]
    pub const fn value_kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Long { .. } => ValueKind::Long,
            Self::Double => ValueKind::Double,
            Self::Boolean => ValueKind::Boolean,
            Self::Bytes => ValueKind::Bytes,
            Self::Document { .. } => ValueKind::Document,
        }
    }
}

/// Options of a string property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringOptions {
    pub tokenizer: TokenizerType,
    pub indexing: StringIndexing,
    pub joinable: JoinableValueType,
}

impl StringOptions {
    /// Plain-tokenized, prefix-indexed text: the usual full-text setup.
    #[must_use]
    pub const fn searchable() -> Self {
        Self {
            tokenizer: TokenizerType::Plain,
            indexing: StringIndexing::Prefixes,
            joinable: JoinableValueType::None,
        }
    }

    /// A qualified id another document can be joined on.
    #[must_use]
    pub const fn qualified_id() -> Self {
        Self {
            tokenizer: TokenizerType::None,
            indexing: StringIndexing::None,
            joinable: JoinableValueType::QualifiedId,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerType {
    #[default]
    None,
    Plain,
    Verbatim,
    Rfc822,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringIndexing {
    #[default]
    None,
    ExactTerms,
    Prefixes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinableValueType {
    #[default]
    None,
    QualifiedId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongIndexing {
    #[default]
    None,
    Range,
}
