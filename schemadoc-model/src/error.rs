//! Error types for schema construction and document mapping.

use thiserror::Error;

/// Result type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;

/// Errors raised while building schemas or converting documents.
///
/// Every failure is returned to the caller as-is; a failed conversion never
/// yields a partially populated value.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A document references a property the schema does not declare, carries
    /// the wrong schema tag, or holds values of the wrong kind.
    #[error("schema mismatch in `{schema_type}`: {detail}")]
    SchemaMismatch { schema_type: String, detail: String },

    /// A required property is missing, or a single-valued property holds
    /// more than one value.
    #[error("cardinality violation on `{schema_type}.{property}`: {detail}")]
    CardinalityViolation {
        schema_type: String,
        property: String,
        detail: String,
    },

    /// A double property holds NaN or an infinity, which documents cannot
    /// carry.
    #[error("non-finite value in `{schema_type}.{property}`")]
    NonFiniteValue {
        schema_type: String,
        property: String,
    },

    /// A nested document's schema could not be resolved.
    #[error("missing dependency: no document class available for schema `{0}`")]
    MissingDependency(String),

    /// The schema definition itself is malformed.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// Two different definitions were offered under one schema name.
    #[error("conflicting definitions for schema `{0}`")]
    SchemaConflict(String),

    /// Nested documents exceeded the configured depth.
    #[error("document nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MappingError {
    /// Builds a [`MappingError::SchemaMismatch`].
    pub fn mismatch(schema_type: &str, detail: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            schema_type: schema_type.to_string(),
            detail: detail.into(),
        }
    }

    /// Builds a [`MappingError::CardinalityViolation`].
    pub fn cardinality(schema_type: &str, property: &str, detail: impl Into<String>) -> Self {
        Self::CardinalityViolation {
            schema_type: schema_type.to_string(),
            property: property.to_string(),
            detail: detail.into(),
        }
    }
}
