//! Outcome of applying a set of schemas.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status code attached to a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCode {
    Ok,
    Unknown,
    InternalError,
    InvalidArgument,
    IoError,
    OutOfSpace,
    NotFound,
    InvalidSchema,
    SecurityError,
}

/// A result code with an optional human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultStatus {
    pub code: ResultCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResultStatus {
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            code: ResultCode::Ok,
            message: None,
        }
    }

    pub fn failed(code: ResultCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == ResultCode::Ok
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{:?}: {message}", self.code),
            None => write!(f, "{:?}", self.code),
        }
    }
}

/// A document that could not be migrated to its new schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationFailure {
    pub namespace: String,
    pub document_id: String,
    pub schema_type: String,
    pub status: ResultStatus,
}

impl MigrationFailure {
    pub fn new(
        namespace: impl Into<String>,
        document_id: impl Into<String>,
        schema_type: impl Into<String>,
        status: ResultStatus,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            document_id: document_id.into(),
            schema_type: schema_type.into(),
            status,
        }
    }
}

/// Schema types affected by a set-schema call, plus any migration failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSchemaResponse {
    deleted_types: Vec<String>,
    incompatible_types: Vec<String>,
    migrated_types: Vec<String>,
    migration_failures: Vec<MigrationFailure>,
}

impl SetSchemaResponse {
    pub fn builder() -> SetSchemaResponseBuilder {
        SetSchemaResponseBuilder::new()
    }

    /// Schema types removed by the call.
    #[must_use]
    pub fn deleted_types(&self) -> &[String] {
        &self.deleted_types
    }

    /// Schema types whose new definition is incompatible with stored data.
    #[must_use]
    pub fn incompatible_types(&self) -> &[String] {
        &self.incompatible_types
    }

    /// Schema types whose documents were migrated.
    #[must_use]
    pub fn migrated_types(&self) -> &[String] {
        &self.migrated_types
    }

    #[must_use]
    pub fn migration_failures(&self) -> &[MigrationFailure] {
        &self.migration_failures
    }
}

/// Builds a [`SetSchemaResponse`].
///
/// Type names keep first-insertion order; adding a name already present is
/// a no-op. Failures are kept in the order added.
#[derive(Debug, Clone, Default)]
pub struct SetSchemaResponseBuilder {
    response: SetSchemaResponse,
}

impl SetSchemaResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the builder with a copy of `original`. The original is never
    /// modified by anything done through the builder.
    pub fn from_response(original: &SetSchemaResponse) -> Self {
        Self {
            response: original.clone(),
        }
    }

    #[must_use]
    pub fn add_deleted_type(mut self, schema_type: impl Into<String>) -> Self {
        push_unique(&mut self.response.deleted_types, schema_type.into());
        self
    }

    #[must_use]
    pub fn add_deleted_types<I, S>(self, schema_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        schema_types
            .into_iter()
            .fold(self, |builder, t| builder.add_deleted_type(t))
    }

    #[must_use]
    pub fn add_incompatible_type(mut self, schema_type: impl Into<String>) -> Self {
        push_unique(&mut self.response.incompatible_types, schema_type.into());
        self
    }

    #[must_use]
    pub fn add_incompatible_types<I, S>(self, schema_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        schema_types
            .into_iter()
            .fold(self, |builder, t| builder.add_incompatible_type(t))
    }

    #[must_use]
    pub fn add_migrated_type(mut self, schema_type: impl Into<String>) -> Self {
        push_unique(&mut self.response.migrated_types, schema_type.into());
        self
    }

    #[must_use]
    pub fn add_migrated_types<I, S>(self, schema_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        schema_types
            .into_iter()
            .fold(self, |builder, t| builder.add_migrated_type(t))
    }

    #[must_use]
    pub fn add_migration_failure(mut self, failure: MigrationFailure) -> Self {
        self.response.migration_failures.push(failure);
        self
    }

    #[must_use]
    pub fn add_migration_failures(
        mut self,
        failures: impl IntoIterator<Item = MigrationFailure>,
    ) -> Self {
        self.response.migration_failures.extend(failures);
        self
    }

    #[must_use]
    pub fn build(self) -> SetSchemaResponse {
        self.response
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}
