//! Core document model for schemadoc.
//!
//! Defines the types every schemadoc consumer depends on:
//! - [`Schema`]: a named, immutable set of property definitions
//! - [`GenericDocument`]: the schema-tagged container of typed property arrays
//! - [`PropertyValues`]: the typed value array stored under one property
//! - [`validate_document`]: checks a document against its schema
//! - [`SetSchemaResponse`]: the result of applying a set of schemas, with a
//!   copy-on-rebuild builder
//! - [`codec`]: flat-record encoding of documents
//!
//! Mapping between documents and strongly-typed records lives in
//! `schemadoc-mapper`; this crate knows nothing about record types.

pub mod codec;
mod document;
mod error;
mod response;
mod schema;
mod validate;
mod value;

pub use document::{GenericDocument, GenericDocumentBuilder};
pub use error::{MappingError, MappingResult};
pub use response::{
    MigrationFailure, ResultCode, ResultStatus, SetSchemaResponse, SetSchemaResponseBuilder,
};
pub use schema::{
    Cardinality, JoinableValueType, LongIndexing, PropertyConfig, PropertyKind, Schema,
    SchemaBuilder, StringIndexing, StringOptions, TokenizerType,
};
pub use validate::{
    check_arity, check_document, check_finite, validate_document, validate_document_deep,
};
pub use value::{PropertyValues, ValueKind};
