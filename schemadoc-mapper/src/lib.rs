//! Mapping between strongly-typed records and [`GenericDocument`]s.
//!
//! A record type implements [`DocumentClass`] once, declaring its schema and
//! how its fields are written to and read from document properties. A
//! [`DocumentMapper`] binds that implementation to the validated schema and
//! performs the conversions:
//!
//! - [`DocumentMapper::to_generic_document`] copies only populated fields;
//!   absent options and empty collections produce no property at all.
//! - [`DocumentMapper::from_generic_document`] validates the document against
//!   the schema and rebuilds the record, resolving nested records through a
//!   [`DocumentClassMap`].
//! - [`DocumentMapper::dependency_classes`] lists every record type reachable
//!   through nested-document properties.
//!
//! [`MapperRegistry`] is the runtime table that ties schema names to record
//! types, and [`SchemaCatalog`] loads declarative schemas and
//! [`MapperConfig`] from TOML.

mod catalog;
mod class;
mod config;
mod convert;
mod mapper;
mod property;
mod registry;

pub use catalog::SchemaCatalog;
pub use class::{ClassDescriptor, DocumentClass, DocumentClassMap, transitive_dependencies};
pub use config::MapperConfig;
pub use convert::{ConvertError, FromPropertyValues, IntoPropertyValues};
pub use mapper::DocumentMapper;
pub use property::{PropertyReader, PropertyWriter};
pub use registry::MapperRegistry;

pub use schemadoc_model::{
    Cardinality, GenericDocument, MappingError, MappingResult, PropertyConfig, PropertyValues,
    Schema, ValueKind,
};
