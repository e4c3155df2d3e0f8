use crate::{
    ClassDescriptor, DocumentClass, DocumentClassMap, MapperConfig, PropertyReader,
    PropertyWriter, transitive_dependencies,
};
use schemadoc_model::{GenericDocument, MappingError, MappingResult, Schema, check_document, codec};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Converts between records of type `T` and [`GenericDocument`]s, bound to
/// `T`'s schema.
///
/// A mapper holds nothing but its immutable schema and configuration, so it
/// can be cloned cheaply and shared between threads.
pub struct DocumentMapper<T> {
    schema: Arc<Schema>,
    config: MapperConfig,
    _class: PhantomData<fn() -> T>,
}

impl<T: DocumentClass> DocumentMapper<T> {
    /// Builds `T`'s schema with the default configuration.
    pub fn new() -> MappingResult<Self> {
        Self::with_config(MapperConfig::default())
    }

    pub fn with_config(config: MapperConfig) -> MappingResult<Self> {
        Self::bind(Arc::new(T::schema()?), config)
    }

    /// Binds an already-built schema, checking it belongs to `T`.
    pub(crate) fn bind(schema: Arc<Schema>, config: MapperConfig) -> MappingResult<Self> {
        if schema.schema_type() != T::SCHEMA_NAME {
            return Err(MappingError::InvalidSchema(format!(
                "{} declares schema name `{}` but builds `{}`",
                std::any::type_name::<T>(),
                T::SCHEMA_NAME,
                schema.schema_type()
            )));
        }
        Ok(Self {
            schema,
            config,
            _class: PhantomData,
        })
    }

    /// The schema this mapper is bound to.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    #[must_use]
    pub const fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Produces a document holding every populated field of `record`.
    ///
    /// Fails with `CardinalityViolation` when a required field is absent.
    pub fn to_generic_document(&self, record: &T) -> MappingResult<GenericDocument> {
        self.to_document_at(record, 0)
    }

    pub(crate) fn to_document_at(
        &self,
        record: &T,
        depth: usize,
    ) -> MappingResult<GenericDocument> {
        if depth > self.config.max_nesting_depth {
            return Err(MappingError::NestingTooDeep(self.config.max_nesting_depth));
        }
        let mut writer = PropertyWriter::new(
            &self.schema,
            &self.config,
            depth,
            record.namespace(),
            record.id(),
        );
        record.write_properties(&mut writer)?;
        let doc = writer.finish()?;
        debug!(
            schema_type = T::SCHEMA_NAME,
            id = doc.id(),
            properties = doc.properties().len(),
            "record converted to document"
        );
        Ok(doc)
    }

    /// Rebuilds a record from `doc`.
    ///
    /// The document is validated against the bound schema first; nested
    /// documents are resolved through `class_map`.
    pub fn from_generic_document(
        &self,
        doc: &GenericDocument,
        class_map: &DocumentClassMap,
    ) -> MappingResult<T> {
        self.from_document_at(doc, class_map, 0)
    }

    pub(crate) fn from_document_at(
        &self,
        doc: &GenericDocument,
        class_map: &DocumentClassMap,
        depth: usize,
    ) -> MappingResult<T> {
        if depth > self.config.max_nesting_depth {
            return Err(MappingError::NestingTooDeep(self.config.max_nesting_depth));
        }
        check_document(&self.schema, doc, self.config.reject_unknown_properties)?;
        let reader = PropertyReader::new(&self.schema, &self.config, depth, doc, class_map);
        let record = T::read_properties(&reader)?;
        debug!(
            schema_type = T::SCHEMA_NAME,
            id = doc.id(),
            "document converted to record"
        );
        Ok(record)
    }

    /// Every record type `T` transitively references, each once, `T`
    /// excluded. Empty when `T` has no nested documents.
    #[must_use]
    pub fn dependency_classes(&self) -> Vec<ClassDescriptor> {
        transitive_dependencies(ClassDescriptor::of::<T>())
    }

    /// A class map covering `T` and its dependencies.
    #[must_use]
    pub fn class_map(&self) -> DocumentClassMap {
        DocumentClassMap::for_class::<T>()
    }

    /// Converts `record` and encodes the document as a flat record.
    pub fn encode(&self, record: &T) -> MappingResult<Vec<u8>> {
        codec::encode(&self.to_generic_document(record)?)
    }

    /// Decodes a flat record and rebuilds the record from it.
    pub fn decode(&self, bytes: &[u8], class_map: &DocumentClassMap) -> MappingResult<T> {
        let doc = codec::decode(bytes)?;
        self.from_generic_document(&doc, class_map)
    }
}

impl<T> Clone for DocumentMapper<T> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            config: self.config.clone(),
            _class: PhantomData,
        }
    }
}

impl<T> fmt::Debug for DocumentMapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentMapper")
            .field("record", &std::any::type_name::<T>())
            .field("schema_type", &self.schema.schema_type())
            .finish()
    }
}
