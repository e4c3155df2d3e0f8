//! Field-level access handed to [`DocumentClass`] implementations.

use crate::{
    ConvertError, DocumentClass, DocumentClassMap, DocumentMapper, FromPropertyValues,
    IntoPropertyValues, MapperConfig,
};
use schemadoc_model::{
    Cardinality, GenericDocument, GenericDocumentBuilder, MappingError, MappingResult,
    PropertyConfig, PropertyKind, PropertyValues, Schema, ValueKind, check_arity, check_finite,
};
use std::collections::HashSet;

/// Collects a record's fields into a document, enforcing the bound schema.
///
/// Each property may be written once per record; a second write of the same
/// name, present or absent, is a [`MappingError::SchemaMismatch`].
pub struct PropertyWriter<'a> {
    schema: &'a Schema,
    config: &'a MapperConfig,
    depth: usize,
    written: HashSet<&'a str>,
    builder: GenericDocumentBuilder,
}

impl<'a> PropertyWriter<'a> {
    pub(crate) fn new(
        schema: &'a Schema,
        config: &'a MapperConfig,
        depth: usize,
        namespace: &str,
        id: &str,
    ) -> Self {
        Self {
            schema,
            config,
            depth,
            written: HashSet::new(),
            builder: GenericDocumentBuilder::new(namespace, id, schema.schema_type()),
        }
    }

    /// Writes a field if it is present.
    ///
    /// An absent `Option` or an empty `Vec` leaves the property out of the
    /// document entirely.
    pub fn put<V>(&mut self, name: &str, value: &V) -> MappingResult<()>
    where
        V: IntoPropertyValues + ?Sized,
    {
        let config = self.claim(name)?;
        match value.to_property_values() {
            Some(values) => self.store(config, values),
            None => Ok(()),
        }
    }

    /// Writes an optional nested record.
    pub fn put_document<N: DocumentClass>(
        &mut self,
        name: &str,
        value: Option<&N>,
    ) -> MappingResult<()> {
        match value {
            Some(record) => self.put_documents(name, std::slice::from_ref(record)),
            None => self.claim(name).map(|_| ()),
        }
    }

    /// Writes nested records in order. An empty slice writes nothing.
    pub fn put_documents<N: DocumentClass>(
        &mut self,
        name: &str,
        values: &[N],
    ) -> MappingResult<()> {
        let config = self.claim(name)?;
        if values.is_empty() {
            return Ok(());
        }
        let mapper = DocumentMapper::<N>::with_config(self.config.clone())?;
        let docs = values
            .iter()
            .map(|record| mapper.to_document_at(record, self.depth + 1))
            .collect::<MappingResult<Vec<_>>>()?;
        self.store(config, PropertyValues::Document(docs))
    }

    /// Looks up `name` and marks it written.
    fn claim(&mut self, name: &str) -> MappingResult<&'a PropertyConfig> {
        let schema = self.schema;
        let config = schema.property(name).ok_or_else(|| {
            MappingError::mismatch(
                schema.schema_type(),
                format!("record writes undeclared property `{name}`"),
            )
        })?;
        if !self.written.insert(config.name.as_str()) {
            return Err(MappingError::mismatch(
                schema.schema_type(),
                format!("record writes property `{name}` more than once"),
            ));
        }
        Ok(config)
    }

    fn store(&mut self, config: &PropertyConfig, values: PropertyValues) -> MappingResult<()> {
        let schema_type = self.schema.schema_type();
        if values.kind() != config.value_kind() {
            return Err(MappingError::mismatch(
                schema_type,
                format!(
                    "property `{}` is declared {} but the record supplies {} values",
                    config.name,
                    config.value_kind(),
                    values.kind()
                ),
            ));
        }
        check_arity(schema_type, &config.name, config.cardinality, values.len())?;
        check_finite(schema_type, &config.name, &values)?;
        if let (
            PropertyKind::Document {
                schema_type: expected,
                ..
            },
            PropertyValues::Document(docs),
        ) = (&config.kind, &values)
        {
            if let Some(doc) = docs.iter().find(|d| d.schema_type() != expected.as_str()) {
                return Err(MappingError::mismatch(
                    schema_type,
                    format!(
                        "property `{}` expects `{expected}` documents, the record supplies `{}`",
                        config.name,
                        doc.schema_type()
                    ),
                ));
            }
        }
        self.builder.set_property(config.name.as_str(), values);
        Ok(())
    }

    pub(crate) fn finish(self) -> MappingResult<GenericDocument> {
        let doc = self.builder.build();
        let missing = self
            .schema
            .properties()
            .iter()
            .find(|p| p.cardinality == Cardinality::Required && !doc.has_property(&p.name));
        if let Some(property) = missing {
            return Err(MappingError::cardinality(
                self.schema.schema_type(),
                &property.name,
                "required field is absent on the record",
            ));
        }
        Ok(doc)
    }
}

/// Reads fields out of a validated document.
pub struct PropertyReader<'a> {
    schema: &'a Schema,
    config: &'a MapperConfig,
    depth: usize,
    document: &'a GenericDocument,
    class_map: &'a DocumentClassMap,
}

impl<'a> PropertyReader<'a> {
    pub(crate) const fn new(
        schema: &'a Schema,
        config: &'a MapperConfig,
        depth: usize,
        document: &'a GenericDocument,
        class_map: &'a DocumentClassMap,
    ) -> Self {
        Self {
            schema,
            config,
            depth,
            document,
            class_map,
        }
    }

    /// The document's namespace, copied verbatim into the record.
    #[must_use]
    pub fn namespace(&self) -> &'a str {
        self.document.namespace()
    }

    /// The document's id, copied verbatim into the record.
    #[must_use]
    pub fn id(&self) -> &'a str {
        self.document.id()
    }

    /// The document being read.
    #[must_use]
    pub const fn generic_document(&self) -> &'a GenericDocument {
        self.document
    }

    /// Reads a field. Absent properties become `None` or an empty `Vec`;
    /// a bare `T` requires the property to be present.
    pub fn get<V: FromPropertyValues>(&self, name: &str) -> MappingResult<V> {
        let config = self.lookup(name)?;
        V::from_property_values(self.document.property(name))
            .map_err(|e| self.convert_error(config, V::KIND, e))
    }

    /// Reads an optional nested record.
    pub fn document<N: DocumentClass>(&self, name: &str) -> MappingResult<Option<N>> {
        let mut records = self.documents::<N>(name)?;
        if records.len() > 1 {
            return Err(MappingError::cardinality(
                self.schema.schema_type(),
                name,
                format!("{} nested documents present, expected at most one", records.len()),
            ));
        }
        Ok(records.pop())
    }

    /// Reads a nested record that must be present.
    pub fn require_document<N: DocumentClass>(&self, name: &str) -> MappingResult<N> {
        self.document::<N>(name)?.ok_or_else(|| {
            MappingError::cardinality(
                self.schema.schema_type(),
                name,
                "required nested document is absent",
            )
        })
    }

    /// Reads nested records in stored order. An absent property yields an
    /// empty `Vec`.
    pub fn documents<N: DocumentClass>(&self, name: &str) -> MappingResult<Vec<N>> {
        let config = self.lookup(name)?;
        let children = match self.document.property(name) {
            None => return Ok(Vec::new()),
            Some(PropertyValues::Document(children)) => children,
            Some(other) => {
                return Err(self.convert_error(
                    config,
                    ValueKind::Document,
                    ConvertError::WrongKind { found: other.kind() },
                ));
            }
        };

        let mapper = DocumentMapper::<N>::with_config(self.config.clone())?;
        children
            .iter()
            .map(|child| {
                if !self.class_map.contains_schema(child.schema_type()) {
                    return Err(MappingError::MissingDependency(child.schema_type().to_string()));
                }
                if child.schema_type() != N::SCHEMA_NAME {
                    return Err(MappingError::mismatch(
                        self.schema.schema_type(),
                        format!(
                            "property `{name}` holds a `{}` document, the record expects `{}`",
                            child.schema_type(),
                            N::SCHEMA_NAME
                        ),
                    ));
                }
                mapper.from_document_at(child, self.class_map, self.depth + 1)
            })
            .collect()
    }

    fn lookup(&self, name: &str) -> MappingResult<&'a PropertyConfig> {
        self.schema.property(name).ok_or_else(|| {
            MappingError::mismatch(
                self.schema.schema_type(),
                format!("record reads undeclared property `{name}`"),
            )
        })
    }

    fn convert_error(
        &self,
        config: &PropertyConfig,
        expected: ValueKind,
        error: ConvertError,
    ) -> MappingError {
        let schema_type = self.schema.schema_type();
        match error {
            ConvertError::WrongKind { found } => MappingError::mismatch(
                schema_type,
                format!(
                    "property `{}` holds {found} values, the record field expects {expected}",
                    config.name
                ),
            ),
            ConvertError::Missing | ConvertError::TooMany(_) => {
                MappingError::cardinality(schema_type, &config.name, error.to_string())
            }
        }
    }
}
