//! Runtime table of record types, keyed by schema name.

use crate::{
    ClassDescriptor, DocumentClass, DocumentClassMap, DocumentMapper, MapperConfig,
    transitive_dependencies,
};
use schemadoc_model::{
    GenericDocument, MappingError, MappingResult, Schema, SetSchemaResponse,
    SetSchemaResponseBuilder, validate_document_deep,
};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug)]
struct RegisteredSchema {
    schema: Arc<Schema>,
    classes: Vec<ClassDescriptor>,
}

/// Maps schema names to the record types that materialize them.
///
/// Registering a type also registers everything it transitively depends
/// on. One schema name may be served by several record types as long as
/// they all declare an identical schema; a differing definition is a
/// [`MappingError::SchemaConflict`].
#[derive(Debug, Default)]
pub struct MapperRegistry {
    config: MapperConfig,
    entries: BTreeMap<String, RegisteredSchema>,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            config,
            entries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Registers `T` and its dependency graph.
    ///
    /// Either every type in the graph is registered or, on error, none is.
    pub fn register<T: DocumentClass>(&mut self) -> MappingResult<()> {
        let root = ClassDescriptor::of::<T>();
        let mut pending: Vec<(ClassDescriptor, Schema)> = Vec::new();

        for descriptor in std::iter::once(root).chain(transitive_dependencies(root)) {
            let schema = descriptor.schema()?;
            if schema.schema_type() != descriptor.schema_name() {
                return Err(MappingError::InvalidSchema(format!(
                    "{} declares schema name `{}` but builds `{}`",
                    descriptor.type_name(),
                    descriptor.schema_name(),
                    schema.schema_type()
                )));
            }

            let name = schema.schema_type();
            let known = self
                .entries
                .get(name)
                .map(|entry| entry.schema.as_ref())
                .or_else(|| {
                    pending
                        .iter()
                        .find(|(_, s)| s.schema_type() == name)
                        .map(|(_, s)| s)
                });
            if let Some(existing) = known {
                if existing != &schema {
                    warn!(
                        schema = name,
                        class = descriptor.type_name(),
                        "Rejected conflicting schema definition"
                    );
                    return Err(MappingError::SchemaConflict(name.to_string()));
                }
            }
            pending.push((descriptor, schema));
        }

        for (descriptor, schema) in pending {
            match self.entries.entry(schema.schema_type().to_string()) {
                Entry::Occupied(mut entry) => {
                    let entry = entry.get_mut();
                    if !entry.classes.contains(&descriptor) {
                        warn!(
                            schema = descriptor.schema_name(),
                            class = descriptor.type_name(),
                            "Schema already registered by another type; sharing definition"
                        );
                        entry.classes.push(descriptor);
                    }
                }
                Entry::Vacant(slot) => {
                    info!(
                        schema = descriptor.schema_name(),
                        class = descriptor.type_name(),
                        "Registered document class"
                    );
                    slot.insert(RegisteredSchema {
                        schema: Arc::new(schema),
                        classes: vec![descriptor],
                    });
                }
            }
        }
        Ok(())
    }

    /// Whether `T` itself has been registered.
    #[must_use]
    pub fn is_registered<T: DocumentClass>(&self) -> bool {
        self.entries
            .get(T::SCHEMA_NAME)
            .is_some_and(|entry| entry.classes.iter().any(ClassDescriptor::is::<T>))
    }

    #[must_use]
    pub fn schema(&self, schema_name: &str) -> Option<&Schema> {
        self.entries.get(schema_name).map(|entry| entry.schema.as_ref())
    }

    /// All registered schemas, ordered by name.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.entries.values().map(|entry| entry.schema.as_ref())
    }

    /// Record types registered for `schema_name`, in registration order.
    #[must_use]
    pub fn classes(&self, schema_name: &str) -> &[ClassDescriptor] {
        self.entries
            .get(schema_name)
            .map(|entry| entry.classes.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn document_class_map(&self) -> DocumentClassMap {
        let mut map = DocumentClassMap::new();
        for (name, entry) in &self.entries {
            for class in &entry.classes {
                map.insert(name, class.type_name());
            }
        }
        map
    }

    /// A mapper for `T` bound to the registered schema.
    ///
    /// Fails with [`MappingError::MissingDependency`] if `T` was never
    /// registered.
    pub fn mapper<T: DocumentClass>(&self) -> MappingResult<DocumentMapper<T>> {
        let entry = self
            .entries
            .get(T::SCHEMA_NAME)
            .filter(|entry| entry.classes.iter().any(ClassDescriptor::is::<T>))
            .ok_or_else(|| MappingError::MissingDependency(T::SCHEMA_NAME.to_string()))?;
        DocumentMapper::bind(Arc::clone(&entry.schema), self.config.clone())
    }

    /// Validates `doc` and its nested documents against registered schemas.
    pub fn validate(&self, doc: &GenericDocument) -> MappingResult<()> {
        validate_document_deep(
            doc,
            |name| self.schema(name),
            self.config.reject_unknown_properties,
            self.config.max_nesting_depth,
        )
    }

    /// Describes what replacing `stored` with the registered schemas does.
    #[must_use]
    pub fn plan_schema_change(&self, stored: &[Schema]) -> SetSchemaResponse {
        plan_schema_change(stored, |name| self.schema(name))
    }
}

/// Compares `stored` schemas against their replacements found through
/// `lookup`.
///
/// Stored types with no replacement are deleted; types whose replacement
/// cannot hold their old documents are incompatible.
pub(crate) fn plan_schema_change<'s>(
    stored: &[Schema],
    lookup: impl Fn(&str) -> Option<&'s Schema>,
) -> SetSchemaResponse {
    let mut builder = SetSchemaResponseBuilder::new();
    for old in stored {
        match lookup(old.schema_type()) {
            None => builder = builder.add_deleted_type(old.schema_type()),
            Some(new) if !new.is_compatible_with(old) => {
                builder = builder.add_incompatible_type(old.schema_type());
            }
            Some(_) => {}
        }
    }
    let response = builder.build();
    debug!(
        deleted = response.deleted_types().len(),
        incompatible = response.incompatible_types().len(),
        "Planned schema change"
    );
    response
}
