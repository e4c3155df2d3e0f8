//! Declarative schemas loaded from `schemadoc.toml`.
//!
//! ```toml
//! [mapper]
//! reject_unknown_properties = true
//!
//! [[schema]]
//! name = "Gift"
//!
//! [[schema.property]]
//! name = "from"
//! cardinality = "repeated"
//! type = "string"
//! ```
//!
//! A catalog validates documents without any record type, which is how
//! documents produced elsewhere are checked before they are trusted.

use crate::MapperConfig;
use crate::registry::plan_schema_change;
use schemadoc_model::{
    GenericDocument, MappingError, MappingResult, Schema, SetSchemaResponse, validate_document_deep,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    mapper: MapperConfig,
    #[serde(default)]
    schema: Vec<Schema>,
}

/// A set of schemas keyed by name, plus the mapper configuration they were
/// declared with.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    config: MapperConfig,
    schemas: BTreeMap<String, Schema>,
}

impl SchemaCatalog {
    /// Builds a catalog from schemas already in hand.
    ///
    /// A name given twice must carry an identical definition.
    pub fn new(
        config: MapperConfig,
        schemas: impl IntoIterator<Item = Schema>,
    ) -> MappingResult<Self> {
        let mut by_name: BTreeMap<String, Schema> = BTreeMap::new();
        for schema in schemas {
            match by_name.get(schema.schema_type()) {
                Some(existing) if existing != &schema => {
                    return Err(MappingError::SchemaConflict(schema.schema_type().to_string()));
                }
                Some(_) => {}
                None => {
                    by_name.insert(schema.schema_type().to_string(), schema);
                }
            }
        }
        Ok(Self {
            config,
            schemas: by_name,
        })
    }

    /// Parses a catalog from TOML text.
    pub fn from_toml_str(contents: &str) -> MappingResult<Self> {
        let file: CatalogFile =
            toml::from_str(contents).map_err(|e| MappingError::Config(e.to_string()))?;
        Self::new(file.mapper, file.schema)
    }

    /// Loads a catalog from `path`. Unlike [`MapperConfig::load_from`] a
    /// missing or malformed file is an error: schemas have no default.
    pub fn load_from(path: &Path) -> MappingResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| MappingError::Config(format!("failed to read {}: {e}", path.display())))?;
        let catalog = Self::from_toml_str(&contents)?;
        info!(
            "Loaded {} schema(s) from {:?}",
            catalog.schemas.len(),
            path
        );
        Ok(catalog)
    }

    #[must_use]
    pub const fn config(&self) -> &MapperConfig {
        &self.config
    }

    #[must_use]
    pub fn schema(&self, schema_name: &str) -> Option<&Schema> {
        self.schemas.get(schema_name)
    }

    /// All schemas, ordered by name.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Validates `doc` and its nested documents under the catalog's
    /// configuration.
    pub fn validate(&self, doc: &GenericDocument) -> MappingResult<()> {
        validate_document_deep(
            doc,
            |name| self.schema(name),
            self.config.reject_unknown_properties,
            self.config.max_nesting_depth,
        )
    }

    /// Describes what replacing `stored` with this catalog's schemas does.
    #[must_use]
    pub fn plan_schema_change(&self, stored: &[Schema]) -> SetSchemaResponse {
        plan_schema_change(stored, |name| self.schema(name))
    }

    /// Names of referenced schemas that the catalog does not define.
    #[must_use]
    pub fn unresolved_references(&self) -> Vec<String> {
        let mut missing: Vec<String> = self
            .schemas
            .values()
            .flat_map(Schema::referenced_schema_types)
            .filter(|name| !self.schemas.contains_key(*name))
            .map(str::to_string)
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }
}
