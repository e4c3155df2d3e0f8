//! Mapper configuration, read from the `[mapper]` table of `schemadoc.toml`.

use schemadoc_model::{MappingError, MappingResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Behaviour switches shared by mappers, registries and catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Fail when an incoming document carries a property the schema does not
    /// declare. When unset such properties are skipped.
    #[serde(default = "default_reject_unknown")]
    pub reject_unknown_properties: bool,
    /// Deepest allowed nested document; the root sits at depth 0.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

fn default_reject_unknown() -> bool {
    true
}

fn default_max_nesting_depth() -> usize {
    16
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            reject_unknown_properties: default_reject_unknown(),
            max_nesting_depth: default_max_nesting_depth(),
        }
    }
}

/// Shape of the configuration file; other tables are ignored here.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    mapper: MapperConfig,
}

impl MapperConfig {
    /// Parses the `[mapper]` table out of a TOML document. A document
    /// without the table yields the defaults.
    pub fn from_toml_str(contents: &str) -> MappingResult<Self> {
        toml::from_str::<ConfigFile>(contents)
            .map(|file| file.mapper)
            .map_err(|e| MappingError::Config(e.to_string()))
    }

    /// Loads configuration from `path`.
    /// Falls back to the defaults with a warning when the file is missing,
    /// unreadable or malformed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No mapper config found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded mapper config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse mapper config {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read mapper config {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
