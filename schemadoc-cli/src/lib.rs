//! Command handling for the `schemadoc` binary.
//!
//! Every command loads a [`SchemaCatalog`] and produces a [`Report`] that the
//! binary prints as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use schemadoc_mapper::SchemaCatalog;
use schemadoc_model::{SetSchemaResponse, codec};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "schemadoc")]
#[command(about = "Validate schema-tagged documents against a schema catalog")]
pub struct Args {
    /// Path to the schema catalog
    #[arg(short, long, default_value = "schemadoc.toml")]
    pub catalog: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the catalog's schemas and any unresolved references
    Schemas,
    /// Validate encoded documents, nested documents included
    Validate {
        #[arg(required = true)]
        documents: Vec<PathBuf>,
    },
    /// Report which stored types the catalog deletes or breaks
    Plan {
        /// Catalog holding the currently stored schemas
        stored: PathBuf,
    },
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SchemaSummary {
    pub name: String,
    pub properties: usize,
    pub references: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Valid {
        path: PathBuf,
        schema_type: String,
        id: String,
    },
    Invalid {
        path: PathBuf,
        error: String,
    },
}

impl ValidationOutcome {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Report {
    Schemas {
        schemas: Vec<SchemaSummary>,
        unresolved: Vec<String>,
    },
    Validation(Vec<ValidationOutcome>),
    Plan(SetSchemaResponse),
}

impl Report {
    /// Whether the command found nothing wrong. A plan always succeeds; its
    /// content is the answer.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Schemas { unresolved, .. } => unresolved.is_empty(),
            Self::Validation(outcomes) => outcomes.iter().all(ValidationOutcome::is_valid),
            Self::Plan(_) => true,
        }
    }
}

/// Runs the parsed command.
pub fn run(args: &Args) -> Result<Report> {
    let catalog = SchemaCatalog::load_from(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;

    match &args.command {
        Command::Schemas => Ok(list_schemas(&catalog)),
        Command::Validate { documents } => documents
            .iter()
            .map(|path| validate_file(&catalog, path))
            .collect::<Result<Vec<_>>>()
            .map(Report::Validation),
        Command::Plan { stored } => {
            let stored = SchemaCatalog::load_from(stored)
                .with_context(|| format!("Failed to load stored catalog {}", stored.display()))?;
            let stored: Vec<_> = stored.schemas().cloned().collect();
            Ok(Report::Plan(catalog.plan_schema_change(&stored)))
        }
    }
}

fn list_schemas(catalog: &SchemaCatalog) -> Report {
    let schemas = catalog
        .schemas()
        .map(|schema| SchemaSummary {
            name: schema.schema_type().to_string(),
            properties: schema.properties().len(),
            references: schema
                .referenced_schema_types()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
        .collect();
    let unresolved = catalog.unresolved_references();
    for name in &unresolved {
        warn!(schema = %name, "Referenced schema is not defined in the catalog");
    }
    Report::Schemas {
        schemas,
        unresolved,
    }
}

fn validate_file(catalog: &SchemaCatalog, path: &Path) -> Result<ValidationOutcome> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let outcome = match codec::decode(&bytes).and_then(|doc| catalog.validate(&doc).map(|()| doc)) {
        Ok(doc) => {
            info!(path = %path.display(), schema_type = doc.schema_type(), "Document is valid");
            ValidationOutcome::Valid {
                path: path.to_path_buf(),
                schema_type: doc.schema_type().to_string(),
                id: doc.id().to_string(),
            }
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Document rejected");
            ValidationOutcome::Invalid {
                path: path.to_path_buf(),
                error: e.to_string(),
            }
        }
    };
    Ok(outcome)
}
