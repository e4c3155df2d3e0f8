use pretty_assertions::assert_eq;
use schemadoc_mapper::{MapperConfig, MappingError, SchemaCatalog};
use schemadoc_model::{GenericDocument, PropertyKind};
use std::io::Write;
use tempfile::NamedTempFile;

const CATALOG: &str = r#"
[mapper]
reject_unknown_properties = false
max_nesting_depth = 4

[[schema]]
name = "Person"

[[schema.property]]
name = "name"
cardinality = "required"
type = "string"
tokenizer = "plain"
indexing = "prefixes"

[[schema]]
name = "Present"

[[schema.property]]
name = "title"
type = "string"

[[schema.property]]
name = "sender"
type = "document"
schema_type = "Person"
"#;

#[test]
fn parses_schemas_and_config() {
    let catalog = SchemaCatalog::from_toml_str(CATALOG).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.config(),
        &MapperConfig {
            reject_unknown_properties: false,
            max_nesting_depth: 4,
        }
    );

    let present = catalog.schema("Present").unwrap();
    let sender = present.property("sender").unwrap();
    assert!(matches!(
        &sender.kind,
        PropertyKind::Document { schema_type, .. } if schema_type == "Person"
    ));
    assert!(catalog.unresolved_references().is_empty());
}

#[test]
fn mapper_table_is_optional() {
    let catalog = SchemaCatalog::from_toml_str(
        r#"
[[schema]]
name = "Gift"

[[schema.property]]
name = "from"
cardinality = "repeated"
type = "string"
"#,
    )
    .unwrap();
    assert_eq!(catalog.config(), &MapperConfig::default());
    assert_eq!(
        catalog.schemas().map(|s| s.schema_type()).collect::<Vec<_>>(),
        vec!["Gift"]
    );
}

#[test]
fn validates_documents_deeply() {
    let catalog = SchemaCatalog::from_toml_str(CATALOG).unwrap();

    let nameless = GenericDocument::builder("people", "s", "Person").build();
    let doc = GenericDocument::builder("gifts", "p", "Present")
        .property_string("title", ["Kite"])
        .property_document("sender", [nameless])
        .build();
    assert!(matches!(
        catalog.validate(&doc),
        Err(MappingError::CardinalityViolation { .. })
    ));

    let sender = GenericDocument::builder("people", "s", "Person")
        .property_string("name", ["Ida"])
        .property_string("note", ["extra properties are tolerated"])
        .build();
    let doc = GenericDocument::builder("gifts", "p", "Present")
        .property_document("sender", [sender])
        .build();
    catalog.validate(&doc).unwrap();
}

#[test]
fn reports_unresolved_references() {
    let catalog = SchemaCatalog::from_toml_str(
        r#"
[[schema]]
name = "Letter"

[[schema.property]]
name = "author"
type = "document"
schema_type = "Person"

[[schema.property]]
name = "reviewer"
type = "document"
schema_type = "Person"

[[schema.property]]
name = "stamp"
type = "document"
schema_type = "Stamp"
"#,
    )
    .unwrap();
    assert_eq!(catalog.unresolved_references(), vec!["Person", "Stamp"]);
}

#[test]
fn duplicate_identical_schema_is_accepted() {
    let twice = format!("{CATALOG}\n{}", &CATALOG[CATALOG.find("[[schema]]").unwrap()..]);
    let catalog = SchemaCatalog::from_toml_str(&twice).unwrap();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn conflicting_schema_is_rejected() {
    let err = SchemaCatalog::from_toml_str(
        r#"
[[schema]]
name = "Gift"

[[schema.property]]
name = "from"
type = "string"

[[schema]]
name = "Gift"

[[schema.property]]
name = "from"
type = "long"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, MappingError::SchemaConflict(name) if name == "Gift"));
}

#[test]
fn invalid_schema_is_rejected() {
    let err = SchemaCatalog::from_toml_str(
        r#"
[[schema]]
name = "Gift"

[[schema.property]]
name = "from"
type = "string"

[[schema.property]]
name = "from"
type = "string"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, MappingError::Config(_)));
}

#[test]
fn loads_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();
    let catalog = SchemaCatalog::load_from(file.path()).unwrap();
    assert!(catalog.schema("Person").is_some());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SchemaCatalog::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, MappingError::Config(_)));
}

#[test]
fn plans_change_from_stored_catalog() {
    let stored = SchemaCatalog::from_toml_str(
        r#"
[[schema]]
name = "Person"

[[schema.property]]
name = "name"
type = "string"

[[schema]]
name = "Gift"
"#,
    )
    .unwrap();
    let next = SchemaCatalog::from_toml_str(CATALOG).unwrap();

    let stored: Vec<_> = stored.schemas().cloned().collect();
    let response = next.plan_schema_change(&stored);
    assert_eq!(response.deleted_types(), &["Gift".to_string()]);
    assert_eq!(response.incompatible_types(), &["Person".to_string()]);
}
