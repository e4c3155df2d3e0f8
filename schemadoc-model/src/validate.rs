//! Document-against-schema validation.

use crate::{
    Cardinality, GenericDocument, MappingError, MappingResult, PropertyKind, PropertyValues,
    Schema,
};

/// Checks that `doc` conforms to `schema` at the top level.
///
/// Nested documents are checked only for their schema tag; use
/// [`validate_document_deep`] to recurse into them.
pub fn validate_document(schema: &Schema, doc: &GenericDocument) -> MappingResult<()> {
    check_document(schema, doc, true)
}

/// Validates `doc` and every nested document, resolving nested schemas
/// through `lookup`.
///
/// `reject_unknown` has the same meaning as in [`check_document`]. The root
/// document sits at depth 0; a nested document deeper than `max_depth` fails
/// with [`MappingError::NestingTooDeep`]. An unresolvable schema fails with
/// [`MappingError::MissingDependency`].
pub fn validate_document_deep<'s, F>(
    doc: &GenericDocument,
    lookup: F,
    reject_unknown: bool,
    max_depth: usize,
) -> MappingResult<()>
where
    F: Fn(&str) -> Option<&'s Schema> + Copy,
{
    validate_at(doc, lookup, reject_unknown, max_depth, 0)
}

fn validate_at<'s, F>(
    doc: &GenericDocument,
    lookup: F,
    reject_unknown: bool,
    max_depth: usize,
    depth: usize,
) -> MappingResult<()>
where
    F: Fn(&str) -> Option<&'s Schema> + Copy,
{
    if depth > max_depth {
        return Err(MappingError::NestingTooDeep(max_depth));
    }
    let schema = lookup(doc.schema_type())
        .ok_or_else(|| MappingError::MissingDependency(doc.schema_type().to_string()))?;
    check_document(schema, doc, reject_unknown)?;
    for values in doc.properties().values() {
        if let PropertyValues::Document(nested) = values {
            for child in nested {
                validate_at(child, lookup, reject_unknown, max_depth, depth + 1)?;
            }
        }
    }
    Ok(())
}

/// Top-level check with control over unknown properties. With
/// `reject_unknown` unset, properties the schema does not declare are skipped.
pub fn check_document(
    schema: &Schema,
    doc: &GenericDocument,
    reject_unknown: bool,
) -> MappingResult<()> {
    let schema_type = schema.schema_type();
    if doc.schema_type() != schema_type {
        return Err(MappingError::mismatch(
            schema_type,
            format!("document `{}` is tagged `{}`", doc.id(), doc.schema_type()),
        ));
    }

    for (name, values) in doc.properties() {
        let Some(config) = schema.property(name) else {
            if reject_unknown {
                return Err(MappingError::mismatch(
                    schema_type,
                    format!("unknown property `{name}`"),
                ));
            }
            continue;
        };

        if values.kind() != config.value_kind() {
            return Err(MappingError::mismatch(
                schema_type,
                format!(
                    "property `{name}` is declared {} but holds {} values",
                    config.value_kind(),
                    values.kind()
                ),
            ));
        }

        check_arity(schema_type, name, config.cardinality, values.len())?;
        check_finite(schema_type, name, values)?;

        if let (
            PropertyKind::Document {
                schema_type: expected,
                ..
            },
            PropertyValues::Document(nested),
        ) = (&config.kind, values)
        {
            if let Some(child) = nested.iter().find(|c| c.schema_type() != expected.as_str()) {
                return Err(MappingError::mismatch(
                    schema_type,
                    format!(
                        "property `{name}` expects `{expected}` documents, found `{}`",
                        child.schema_type()
                    ),
                ));
            }
        }
    }

    for config in schema.properties() {
        if config.cardinality == Cardinality::Required && !doc.has_property(&config.name) {
            return Err(MappingError::cardinality(
                schema_type,
                &config.name,
                "required property is missing",
            ));
        }
    }

    Ok(())
}

/// Checks a value count against a cardinality. A count of zero for a required
/// property is a violation.
pub fn check_arity(
    schema_type: &str,
    property: &str,
    cardinality: Cardinality,
    len: usize,
) -> MappingResult<()> {
    match cardinality {
        Cardinality::Required if len != 1 => Err(MappingError::cardinality(
            schema_type,
            property,
            format!("required property holds {len} values, expected exactly one"),
        )),
        Cardinality::Optional if len > 1 => Err(MappingError::cardinality(
            schema_type,
            property,
            format!("optional property holds {len} values, expected at most one"),
        )),
        _ => Ok(()),
    }
}

/// Rejects NaN and infinities in a double property; other kinds always pass.
pub fn check_finite(
    schema_type: &str,
    property: &str,
    values: &PropertyValues,
) -> MappingResult<()> {
    match values {
        PropertyValues::Double(doubles) if doubles.iter().any(|v| !v.is_finite()) => {
            Err(MappingError::NonFiniteValue {
                schema_type: schema_type.to_string(),
                property: property.to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// [`check_finite`] over every property of `doc` and its nested documents,
/// declared or not.
pub(crate) fn check_finite_deep(doc: &GenericDocument) -> MappingResult<()> {
    for (name, values) in doc.properties() {
        check_finite(doc.schema_type(), name, values)?;
        if let PropertyValues::Document(nested) = values {
            nested.iter().try_for_each(check_finite_deep)?;
        }
    }
    Ok(())
}
