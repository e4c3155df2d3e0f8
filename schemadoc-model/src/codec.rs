//! Flat-record encoding of [`GenericDocument`]s.
//!
//! Documents are written as self-describing JSON so they can be handed to
//! any byte-oriented transport or store. Decoding restores an identical
//! document, doubles included to the last bit; [`decode_validated`]
//! additionally checks it against a schema.
//!
//! JSON has no NaN or infinity, so documents holding them are refused at
//! encode time rather than written as `null`.

use crate::validate::check_finite_deep;
use crate::{GenericDocument, MappingResult, Schema, validate_document};
use tracing::debug;

/// Encodes a document into bytes.
///
/// Fails with [`crate::MappingError::NonFiniteValue`] when any double,
/// nested ones included, is NaN or infinite.
pub fn encode(doc: &GenericDocument) -> MappingResult<Vec<u8>> {
    check_finite_deep(doc)?;
    let bytes = serde_json::to_vec(doc)?;
    debug!(
        schema_type = doc.schema_type(),
        id = doc.id(),
        len = bytes.len(),
        "encoded document"
    );
    Ok(bytes)
}

/// Decodes a document from bytes produced by [`encode`].
pub fn decode(bytes: &[u8]) -> MappingResult<GenericDocument> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decodes a document and validates it against `schema`.
pub fn decode_validated(bytes: &[u8], schema: &Schema) -> MappingResult<GenericDocument> {
    let doc = decode(bytes)?;
    validate_document(schema, &doc)?;
    Ok(doc)
}
