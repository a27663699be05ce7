//! Representation selection for fetched objects.
//!
//! A live object arrives with a BCS payload, a parsed field tree, or both.
//! This resolver verifies the recorded type tag against the expected
//! descriptor and dispatches to the matching synchronous decode path. It
//! never partially decodes: an object with neither representation fails
//! with [`ReifyError::MissingRepresentation`].

use sui_reify_core::{assert_tag_matches, from_bcs, from_fields_with_types};
use sui_reify_core::{MoveValue, Reified, ReifyError};

use crate::object::ObjectData;

/// Decode a fetched object with the expected descriptor.
///
/// Prefers the BCS payload when both representations are present; the
/// channels are equivalent, and bytes are authoritative.
pub fn decode_object(reified: &Reified, data: &ObjectData) -> Result<MoveValue, ReifyError> {
    if let Some(bytes) = &data.bcs {
        assert_tag_matches(recorded_tag(data, reified)?, reified)?;
        return from_bcs(reified, bytes);
    }
    if let Some(content) = &data.content {
        return from_fields_with_types(reified, recorded_tag(data, reified)?, content);
    }
    Err(ReifyError::MissingRepresentation {
        object_id: data.object_id.clone(),
    })
}

// A representation without a recorded tag must not silently decode.
fn recorded_tag<'d>(data: &'d ObjectData, reified: &Reified) -> Result<&'d str, ReifyError> {
    data.type_string
        .as_deref()
        .ok_or_else(|| ReifyError::TypeTagMismatch {
            expected: reified.type_tag(),
            actual: "<unknown>".to_string(),
        })
}
