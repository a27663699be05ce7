//! Decode error types.
//!
//! Every error here is fatal at the point raised: the framework never
//! substitutes defaults or recovers from a mismatch, because doing so could
//! mask unit-mismatched amounts. Retries belong to callers.

use std::fmt;

use sui_reify_types::MalformedTypeTag;

/// Structured error types for reified decoding.
#[derive(Debug, Clone)]
pub enum ReifyError {
    /// A type tag string could not be parsed (unbalanced brackets etc.).
    MalformedTypeTag(MalformedTypeTag),

    /// Actual vs. expected generic instantiation disagree (count or identity).
    TypeArgumentMismatch {
        /// Expected type arguments, normalized, comma-joined
        expected: String,
        /// Actual type arguments, normalized, comma-joined
        actual: String,
    },

    /// A decoded value's own recorded type tag is not the type the caller
    /// asked to decode as.
    TypeTagMismatch {
        /// Expected full type tag, normalized
        expected: String,
        /// Actual full type tag, normalized
        actual: String,
    },

    /// Neither a BCS payload nor parsed content was available for an object.
    MissingRepresentation {
        /// Object ID the representation was requested for
        object_id: String,
    },

    /// Binary cursor ran out of bytes, or schema and bytes disagree.
    MalformedBinaryPayload {
        /// Where in the payload the disagreement was detected
        context: String,
    },

    /// A field-map or JSON leaf cannot be interpreted as the target type.
    MalformedFieldValue {
        /// Qualified field name (or value position) that failed
        field: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl fmt::Display for ReifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReifyError::MalformedTypeTag(e) => write!(f, "{}", e),
            ReifyError::TypeArgumentMismatch { expected, actual } => {
                write!(
                    f,
                    "TYPE_ARGUMENT_MISMATCH: expected [{}], got [{}]",
                    expected, actual
                )
            }
            ReifyError::TypeTagMismatch { expected, actual } => {
                write!(f, "TYPE_TAG_MISMATCH: expected {}, got {}", expected, actual)
            }
            ReifyError::MissingRepresentation { object_id } => {
                write!(
                    f,
                    "MissingRepresentation: object {} has neither BCS bytes nor parsed content",
                    object_id
                )
            }
            ReifyError::MalformedBinaryPayload { context } => {
                write!(f, "malformed BCS payload: {}", context)
            }
            ReifyError::MalformedFieldValue { field, reason } => {
                write!(f, "malformed value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ReifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReifyError::MalformedTypeTag(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MalformedTypeTag> for ReifyError {
    fn from(e: MalformedTypeTag) -> Self {
        ReifyError::MalformedTypeTag(e)
    }
}
