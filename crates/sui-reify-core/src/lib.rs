//! Runtime reification and multi-source decoding of Move struct values.
//!
//! Generated bindings declare each struct's shape once as a [`Reified`]
//! descriptor; callers then decode the same logical on-chain value from any
//! of its retrieval channels and get identical typed results:
//!
//! - [`decode::from_bcs`] for raw BCS bytes
//! - [`decode::from_fields`] for a plain field map
//! - [`decode::from_fields_with_types`] for a field map plus runtime type tag
//! - [`decode::from_json`] for the typed-JSON envelope
//!
//! All decoding is synchronous and side-effect-free; descriptors are
//! immutable and safe to share across threads. Fetching lives in the
//! `sui-reify-fetch` crate, behind a separate interface.

pub mod bcs;
pub mod decode;
pub mod error;
pub mod reified;
pub mod schema;
pub mod validate;
pub mod value;

pub use decode::{
    from_bcs, from_fields, from_fields_with_types, from_json, from_json_field, to_bcs, to_json,
};
pub use error::ReifyError;
pub use reified::{Reified, StructBuilder, StructReified};
pub use validate::{assert_tag_matches, assert_type_args_match};
pub use value::{MoveValue, StructValue};
