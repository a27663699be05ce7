//! Object data sources and the fetch/decode boundary for sui-reify.
//!
//! This crate owns everything that touches a live object: the
//! [`ObjectData`] representation a source returns, the [`resolver`] that
//! picks the binary or parsed-content decode path, and the async
//! [`ObjectSource`] trait with a GraphQL-backed and an in-memory
//! implementation. The codec itself (in `sui-reify-core`) stays synchronous
//! and I/O-free.

pub mod graphql;
pub mod object;
pub mod resolver;
pub mod source;

pub use graphql::GraphQLSource;
pub use object::ObjectData;
pub use resolver::decode_object;
pub use source::{fetch_and_decode, ObjectSource, StaticSource};
