//! Object sources and the async fetch/decode composition.
//!
//! The codec stays synchronous and side-effect-free; fetching an object is
//! the only suspending operation, and it lives behind the [`ObjectSource`]
//! trait so callers can plug in network clients, replay files, or in-memory
//! fixtures. Retry, caching, and rate limiting are caller concerns and do
//! not exist here.

use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tracing::debug;

use sui_reify_core::{MoveValue, Reified};
use sui_reify_types::normalize_address;

use crate::object::ObjectData;
use crate::resolver::decode_object;

/// A source of live object data.
#[async_trait]
pub trait ObjectSource: Send + Sync {
    /// Fetch an object by ID. "Not found" is an error, not an empty result.
    async fn fetch_object(&self, object_id: &str) -> Result<ObjectData>;
}

/// An in-memory object source for tests and offline replay.
///
/// Objects are keyed by normalized ID, so short and full forms of the same
/// address resolve to the same entry.
#[derive(Debug, Default)]
pub struct StaticSource {
    objects: HashMap<String, ObjectData>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, replacing any previous entry for the same ID.
    pub fn insert(&mut self, data: ObjectData) {
        self.objects.insert(normalize_address(&data.object_id), data);
    }

    /// Builder: add an object.
    pub fn with_object(mut self, data: ObjectData) -> Self {
        self.insert(data);
        self
    }
}

#[async_trait]
impl ObjectSource for StaticSource {
    async fn fetch_object(&self, object_id: &str) -> Result<ObjectData> {
        self.objects
            .get(&normalize_address(object_id))
            .cloned()
            .ok_or_else(|| anyhow!("Object not found: {}", object_id))
    }
}

/// Fetch an object and decode it with the expected descriptor.
///
/// This is the async convenience wrapper over the synchronous resolver;
/// errors surface at this call, never as partial decodes.
pub async fn fetch_and_decode(
    source: &dyn ObjectSource,
    object_id: &str,
    reified: &Reified,
) -> Result<MoveValue> {
    let data = source
        .fetch_object(object_id)
        .await
        .with_context(|| format!("Failed to fetch object {}", object_id))?;

    debug!(
        "Fetched object {} v{} (bcs: {}, content: {})",
        data.object_id,
        data.version,
        data.bcs.is_some(),
        data.content.is_some()
    );

    decode_object(reified, &data).with_context(|| format!("Failed to decode object {}", object_id))
}
