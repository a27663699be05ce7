//! Fetched object data.
//!
//! [`ObjectData`] is the unified shape a source hands back for a live
//! object: either channel may be populated depending on what the source can
//! provide.
//!
//! Design principles:
//! 1. **String IDs for JSON compatibility**: object IDs are `String` rather
//!    than raw bytes to avoid hex parsing at boundaries.
//! 2. **Both representations optional**: a source may return the BCS bytes,
//!    the parsed field tree, or both; the resolver picks the decode path.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Object data fetched from a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectData {
    /// Object ID (hex string with 0x prefix).
    pub object_id: String,

    /// Object version (sequence number / lamport timestamp).
    pub version: u64,

    /// Move type tag (e.g., "0x2::coin::Coin<0x2::sui::SUI>").
    ///
    /// None when type information is unavailable.
    pub type_string: Option<String>,

    /// BCS-serialized object contents (base64 on the wire).
    #[serde(default, with = "base64_opt", skip_serializing_if = "Option::is_none")]
    pub bcs: Option<Vec<u8>>,

    /// Parsed field tree, as an indexer returns it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,

    /// Object digest (base58 encoded, for verification).
    #[serde(default)]
    pub digest: Option<String>,
}

impl ObjectData {
    /// Create ObjectData with minimal required fields.
    pub fn new(object_id: impl Into<String>, version: u64) -> Self {
        Self {
            object_id: object_id.into(),
            version,
            type_string: None,
            bcs: None,
            content: None,
            digest: None,
        }
    }

    /// Builder: set type string.
    pub fn with_type(mut self, type_string: impl Into<String>) -> Self {
        self.type_string = Some(type_string.into());
        self
    }

    /// Builder: set BCS bytes.
    pub fn with_bcs(mut self, bytes: Vec<u8>) -> Self {
        self.bcs = Some(bytes);
        self
    }

    /// Builder: set parsed content.
    pub fn with_content(mut self, content: Value) -> Self {
        self.content = Some(content);
        self
    }

    /// Builder: set digest.
    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }
}

/// Base64 (de)serialization for optional BCS payloads.
pub(crate) mod base64_opt {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(b) => {
                serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(b))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        match encoded {
            None => Ok(None),
            Some(s) => base64::engine::general_purpose::STANDARD
                .decode(s.as_bytes())
                .or_else(|_| {
                    base64::engine::general_purpose::STANDARD_NO_PAD.decode(s.as_bytes())
                })
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
