//! GraphQL-backed object source.
//!
//! Queries Sui's GraphQL API for a single object and returns both available
//! representations (base64 BCS and the parsed JSON field tree), letting the
//! resolver pick the decode path.
//!
//! ## Endpoints
//! - Mainnet: `https://graphql.mainnet.sui.io/graphql`
//! - Testnet: `https://graphql.testnet.sui.io/graphql`
//!
//! ## Usage
//!
//! ```ignore
//! let source = GraphQLSource::mainnet();
//! let data = source.fetch_object_data("0x...")?;
//! let value = decode_object(&reified, &data)?;
//! ```

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::Engine;
use serde_json::{json, Value};

use sui_reify_types::normalize_address;

use crate::object::ObjectData;
use crate::source::ObjectSource;

const MAINNET_GRAPHQL: &str = "https://graphql.mainnet.sui.io/graphql";
const TESTNET_GRAPHQL: &str = "https://graphql.testnet.sui.io/graphql";

/// GraphQL client serving as an [`ObjectSource`].
#[derive(Clone)]
pub struct GraphQLSource {
    endpoint: String,
    agent: ureq::Agent,
}

impl GraphQLSource {
    /// Default request timeout in seconds (can be overridden by env).
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default connect timeout in seconds (can be overridden by env).
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    fn default_timeouts() -> (Duration, Duration) {
        let timeout_secs = std::env::var("SUI_GRAPHQL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECS);
        let connect_secs = std::env::var("SUI_GRAPHQL_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_CONNECT_TIMEOUT_SECS);
        (
            Duration::from_secs(timeout_secs),
            Duration::from_secs(connect_secs),
        )
    }

    fn build_agent(timeout: Duration, connect_timeout: Duration) -> ureq::Agent {
        ureq::AgentBuilder::new()
            .timeout(timeout)
            .timeout_connect(connect_timeout)
            .build()
    }

    /// Create a client for mainnet.
    pub fn mainnet() -> Self {
        Self::new(MAINNET_GRAPHQL)
    }

    /// Create a client for testnet.
    pub fn testnet() -> Self {
        Self::new(TESTNET_GRAPHQL)
    }

    /// Create a client from `SUI_GRAPHQL_ENDPOINT`, falling back to mainnet.
    pub fn from_env() -> Self {
        match std::env::var("SUI_GRAPHQL_ENDPOINT") {
            Ok(value) if !value.trim().is_empty() => Self::new(value.trim()),
            _ => Self::mainnet(),
        }
    }

    /// Create a client with a custom endpoint.
    pub fn new(endpoint: &str) -> Self {
        let (timeout, connect_timeout) = Self::default_timeouts();
        Self::with_timeouts(endpoint, timeout, connect_timeout)
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeouts(endpoint: &str, timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            agent: Self::build_agent(timeout, connect_timeout),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a GraphQL query.
    fn query(&self, query: &str, variables: Option<Value>) -> Result<Value> {
        let body = json!({
            "query": query,
            "variables": variables.unwrap_or(Value::Null)
        });

        let response: Value = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| anyhow!("GraphQL request failed: {}", e))?
            .into_json()
            .map_err(|e| anyhow!("Failed to parse GraphQL response: {}", e))?;

        if let Some(errors) = response.get("errors") {
            if let Some(arr) = errors.as_array() {
                if !arr.is_empty() {
                    let msg = arr[0]
                        .get("message")
                        .and_then(|m| m.as_str())
                        .unwrap_or("unknown error");
                    return Err(anyhow!("GraphQL error: {}", msg));
                }
            }
        }

        response
            .get("data")
            .cloned()
            .ok_or_else(|| anyhow!("No data in GraphQL response"))
    }

    /// Fetch an object's data by ID.
    pub fn fetch_object_data(&self, object_id: &str) -> Result<ObjectData> {
        let address = normalize_address(object_id);
        let query = r#"
            query GetObject($address: SuiAddress!) {
                object(address: $address) {
                    address
                    version
                    digest
                    asMoveObject {
                        contents {
                            type { repr }
                            bcs
                            json
                        }
                    }
                }
            }
        "#;

        let data = self.query(query, Some(json!({ "address": address })))?;

        let obj = data
            .get("object")
            .filter(|o| !o.is_null())
            .ok_or_else(|| anyhow!("Object not found: {}", object_id))?;

        let contents = obj.get("asMoveObject").and_then(|m| m.get("contents"));
        let type_string = contents
            .and_then(|c| c.get("type"))
            .and_then(|t| t.get("repr"))
            .and_then(|r| r.as_str())
            .map(|s| s.to_string());
        let bcs = contents
            .and_then(|c| c.get("bcs"))
            .and_then(|b| b.as_str())
            .map(|b64| {
                base64::engine::general_purpose::STANDARD
                    .decode(b64)
                    .map_err(|e| anyhow!("Failed to decode object BCS base64: {}", e))
            })
            .transpose()?;
        let content = contents.and_then(|c| c.get("json")).filter(|j| !j.is_null()).cloned();

        let mut result = ObjectData::new(
            obj.get("address")
                .and_then(|a| a.as_str())
                .unwrap_or(&address)
                .to_string(),
            obj.get("version").and_then(|v| v.as_u64()).unwrap_or(1),
        );
        if let Some(t) = type_string {
            result = result.with_type(t);
        }
        if let Some(b) = bcs {
            result = result.with_bcs(b);
        }
        if let Some(c) = content {
            result = result.with_content(c);
        }
        if let Some(d) = obj.get("digest").and_then(|d| d.as_str()) {
            result = result.with_digest(d);
        }
        Ok(result)
    }
}

#[async_trait]
impl ObjectSource for GraphQLSource {
    async fn fetch_object(&self, object_id: &str) -> Result<ObjectData> {
        self.fetch_object_data(object_id)
    }
}
