//! Node REST access
//!
//! [`NodeApi`] is the boundary the context builder depends on; the
//! remote side owns the wire format, this module only requires that the
//! two read endpoints deserialize into [`NodeInfo`] and a header list.
//! [`NodeClient`] is the reqwest-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Default request timeout for node calls
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Point-in-time metadata about the remote node, consumed as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    /// Node name
    pub name: String,
    /// Node software version
    pub app_version: String,
    /// Height of the best full block, absent while bootstrapping
    pub full_height: Option<u64>,
    /// Id of the best header, absent while bootstrapping
    pub best_header_id: Option<String>,
}

/// One block header; ordering key is `height`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    /// Header id (hex)
    pub id: String,
    /// Parent header id (hex)
    pub parent_id: String,
    /// Block version
    pub version: u8,
    /// Block height
    pub height: u64,
    /// Block timestamp (unix millis)
    pub timestamp: u64,
}

/// The two node reads the context bootstrap depends on
///
/// `last_headers` may return the headers in any order; the context
/// builder normalizes them.
#[async_trait]
pub trait NodeApi: Send + Sync {
    async fn node_info(&self) -> Result<NodeInfo>;

    async fn last_headers(&self, count: u32) -> Result<Vec<BlockHeader>>;
}

/// HTTP client for a node's REST API
pub struct NodeClient {
    base_url: String,
    http: reqwest::Client,
}

impl NodeClient {
    /// Create a client for the given node base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "node request");
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Network(format!(
                "{} returned status {}",
                url, status
            )));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Protocol(e.to_string()))
    }
}

#[async_trait]
impl NodeApi for NodeClient {
    async fn node_info(&self) -> Result<NodeInfo> {
        self.get_json("/info").await
    }

    async fn last_headers(&self, count: u32) -> Result<Vec<BlockHeader>> {
        self.get_json(&format!("/blocks/lastHeaders/{}", count)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_info_deserializes_camel_case() {
        let json = r#"{
            "name": "node-a",
            "appVersion": "5.0.12",
            "fullHeight": 1150000,
            "bestHeaderId": "aa11"
        }"#;
        let info: NodeInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.app_version, "5.0.12");
        assert_eq!(info.full_height, Some(1150000));
    }

    #[test]
    fn test_node_info_tolerates_bootstrapping_node() {
        let json = r#"{
            "name": "node-a",
            "appVersion": "5.0.12",
            "fullHeight": null,
            "bestHeaderId": null
        }"#;
        let info: NodeInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.full_height, None);
    }

    #[test]
    fn test_header_round_trip() {
        let header = BlockHeader {
            id: "aa".to_string(),
            parent_id: "bb".to_string(),
            version: 3,
            height: 42,
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&header).unwrap();
        assert!(json.contains("parentId"));
        let back: BlockHeader = serde_json::from_str(&json).unwrap();
        assert_eq!(header, back);
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = NodeClient::new("http://127.0.0.1:9053/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9053");
    }
}
