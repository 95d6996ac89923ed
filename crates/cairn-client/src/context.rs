//! Blockchain context bootstrap
//!
//! [`ContextBuilder`] fetches node info and the recent header window,
//! normalizes and validates them, and produces an immutable
//! [`BlockchainContext`]. The build is all-or-nothing: either fetch
//! failing, or an inconsistent header window, aborts with no partial
//! context observable. Retry policy belongs to the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::node::{BlockHeader, NodeApi, NodeInfo};

/// Number of recent headers retained in a context
pub const LAST_HEADERS_IN_CONTEXT: u32 = 10;

/// Which chain the context describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

/// Builds an immutable snapshot of current chain state
pub struct ContextBuilder {
    api: Arc<dyn NodeApi>,
    network_type: NetworkType,
}

impl ContextBuilder {
    pub fn new(api: Arc<dyn NodeApi>, network_type: NetworkType) -> Self {
        Self { api, network_type }
    }

    /// Fetch, validate, and freeze a [`BlockchainContext`]
    ///
    /// The two fetches have no data dependency and are issued
    /// concurrently; both must succeed before construction proceeds.
    pub async fn build(&self) -> Result<BlockchainContext> {
        let (node_info, headers) = tokio::join!(
            self.api.node_info(),
            self.api.last_headers(LAST_HEADERS_IN_CONTEXT),
        );
        let node_info = node_info?;
        let headers = normalize_headers(headers?)?;

        debug!(
            network = ?self.network_type,
            tip = headers[headers.len() - 1].height,
            "blockchain context built"
        );
        Ok(BlockchainContext {
            network_type: self.network_type,
            node_info,
            headers,
        })
    }
}

/// Sort headers ascending by height and validate strict contiguity
///
/// The remote side does not specify an order (commonly newest-first);
/// the defining contract here is the sort order, not a literal reverse.
fn normalize_headers(mut headers: Vec<BlockHeader>) -> Result<Vec<BlockHeader>> {
    if headers.is_empty() {
        return Err(ClientError::Protocol(
            "node returned an empty header list".to_string(),
        ));
    }
    if headers.len() > LAST_HEADERS_IN_CONTEXT as usize {
        return Err(ClientError::Protocol(format!(
            "node returned {} headers, requested {}",
            headers.len(),
            LAST_HEADERS_IN_CONTEXT
        )));
    }
    headers.sort_by_key(|h| h.height);
    for pair in headers.windows(2) {
        if pair[1].height != pair[0].height + 1 {
            return Err(ClientError::InconsistentChainState(format!(
                "header window is not contiguous at heights {} and {}",
                pair[0].height, pair[1].height
            )));
        }
    }
    Ok(headers)
}

/// Immutable snapshot of chain state at fetch time
///
/// The header window is contiguous, strictly ascending by height, and
/// ends at the chain tip as of the fetch. Staleness is the caller's
/// responsibility; there is no background refresh.
#[derive(Debug, Clone)]
pub struct BlockchainContext {
    network_type: NetworkType,
    node_info: NodeInfo,
    headers: Vec<BlockHeader>,
}

impl BlockchainContext {
    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    pub fn node_info(&self) -> &NodeInfo {
        &self.node_info
    }

    /// The recent header window, ascending by height
    pub fn headers(&self) -> &[BlockHeader] {
        &self.headers
    }

    /// The chain tip header at fetch time
    pub fn tip(&self) -> &BlockHeader {
        // the window is validated non-empty at construction
        &self.headers[self.headers.len() - 1]
    }
}
