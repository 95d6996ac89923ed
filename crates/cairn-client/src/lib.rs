//! Cairn Client - Node state fetching and blockchain context bootstrap
//!
//! This crate turns two remote reads (node info, recent headers) into
//! an immutable [`BlockchainContext`] snapshot that downstream
//! transaction-building and proof-verification logic depends on.

pub mod context;
pub mod error;
pub mod node;

pub use context::{BlockchainContext, ContextBuilder, NetworkType, LAST_HEADERS_IN_CONTEXT};
pub use error::{ClientError, Result};
pub use node::{BlockHeader, NodeApi, NodeClient, NodeInfo};
