//! Error types for talking to the Zabbix API

use thiserror::Error;

/// Failure of a single JSON-RPC exchange
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {code}: {message} {data}")]
    Remote {
        code: i64,
        message: String,
        data: String,
    },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("unsupported server: {0}")]
    Unsupported(String),
}

/// Errors surfaced to commands, grouped by how the caller must react
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid settings; nothing has been sent yet
    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot connect to Zabbix at {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: RpcError,
    },

    #[error("{method} failed: {source}")]
    Query {
        method: &'static str,
        #[source]
        source: RpcError,
    },

    #[error("updating item {item_id} failed: {source}")]
    Mutation {
        item_id: String,
        #[source]
        source: RpcError,
    },
}

impl ApiError {
    /// Whether the run must stop rather than skip the failed step
    pub fn is_fatal(&self) -> bool {
        matches!(self, ApiError::Config(_) | ApiError::Connection { .. })
    }
}
