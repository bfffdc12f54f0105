//! Zabbix JSON-RPC client and connection configuration

mod api;
mod client;
mod config;
mod error;
mod rpc;

pub use api::{ItemFilter, MonitoringApi};
pub use client::ZabbixClient;
pub use config::{ApiConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_URL};
pub use error::{ApiError, RpcError};
