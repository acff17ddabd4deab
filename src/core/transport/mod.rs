//! Transport layer for the MCP server.
//!
//! - **STDIO** (feature `stdio`, default): the standard MCP mode
//! - **TCP** (feature `tcp`): line-delimited JSON-RPC over a socket
//! - **HTTP** (feature `http`): JSON-RPC over POST plus a health endpoint
//!
//! The transport is chosen at startup from `MCP_TRANSPORT`.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
