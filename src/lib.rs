//! Miro MCP server library.
//!
//! Exposes Miro whiteboard operations as Model Context Protocol tools.
//!
//! - **core**: configuration, errors, the server handler, local file
//!   access rules and transports
//! - **domains**
//!   - **miro**: the REST API boundary (`BoardApi`, `MiroClient`)
//!   - **tools**: the tool framework (descriptors, registry, dispatch,
//!     envelopes, bulk fan-out) and the tool catalogue
//!
//! # Example
//!
//! ```rust,no_run
//! use miro_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = TransportService::new(config.transport.clone());
//!     transport.run(McpServer::new(config)?).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
