//! Tools domain module.
//!
//! This module handles everything tool-related: the descriptor contract,
//! the registry, the shared dispatch path and the Miro tool catalogue.
//!
//! ## Architecture
//!
//! - `descriptor.rs` - Tool descriptors and typed, validated input contracts
//! - `handlers.rs` - The `ToolHandler` trait and the injected `ToolContext`
//! - `registry.rs` - Name-keyed collection of descriptors, built at startup
//! - `dispatch.rs` - Per-call lookup, validation, timeout and panic capture
//! - `envelope.rs` - Uniform success / error results
//! - `bulk.rs` - Concurrent fan-out with per-item outcomes
//! - `router.rs` - rmcp ToolRouter for STDIO/TCP transport
//! - `definitions/` - Individual tool implementations, grouped by family
//!
//! ## Adding a New Tool
//!
//! 1. Define a params struct and implement `ToolParams` for it
//! 2. Implement `ToolHandler` on a unit struct in the family's file
//! 3. Add `register_tool::<MyTool>()` to the family's `register` function
//!
//! Every transport picks the new tool up from the registry.

mod bulk;
mod descriptor;
pub mod definitions;
mod dispatch;
pub mod envelope;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use bulk::{BulkFailure, BulkReport, BulkSuccess, gather_indexed};
pub use descriptor::{ToolDescriptor, ToolParams, parse_arguments};
pub use dispatch::Dispatcher;
pub use error::ToolError;
pub use handlers::{ToolContext, ToolHandler, ToolResult};
pub use registry::ToolRegistry;
pub use router::build_tool_router;
