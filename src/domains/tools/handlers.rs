//! Tool handler contract.
//!
//! Each tool in `definitions/` is a zero-sized type implementing
//! [`ToolHandler`]: a name, a description, a typed parameter struct and an
//! async `execute`. Dependencies arrive through [`ToolContext`] at call time,
//! so handlers hold no state of their own.

use std::sync::Arc;

use rmcp::model::CallToolResult;
use serde_json::Value;

use super::ToolError;
use super::descriptor::ToolParams;
use crate::core::config::Config;
use crate::domains::miro::{ApiError, ApiRequest, BoardApi};

/// Outcome of a handler: a result (success or application-level error) or a
/// failure the dispatch path turns into an error result.
pub type ToolResult = Result<CallToolResult, ToolError>;

/// Dependencies injected into every handler invocation.
#[derive(Clone)]
pub struct ToolContext {
    api: Arc<dyn BoardApi>,
    config: Arc<Config>,
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext").finish_non_exhaustive()
    }
}

impl ToolContext {
    pub fn new(api: Arc<dyn BoardApi>, config: Arc<Config>) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send one request through the injected API client.
    pub async fn call(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.api.send(request).await
    }
}

/// Trait implemented by every tool.
///
/// `execute` only runs with parameters that already passed schema
/// deserialization and [`ToolParams::validate`].
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + 'static {
    /// Unique tool name, used as the dispatch key.
    const NAME: &'static str;

    /// Human-readable description shown to clients.
    const DESCRIPTION: &'static str;

    /// Typed input contract.
    type Params: ToolParams;

    /// Run the tool.
    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult;
}
