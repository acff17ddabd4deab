//! MCP server handler and lifecycle.
//!
//! The server owns one [`Dispatcher`] built from the full tool catalogue.
//! STDIO and TCP reach it through rmcp's `ToolRouter`; the HTTP transport
//! calls [`McpServer::call_tool`] directly. Both paths end in the same
//! `Dispatcher::invoke`.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    model::{CallToolResult, JsonObject, ServerCapabilities, ServerInfo},
    tool_handler,
};
use tracing::{info, warn};

use super::config::Config;
use super::error::Result as ServerResult;
use crate::domains::miro::{BoardApi, MiroClient};
use crate::domains::tools::definitions::build_tool_registry;
use crate::domains::tools::{Dispatcher, ToolContext, ToolError, build_tool_router};

const INSTRUCTIONS: &str = "Tools for working with Miro boards: boards, items \
    (sticky notes, cards, shapes, texts, frames, images, documents, embeds, \
    connectors, mind map nodes), tags, groups and members, plus enterprise \
    administration. Every tool returns JSON text; failures come back as error \
    results rather than protocol errors.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,
    dispatcher: Arc<Dispatcher>,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Build the server against the live Miro API.
    ///
    /// A missing access token is not an error here: the server starts and
    /// each remote call reports the missing credential.
    pub fn new(config: Config) -> ServerResult<Self> {
        let client = MiroClient::new(&config.api, &config.credentials)?;
        if !client.has_token() {
            warn!("No Miro access token configured; remote calls will fail");
        }
        Self::with_api(config, Arc::new(client))
    }

    /// Build the server against any [`BoardApi`] implementation.
    pub fn with_api(config: Config, api: Arc<dyn BoardApi>) -> ServerResult<Self> {
        let config = Arc::new(config);
        let registry = build_tool_registry()?;
        info!("Registered {} tools", registry.len());

        let context = ToolContext::new(api, config.clone());
        let dispatcher = Arc::new(Dispatcher::new(registry, context));

        Ok(Self {
            tool_router: build_tool_router(dispatcher.clone()),
            dispatcher,
            config,
        })
    }

    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// Every tool as `{name, description, inputSchema}` (HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.dispatcher
            .registry()
            .list_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Invoke a tool by name (HTTP transport).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> std::result::Result<CallToolResult, ToolError> {
        self.dispatcher.invoke(name, arguments).await
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::envelope;
    use serde_json::json;

    fn server(api: Arc<MockApi>) -> McpServer {
        McpServer::with_api(Config::default(), api).unwrap()
    }

    #[test]
    fn test_info_advertises_tools_only() {
        let info = server(Arc::new(MockApi::new())).get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
    }

    #[test]
    fn test_list_tools_matches_registry() {
        let server = server(Arc::new(MockApi::new()));
        let tools = server.list_tools();
        assert_eq!(tools.len(), server.dispatcher.registry().len());
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[tokio::test]
    async fn test_call_tool_goes_through_dispatcher() {
        let api = Arc::new(MockApi::returning(json!({ "id": "b1" })));
        let server = server(api.clone());

        let args = json!({ "boardId": "b1" }).as_object().cloned();
        let result = server.call_tool("get-specific-board", args).await.unwrap();

        assert!(!envelope::is_error(&result));
        assert_eq!(api.last_request().path(), "/v2/boards/b1");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let server = server(Arc::new(MockApi::new()));
        let err = server.call_tool("nope", None).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_token_surfaces_per_call() {
        let server = McpServer::new(Config::default()).unwrap();
        let args = json!({ "boardId": "b1" }).as_object().cloned();
        let result = server.call_tool("get-specific-board", args).await.unwrap();

        assert!(envelope::is_error(&result));
        assert!(envelope::first_text(&result).unwrap().contains("MIRO_ACCESS_TOKEN"));
    }
}
