//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every route delegates to the shared [`Dispatcher`], so STDIO/TCP calls go
//! through the same validation, timeout and envelope path as HTTP calls.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};

use super::ToolError;
use super::dispatch::Dispatcher;

/// Build the tool router with one route per registered tool.
pub fn build_tool_router<S>(dispatcher: Arc<Dispatcher>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let mut router = ToolRouter::new();
    for descriptor in dispatcher.registry().descriptors() {
        let name = descriptor.name().to_string();
        let dispatcher = dispatcher.clone();
        router = router.with_route(ToolRoute::new_dyn(
            descriptor.to_tool(),
            move |ctx: ToolCallContext<'_, S>| {
                let args = ctx.arguments.clone();
                let dispatcher = dispatcher.clone();
                let name = name.clone();
                async move { dispatcher.invoke(&name, args).await.map_err(to_mcp_error) }.boxed()
            },
        ));
    }
    router
}

fn to_mcp_error(err: ToolError) -> McpError {
    match err {
        ToolError::NotFound(_) => McpError::invalid_params(err.to_string(), None),
        other => McpError::internal_error(other.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::ToolContext;
    use crate::domains::tools::definitions::build_tool_registry;

    struct TestServer {}

    fn dispatcher() -> Arc<Dispatcher> {
        let context = ToolContext::new(Arc::new(MockApi::new()), Arc::new(Config::default()));
        Arc::new(Dispatcher::new(build_tool_registry().unwrap(), context))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(dispatcher());
        let tools = router.list_all();

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"list-boards"));
        assert!(names.contains(&"create-sticky-note-item"));
        assert!(names.contains(&"create-items-in-bulk"));
        assert!(names.contains(&"get-mindmap-node"));
    }

    #[test]
    fn test_registry_matches_router() {
        let dispatcher = dispatcher();
        let registry_names: Vec<String> = dispatcher
            .registry()
            .tool_names()
            .into_iter()
            .map(String::from)
            .collect();

        let router: ToolRouter<TestServer> = build_tool_router(dispatcher);
        let router_tools = router.list_all();

        assert_eq!(registry_names.len(), router_tools.len());
        for tool in router_tools {
            assert!(registry_names.contains(&tool.name.to_string()));
        }
    }

    #[test]
    fn test_not_found_maps_to_invalid_params() {
        let err = to_mcp_error(ToolError::not_found("x"));
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }
}
