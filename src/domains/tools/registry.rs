//! Tool Registry - the set of tools the server exposes.
//!
//! Descriptors are kept in registration order for listing and indexed by
//! name for dispatch. Names are unique: registering a second descriptor
//! under an existing name is a startup error.

use std::collections::HashMap;

use rmcp::model::Tool;
use tracing::debug;

use super::ToolError;
use super::descriptor::ToolDescriptor;
use super::handlers::ToolHandler;

/// Tool registry - manages all available tools.
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor. Fails if its name is already taken.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<&mut Self, ToolError> {
        let name = descriptor.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }
        debug!("Registering tool: {}", name);
        self.index.insert(name, self.tools.len());
        self.tools.push(descriptor);
        Ok(self)
    }

    /// Build and add the descriptor for a [`ToolHandler`].
    pub fn register_tool<T: ToolHandler>(&mut self) -> Result<&mut Self, ToolError> {
        self.register(ToolDescriptor::of::<T>()?)
    }

    /// Look up a descriptor by exact name.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(ToolDescriptor::name).collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for listing: every transport
    /// reports exactly these.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDescriptor::to_tool).collect()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::descriptor::ToolParams;
    use crate::domains::tools::envelope;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct NoParams {}

    impl ToolParams for NoParams {}

    fn descriptor(name: &str, description: &str) -> ToolDescriptor {
        ToolDescriptor::new(name, description, |_ctx, _p: NoParams| async move {
            Ok(envelope::success_text("ok"))
        })
        .unwrap()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry
            .register(descriptor("list-boards", "List boards"))
            .unwrap()
            .register(descriptor("get-board", "Get a board"))
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("get-board"));
        assert_eq!(registry.get("list-boards").unwrap().description(), "List boards");
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.tool_names(), vec!["list-boards", "get-board"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(descriptor("get-board", "first")).unwrap();
        let err = registry
            .register(descriptor("get-board", "second"))
            .unwrap_err();

        assert!(matches!(err, ToolError::DuplicateTool(ref name) if name == "get-board"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("get-board").unwrap().description(), "first");
    }

    #[test]
    fn test_list_tools_matches_names() {
        let mut registry = ToolRegistry::new();
        registry.register(descriptor("a", "A")).unwrap();
        registry.register(descriptor("b", "B")).unwrap();

        let listed: Vec<String> = registry
            .list_tools()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(listed, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.list_tools().is_empty());
    }
}
