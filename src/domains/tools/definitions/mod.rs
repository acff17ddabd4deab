//! The Miro tool catalogue.
//!
//! Tools are grouped by family. Each family exposes a `register` function
//! and [`build_tool_registry`] chains them into the registry the server
//! publishes at startup.

pub mod boards;
pub mod common;
pub mod enterprise;
pub mod items;

use super::{ToolError, ToolRegistry};

/// Build the registry holding every tool. Fails on a duplicate name or an
/// invalid descriptor.
pub fn build_tool_registry() -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    boards::register(&mut registry)?;
    items::register(&mut registry)?;
    enterprise::register(&mut registry)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const CATALOGUE: &[&str] = &[
        "add-project-member",
        "attach-tag",
        "copy-board",
        "create-app-card-item",
        "create-board",
        "create-board-export-job",
        "create-card-item",
        "create-connector",
        "create-document-item",
        "create-embed-item",
        "create-frame",
        "create-group",
        "create-image-item-using-file",
        "create-image-item-using-url",
        "create-items-in-bulk",
        "create-items-in-bulk-using-file",
        "create-mindmap-node",
        "create-shape-item",
        "create-sticky-note-item",
        "create-tag",
        "create-text-item",
        "delete-app-card-item",
        "delete-board",
        "delete-card-item",
        "delete-connector",
        "delete-document-item",
        "delete-embed-item",
        "delete-frame-item",
        "delete-group",
        "delete-image-item",
        "delete-item",
        "delete-mindmap-node",
        "delete-shape-item",
        "delete-sticky-note-item",
        "delete-tag",
        "delete-text-item",
        "detach-tag",
        "get-all-board-members",
        "get-all-cases",
        "get-all-groups",
        "get-all-legal-holds",
        "get-all-tags",
        "get-app-card-item",
        "get-audit-logs",
        "get-board-classification",
        "get-board-content-logs",
        "get-board-export-job-results",
        "get-board-export-job-status",
        "get-card-item",
        "get-case",
        "get-connectors",
        "get-document-item",
        "get-embed-item",
        "get-frame-item",
        "get-group",
        "get-group-items",
        "get-image-item",
        "get-item-tags",
        "get-items-on-board",
        "get-legal-hold",
        "get-legal-hold-content-items",
        "get-mindmap-node",
        "get-mindmap-nodes",
        "get-organization-info",
        "get-organization-member",
        "get-organization-members",
        "get-project-member",
        "get-shape-item",
        "get-specific-board",
        "get-specific-board-member",
        "get-specific-connector",
        "get-specific-item",
        "get-sticky-note-item",
        "get-tag",
        "get-text-item",
        "list-boards",
        "remove-board-member",
        "remove-project-member",
        "share-board",
        "ungroup-items",
        "update-app-card-item",
        "update-board",
        "update-board-classification",
        "update-board-member",
        "update-card-item",
        "update-connector",
        "update-document-item",
        "update-embed-item",
        "update-frame-item",
        "update-group",
        "update-image-item",
        "update-image-item-using-file",
        "update-item-position",
        "update-shape-item",
        "update-sticky-note-item",
        "update-tag",
        "update-text-item",
    ];

    #[test]
    fn test_registry_holds_the_whole_catalogue() {
        let registry = build_tool_registry().unwrap();
        assert_eq!(registry.len(), CATALOGUE.len());
        for name in CATALOGUE {
            assert!(registry.contains(name), "missing tool {}", name);
        }
    }

    #[test]
    fn test_tool_names_are_unique() {
        let registry = build_tool_registry().unwrap();
        let names = registry.tool_names();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_every_tool_publishes_an_object_schema() {
        let registry = build_tool_registry().unwrap();
        for tool in registry.list_tools() {
            assert!(!tool.description.as_deref().unwrap_or_default().is_empty());
            assert_eq!(
                tool.input_schema.get("type").and_then(|t| t.as_str()),
                Some("object"),
                "{} schema is not an object",
                tool.name
            );
        }
    }

    #[test]
    fn test_building_twice_conflicts() {
        let mut registry = build_tool_registry().unwrap();
        let err = boards::register(&mut registry).unwrap_err();
        assert!(matches!(err, ToolError::DuplicateTool(name) if name == "list-boards"));
    }
}
