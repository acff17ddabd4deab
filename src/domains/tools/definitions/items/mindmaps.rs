//! Mind map node tools. These live under Miro's experimental API.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    BoardItemParams, PageLimit, Position, body, confirm, fetch, null_as_default, require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// `v2-experimental/boards/{board_id}/mindmap_nodes[/{node_id}]`
fn mindmap_path(board_id: &str, node_id: Option<&str>) -> Vec<String> {
    let mut segments = vec![
        "v2-experimental".to_string(),
        "boards".to_string(),
        board_id.to_string(),
        "mindmap_nodes".to_string(),
    ];
    segments.extend(node_id.map(str::to_string));
    segments
}

/// Colors of a mind map node.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MindmapNodeStyle {
    /// Fill color for the node.
    pub fill_color: Option<String>,
    /// Text color for the node.
    pub text_color: Option<String>,
}

/// Content of a new mind map node.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MindmapNodeData {
    /// Text content for the mind map node.
    pub content: String,
    /// ID of the parent node (if this is a child node).
    pub parent_id: Option<String>,
    pub style: Option<MindmapNodeStyle>,
}

/// Parameters for creating a mind map node.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMindmapNodeParams {
    /// Unique identifier (ID) of the board where you want to create the node.
    pub board_id: String,

    /// The content and style configuration of the mind map node.
    pub data: MindmapNodeData,

    /// Position of the node on the board.
    pub position: Position,
}

impl ToolParams for CreateMindmapNodeParams {}

#[derive(Debug, Clone)]
pub struct CreateMindmapNodeTool;

#[async_trait]
impl ToolHandler for CreateMindmapNodeTool {
    const NAME: &'static str = "create-mindmap-node";
    const DESCRIPTION: &'static str = "Create a new mind map node on a Miro board";
    type Params = CreateMindmapNodeParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let node = json!({
            "data": {
                "nodeView": { "data": { "type": "text", "content": params.data.content } },
                "parentId": params.data.parent_id,
                "style": params.data.style,
            },
            "position": params.position,
        });
        let request = ApiRequest::post(mindmap_path(&params.board_id, None)).json(body(&node)?);
        fetch(&ctx, request).await
    }
}

#[derive(Debug, Clone)]
pub struct GetMindmapNodeTool;

#[async_trait]
impl ToolHandler for GetMindmapNodeTool {
    const NAME: &'static str = "get-mindmap-node";
    const DESCRIPTION: &'static str =
        "Retrieve information about a specific mind map node on a Miro board";
    type Params = BoardItemParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(mindmap_path(&params.board_id, Some(&params.item_id)));
        fetch(&ctx, request).await
    }
}

/// Parameters for listing mind map nodes.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListMindmapNodesParams {
    /// Unique identifier (ID) of the board from which you want to retrieve mind map nodes.
    pub board_id: String,

    /// Maximum number of results to return (default: 50).
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: PageLimit,

    /// Cursor for pagination.
    pub cursor: Option<String>,
}

impl ToolParams for ListMindmapNodesParams {}

#[derive(Debug, Clone)]
pub struct GetMindmapNodesTool;

#[async_trait]
impl ToolHandler for GetMindmapNodesTool {
    const NAME: &'static str = "get-mindmap-nodes";
    const DESCRIPTION: &'static str = "Retrieve a list of mind map nodes on a Miro board";
    type Params = ListMindmapNodesParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(mindmap_path(&params.board_id, None))
            .query("limit", params.limit)
            .query_opt("cursor", params.cursor);
        fetch(&ctx, request).await
    }
}

#[derive(Debug, Clone)]
pub struct DeleteMindmapNodeTool;

#[async_trait]
impl ToolHandler for DeleteMindmapNodeTool {
    const NAME: &'static str = "delete-mindmap-node";
    const DESCRIPTION: &'static str = "Delete a mind map node from a Miro board";
    type Params = BoardItemParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::delete(mindmap_path(&params.board_id, Some(&params.item_id)));
        let message = format!(
            "Mind map node {} successfully deleted from board {}",
            params.item_id, params.board_id
        );
        confirm(&ctx, request, message).await
    }
}
