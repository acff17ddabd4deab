//! Group tools. A group binds several items so they move together.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    PageLimit, board_path, confirm, fetch, null_as_default, require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

fn non_empty_items(items: &[String]) -> Result<(), String> {
    if items.is_empty() {
        return Err("items must contain at least one item ID".to_string());
    }
    if items.iter().any(|id| id.trim().is_empty()) {
        return Err("items must not contain blank item IDs".to_string());
    }
    Ok(())
}

// ============================================================================
// create-group
// ============================================================================

/// Parameters for grouping items.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupParams {
    /// Unique identifier (ID) of the board.
    pub board_id: String,

    /// IDs of the items to group together.
    pub items: Vec<String>,
}

impl ToolParams for CreateGroupParams {
    fn validate(&self) -> Result<(), String> {
        non_empty_items(&self.items)
    }
}

#[derive(Debug, Clone)]
pub struct CreateGroupTool;

#[async_trait]
impl ToolHandler for CreateGroupTool {
    const NAME: &'static str = "create-group";
    const DESCRIPTION: &'static str = "Create a group of items on a Miro board";
    type Params = CreateGroupParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let request = ApiRequest::post(board_path(&params.board_id, &["groups"]))
            .json(json!({ "data": { "items": params.items } }));
        fetch(&ctx, request).await
    }
}

// ============================================================================
// get-all-groups
// ============================================================================

/// Parameters for listing groups.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListGroupsParams {
    /// Unique identifier (ID) of the board.
    pub board_id: String,

    /// Maximum number of groups to return (default: 50).
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: PageLimit,

    /// Cursor from a previous page.
    pub cursor: Option<String>,
}

impl ToolParams for ListGroupsParams {}

#[derive(Debug, Clone)]
pub struct GetAllGroupsTool;

#[async_trait]
impl ToolHandler for GetAllGroupsTool {
    const NAME: &'static str = "get-all-groups";
    const DESCRIPTION: &'static str = "Retrieve all groups on a Miro board";
    type Params = ListGroupsParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(board_path(&params.board_id, &["groups"]))
            .query("limit", params.limit)
            .query_opt("cursor", params.cursor);
        fetch(&ctx, request).await
    }
}

// ============================================================================
// get-group / get-group-items / ungroup-items / delete-group
// ============================================================================

/// Parameters addressing one group.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupParams {
    /// Unique identifier (ID) of the board.
    pub board_id: String,

    /// Unique identifier (ID) of the group.
    pub group_id: String,
}

impl ToolParams for GroupParams {}

impl GroupParams {
    fn check(&self) -> Result<(), rmcp::model::CallToolResult> {
        require_ids(&[
            ("Board ID", self.board_id.as_str()),
            ("Group ID", self.group_id.as_str()),
        ])
    }

    fn path(&self) -> Vec<String> {
        board_path(&self.board_id, &["groups", self.group_id.as_str()])
    }
}

#[derive(Debug, Clone)]
pub struct GetGroupTool;

#[async_trait]
impl ToolHandler for GetGroupTool {
    const NAME: &'static str = "get-group";
    const DESCRIPTION: &'static str = "Retrieve a specific group on a Miro board";
    type Params = GroupParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = params.check() {
            return Ok(missing);
        }
        fetch(&ctx, ApiRequest::get(params.path())).await
    }
}

/// Parameters for listing the items of a group.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupItemsParams {
    /// Unique identifier (ID) of the board.
    pub board_id: String,

    /// Unique identifier (ID) of the group.
    pub group_id: String,

    /// Maximum number of items to return (default: 50).
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: PageLimit,

    /// Cursor from a previous page.
    pub cursor: Option<String>,
}

impl ToolParams for GroupItemsParams {}

#[derive(Debug, Clone)]
pub struct GetGroupItemsTool;

#[async_trait]
impl ToolHandler for GetGroupItemsTool {
    const NAME: &'static str = "get-group-items";
    const DESCRIPTION: &'static str = "Retrieve the items that belong to a group on a Miro board";
    type Params = GroupItemsParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Group ID", params.group_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(board_path(&params.board_id, &["groups", "items"]))
            .query("group_item_id", &params.group_id)
            .query("limit", params.limit)
            .query_opt("cursor", params.cursor);
        fetch(&ctx, request).await
    }
}

/// Parameters for dissolving a group.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveGroupParams {
    /// Unique identifier (ID) of the board.
    pub board_id: String,

    /// Unique identifier (ID) of the group.
    pub group_id: String,

    /// Also delete the grouped items (default: false).
    #[serde(default, deserialize_with = "null_as_default")]
    pub delete_items: bool,
}

impl ToolParams for RemoveGroupParams {}

impl RemoveGroupParams {
    fn request(&self) -> Result<ApiRequest, rmcp::model::CallToolResult> {
        require_ids(&[
            ("Board ID", self.board_id.as_str()),
            ("Group ID", self.group_id.as_str()),
        ])?;
        Ok(
            ApiRequest::delete(board_path(&self.board_id, &["groups", self.group_id.as_str()]))
                .query("delete_items", self.delete_items),
        )
    }
}

#[derive(Debug, Clone)]
pub struct UngroupItemsTool;

#[async_trait]
impl ToolHandler for UngroupItemsTool {
    const NAME: &'static str = "ungroup-items";
    const DESCRIPTION: &'static str =
        "Ungroup the items of a group on a Miro board, optionally deleting them";
    type Params = RemoveGroupParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        let request = match params.request() {
            Ok(request) => request,
            Err(missing) => return Ok(missing),
        };
        let message = format!("Group {} successfully ungrouped", params.group_id);
        confirm(&ctx, request, message).await
    }
}

#[derive(Debug, Clone)]
pub struct DeleteGroupTool;

#[async_trait]
impl ToolHandler for DeleteGroupTool {
    const NAME: &'static str = "delete-group";
    const DESCRIPTION: &'static str = "Delete a group from a Miro board";
    type Params = RemoveGroupParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        let request = match params.request() {
            Ok(request) => request,
            Err(missing) => return Ok(missing),
        };
        let message = format!(
            "Group {} successfully deleted from board {}",
            params.group_id, params.board_id
        );
        confirm(&ctx, request, message).await
    }
}

// ============================================================================
// update-group
// ============================================================================

/// Parameters for replacing the members of a group.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupParams {
    /// Unique identifier (ID) of the board.
    pub board_id: String,

    /// Unique identifier (ID) of the group.
    pub group_id: String,

    /// New set of item IDs for the group.
    pub items: Vec<String>,
}

impl ToolParams for UpdateGroupParams {
    fn validate(&self) -> Result<(), String> {
        non_empty_items(&self.items)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateGroupTool;

#[async_trait]
impl ToolHandler for UpdateGroupTool {
    const NAME: &'static str = "update-group";
    const DESCRIPTION: &'static str = "Replace the items of an existing group on a Miro board";
    type Params = UpdateGroupParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Group ID", params.group_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::put(board_path(
            &params.board_id,
            &["groups", params.group_id.as_str()],
        ))
        .json(json!({ "data": { "items": params.items } }));
        fetch(&ctx, request).await
    }
}
