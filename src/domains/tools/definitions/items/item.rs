//! Generic item tools. These work on any item type through the
//! `/items` endpoints.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    BoardItemParams, ItemRef, PageLimit, PartialPosition, board_path, body, confirm, fetch,
    null_as_default, require_any, require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// Parameters for listing items on a board.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsParams {
    /// Unique identifier (ID) of the board whose items you want to retrieve.
    pub board_id: String,

    /// Maximum number of items to return (default: 50).
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: PageLimit,

    /// Cursor from a previous page.
    pub cursor: Option<String>,

    /// Only return items of this type (e.g. sticky_note, shape, frame).
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}

impl ToolParams for ListItemsParams {}

#[derive(Debug, Clone)]
pub struct GetItemsOnBoardTool;

#[async_trait]
impl ToolHandler for GetItemsOnBoardTool {
    const NAME: &'static str = "get-items-on-board";
    const DESCRIPTION: &'static str = "Retrieve all items on a specific Miro board";
    type Params = ListItemsParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(board_path(&params.board_id, &["items"]))
            .query("limit", params.limit)
            .query_opt("cursor", params.cursor)
            .query_opt("type", params.item_type);
        fetch(&ctx, request).await
    }
}

#[derive(Debug, Clone)]
pub struct GetSpecificItemTool;

#[async_trait]
impl ToolHandler for GetSpecificItemTool {
    const NAME: &'static str = "get-specific-item";
    const DESCRIPTION: &'static str = "Retrieve a specific item from a Miro board";
    type Params = BoardItemParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(board_path(
            &params.board_id,
            &["items", params.item_id.as_str()],
        ));
        fetch(&ctx, request).await
    }
}

#[derive(Debug, Clone)]
pub struct DeleteItemTool;

#[async_trait]
impl ToolHandler for DeleteItemTool {
    const NAME: &'static str = "delete-item";
    const DESCRIPTION: &'static str = "Delete a specific item from a Miro board";
    type Params = BoardItemParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::delete(board_path(
            &params.board_id,
            &["items", params.item_id.as_str()],
        ));
        let message = format!(
            "Item {} successfully deleted from board {}",
            params.item_id, params.board_id
        );
        confirm(&ctx, request, message).await
    }
}

// ============================================================================
// update-item-position
// ============================================================================

/// Parameters for moving an item or changing its parent frame.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemPositionParams {
    /// Unique identifier (ID) of the board that contains the item.
    pub board_id: String,

    /// Unique identifier (ID) of the item that you want to update.
    pub item_id: String,

    /// New position coordinates for the item.
    pub position: Option<PartialPosition>,

    /// Unique identifier (ID) of the new parent item.
    pub parent_id: Option<String>,
}

impl ToolParams for UpdateItemPositionParams {
    fn validate(&self) -> Result<(), String> {
        require_any(
            &[
                self.position.as_ref().is_some_and(|p| !p.is_empty()),
                self.parent_id.as_deref().is_some_and(|id| !id.is_empty()),
            ],
            "position or parentId",
        )
    }
}

#[derive(Debug, Serialize)]
struct PositionChange {
    position: Option<PartialPosition>,
    parent: Option<ItemRef>,
}

#[derive(Debug, Clone)]
pub struct UpdateItemPositionTool;

#[async_trait]
impl ToolHandler for UpdateItemPositionTool {
    const NAME: &'static str = "update-item-position";
    const DESCRIPTION: &'static str =
        "Update the position or parent of a specific item on a Miro board";
    type Params = UpdateItemPositionParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let change = PositionChange {
            position: params.position.filter(|p| !p.is_empty()),
            parent: params
                .parent_id
                .filter(|id| !id.is_empty())
                .map(|id| ItemRef { id }),
        };
        let request = ApiRequest::patch(board_path(
            &params.board_id,
            &["items", params.item_id.as_str()],
        ))
        .json(body(&change)?);
        fetch(&ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;
    use serde_json::json;

    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::definitions::common::test_support::{call, json_of};
    use crate::domains::tools::envelope;

    #[tokio::test]
    async fn test_items_on_board_query() {
        let api = Arc::new(MockApi::new());
        call(
            &api,
            "get-items-on-board",
            json!({ "boardId": "b1", "type": "sticky_note" }),
        )
        .await;

        let request = api.last_request();
        assert_eq!(request.path(), "/v2/boards/b1/items");
        assert_eq!(request.query_value("limit"), Some("50"));
        assert_eq!(request.query_value("type"), Some("sticky_note"));
        assert_eq!(request.query_value("cursor"), None);
    }

    #[tokio::test]
    async fn test_update_position_body() {
        let api = Arc::new(MockApi::new());
        call(
            &api,
            "update-item-position",
            json!({ "boardId": "b1", "itemId": "i1", "position": { "x": 10, "y": null }, "parentId": "f1" }),
        )
        .await;

        let request = api.last_request();
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.path(), "/v2/boards/b1/items/i1");
        assert_eq!(
            request.body.unwrap(),
            json!({ "position": { "x": 10.0 }, "parent": { "id": "f1" } })
        );
    }

    #[tokio::test]
    async fn test_update_position_needs_a_change() {
        let api = Arc::new(MockApi::new());
        let result = call(
            &api,
            "update-item-position",
            json!({ "boardId": "b1", "itemId": "i1", "position": {} }),
        )
        .await;

        assert!(envelope::is_error(&result));
        assert!(envelope::first_text(&result).unwrap().contains("position or parentId"));
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_item_confirms() {
        let api = Arc::new(MockApi::returning(serde_json::Value::Null));
        let result = call(&api, "delete-item", json!({ "boardId": "b1", "itemId": "i1" })).await;

        assert_eq!(
            json_of(&result)["message"],
            "Item i1 successfully deleted from board b1"
        );
        assert_eq!(api.last_request().method, Method::DELETE);
    }
}
