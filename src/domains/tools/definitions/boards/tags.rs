//! Tag tools: board-level tags and their attachment to items.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    PageLimit, board_path, body, confirm, fetch, null_as_default, require_any, require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TagBody {
    title: Option<String>,
    fill_color: Option<String>,
}

/// Title of a new tag.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TagData {
    /// Title of the tag.
    pub title: String,
}

/// Parameters for creating a tag.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagParams {
    /// Unique identifier (ID) of the board where the tag will be created.
    pub board_id: String,

    /// The content and configuration of the tag.
    pub data: TagData,

    /// Fill color of the tag (e.g. red, light_green, blue).
    pub fill_color: Option<String>,
}

impl ToolParams for CreateTagParams {}

#[derive(Debug, Clone)]
pub struct CreateTagTool;

#[async_trait]
impl ToolHandler for CreateTagTool {
    const NAME: &'static str = "create-tag";
    const DESCRIPTION: &'static str = "Create a new tag on a Miro board";
    type Params = CreateTagParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let tag = TagBody {
            title: Some(params.data.title),
            fill_color: params.fill_color,
        };
        let request = ApiRequest::post(board_path(&params.board_id, &["tags"])).json(body(&tag)?);
        fetch(&ctx, request).await
    }
}

/// Parameters addressing one tag.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagParams {
    /// Unique identifier (ID) of the board that contains the tag.
    pub board_id: String,

    /// Unique identifier (ID) of the tag.
    pub tag_id: String,
}

impl ToolParams for TagParams {}

#[derive(Debug, Clone)]
pub struct GetTagTool;

#[async_trait]
impl ToolHandler for GetTagTool {
    const NAME: &'static str = "get-tag";
    const DESCRIPTION: &'static str = "Retrieve information about a specific tag on a Miro board";
    type Params = TagParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Tag ID", params.tag_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(board_path(&params.board_id, &["tags", params.tag_id.as_str()]));
        fetch(&ctx, request).await
    }
}

#[derive(Debug, Clone)]
pub struct DeleteTagTool;

#[async_trait]
impl ToolHandler for DeleteTagTool {
    const NAME: &'static str = "delete-tag";
    const DESCRIPTION: &'static str =
        "Delete a tag from a Miro board. The tag is also removed from every item it was attached to.";
    type Params = TagParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Tag ID", params.tag_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::delete(board_path(&params.board_id, &["tags", params.tag_id.as_str()]));
        let message = format!(
            "Tag {} successfully deleted from board {}",
            params.tag_id, params.board_id
        );
        confirm(&ctx, request, message).await
    }
}

/// Parameters for listing tags on a board.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTagsParams {
    /// Unique identifier (ID) of the board for which you want to retrieve all tags.
    pub board_id: String,

    /// Maximum number of tags to return (default: 50).
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: PageLimit,

    /// Offset for pagination (default: 0).
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset: u32,
}

impl ToolParams for ListTagsParams {}

#[derive(Debug, Clone)]
pub struct GetAllTagsTool;

#[async_trait]
impl ToolHandler for GetAllTagsTool {
    const NAME: &'static str = "get-all-tags";
    const DESCRIPTION: &'static str = "Retrieve all tags on a Miro board";
    type Params = ListTagsParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(board_path(&params.board_id, &["tags"]))
            .query("limit", params.limit)
            .query("offset", params.offset);
        fetch(&ctx, request).await
    }
}

/// Parameters for updating a tag.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagParams {
    /// Unique identifier (ID) of the board that contains the tag.
    pub board_id: String,

    /// Unique identifier (ID) of the tag that you want to update.
    pub tag_id: String,

    /// Updated title of the tag.
    pub title: Option<String>,

    /// Updated fill color of the tag.
    pub fill_color: Option<String>,
}

impl ToolParams for UpdateTagParams {
    fn validate(&self) -> Result<(), String> {
        require_any(
            &[self.title.is_some(), self.fill_color.is_some()],
            "title or fillColor",
        )
    }
}

#[derive(Debug, Clone)]
pub struct UpdateTagTool;

#[async_trait]
impl ToolHandler for UpdateTagTool {
    const NAME: &'static str = "update-tag";
    const DESCRIPTION: &'static str = "Update an existing tag on a Miro board";
    type Params = UpdateTagParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Tag ID", params.tag_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let tag = TagBody {
            title: params.title,
            fill_color: params.fill_color,
        };
        let request = ApiRequest::patch(board_path(&params.board_id, &["tags", params.tag_id.as_str()]))
            .json(body(&tag)?);
        fetch(&ctx, request).await
    }
}

/// Parameters linking a tag and an item.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagItemParams {
    /// Unique identifier (ID) of the board that contains the tag and item.
    pub board_id: String,

    /// Unique identifier (ID) of the tag.
    pub tag_id: String,

    /// Unique identifier (ID) of the item.
    pub item_id: String,
}

impl ToolParams for TagItemParams {}

impl TagItemParams {
    fn check(&self) -> Result<(), rmcp::model::CallToolResult> {
        require_ids(&[
            ("Board ID", self.board_id.as_str()),
            ("Tag ID", self.tag_id.as_str()),
            ("Item ID", self.item_id.as_str()),
        ])
    }
}

#[derive(Debug, Clone)]
pub struct AttachTagTool;

#[async_trait]
impl ToolHandler for AttachTagTool {
    const NAME: &'static str = "attach-tag";
    const DESCRIPTION: &'static str = "Attach a tag to an item on a Miro board";
    type Params = TagItemParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = params.check() {
            return Ok(missing);
        }
        let request = ApiRequest::post(board_path(&params.board_id, &["items", params.item_id.as_str()]))
            .query("tag_id", &params.tag_id);
        confirm(&ctx, request, "Tag attached successfully".to_string()).await
    }
}

#[derive(Debug, Clone)]
pub struct DetachTagTool;

#[async_trait]
impl ToolHandler for DetachTagTool {
    const NAME: &'static str = "detach-tag";
    const DESCRIPTION: &'static str = "Detach a tag from an item on a Miro board";
    type Params = TagItemParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = params.check() {
            return Ok(missing);
        }
        let request = ApiRequest::delete(board_path(&params.board_id, &["items", params.item_id.as_str()]))
            .query("tag_id", &params.tag_id);
        confirm(&ctx, request, "Tag detached successfully".to_string()).await
    }
}

#[derive(Debug, Clone)]
pub struct GetItemTagsTool;

#[async_trait]
impl ToolHandler for GetItemTagsTool {
    const NAME: &'static str = "get-item-tags";
    const DESCRIPTION: &'static str =
        "Retrieve all tags attached to a specific item on a Miro board";
    type Params = super::super::common::BoardItemParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(board_path(
            &params.board_id,
            &["items", params.item_id.as_str(), "tags"],
        ));
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
    async fn test_create_tag_body() {
        let api = Arc::new(MockApi::new());
        call(
            &api,
            "create-tag",
            json!({ "boardId": "b1", "data": { "title": "urgent" }, "fillColor": "red" }),
        )
        .await;

        let request = api.last_request();
        assert_eq!(request.path(), "/v2/boards/b1/tags");
        assert_eq!(request.body.unwrap(), json!({ "title": "urgent", "fillColor": "red" }));
    }

    #[tokio::test]
    async fn test_attach_and_detach_use_tag_query() {
        let api = Arc::new(MockApi::returning(serde_json::Value::Null));
        let args = json!({ "boardId": "b1", "tagId": "t1", "itemId": "i1" });

        let attached = call(&api, "attach-tag", args.clone()).await;
        assert_eq!(json_of(&attached)["message"], "Tag attached successfully");
        let request = api.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "/v2/boards/b1/items/i1");
        assert_eq!(request.query_value("tag_id"), Some("t1"));

        call(&api, "detach-tag", args).await;
        assert_eq!(api.last_request().method, Method::DELETE);
    }

    #[tokio::test]
    async fn test_attach_requires_tag_id() {
        let api = Arc::new(MockApi::new());
        let result = call(
            &api,
            "attach-tag",
            json!({ "boardId": "b1", "tagId": "", "itemId": "i1" }),
        )
        .await;
        assert_eq!(envelope::first_text(&result), Some("Tag ID is required"));
    }

    #[tokio::test]
    async fn test_update_tag_needs_a_change() {
        let api = Arc::new(MockApi::new());
        let result = call(&api, "update-tag", json!({ "boardId": "b1", "tagId": "t1" })).await;
        assert!(envelope::is_error(&result));
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_item_tags_path() {
        let api = Arc::new(MockApi::new());
        call(&api, "get-item-tags", json!({ "boardId": "b1", "itemId": "i1" })).await;
        assert_eq!(api.last_request().path(), "/v2/boards/b1/items/i1/tags");
    }
}
