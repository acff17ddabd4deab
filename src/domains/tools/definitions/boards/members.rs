//! Board member tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    PageLimit, board_path, fetch, null_as_default, require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// Role of a user on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BoardRole {
    Viewer,
    Commenter,
    Editor,
    Coowner,
    Owner,
}

/// Parameters for listing board members.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListBoardMembersParams {
    /// ID of the board to retrieve members from.
    pub board_id: String,

    /// Maximum number of members to retrieve (default: 50).
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: PageLimit,

    /// Offset for pagination (default: 0).
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset: u32,
}

impl ToolParams for ListBoardMembersParams {}

#[derive(Debug, Clone)]
pub struct GetAllBoardMembersTool;

#[async_trait]
impl ToolHandler for GetAllBoardMembersTool {
    const NAME: &'static str = "get-all-board-members";
    const DESCRIPTION: &'static str = "Retrieve all members of a specific Miro board";
    type Params = ListBoardMembersParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(board_path(&params.board_id, &["members"]))
            .query("limit", params.limit)
            .query("offset", params.offset);
        fetch(&ctx, request).await
    }
}

/// Parameters addressing one board member.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardMemberParams {
    /// ID of the board.
    pub board_id: String,

    /// ID of the board member.
    pub member_id: String,
}

impl ToolParams for BoardMemberParams {}

impl BoardMemberParams {
    fn check(&self) -> Result<(), rmcp::model::CallToolResult> {
        require_ids(&[
            ("Board ID", self.board_id.as_str()),
            ("Member ID", self.member_id.as_str()),
        ])
    }

    fn path(&self) -> Vec<String> {
        board_path(&self.board_id, &["members", self.member_id.as_str()])
    }
}

#[derive(Debug, Clone)]
pub struct GetSpecificBoardMemberTool;

#[async_trait]
impl ToolHandler for GetSpecificBoardMemberTool {
    const NAME: &'static str = "get-specific-board-member";
    const DESCRIPTION: &'static str = "Retrieve details of a specific member on a Miro board";
    type Params = BoardMemberParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = params.check() {
            return Ok(missing);
        }
        fetch(&ctx, ApiRequest::get(params.path())).await
    }
}

#[derive(Debug, Clone)]
pub struct RemoveBoardMemberTool;

#[async_trait]
impl ToolHandler for RemoveBoardMemberTool {
    const NAME: &'static str = "remove-board-member";
    const DESCRIPTION: &'static str = "Remove a specific member from a Miro board";
    type Params = BoardMemberParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = params.check() {
            return Ok(missing);
        }
        fetch(&ctx, ApiRequest::delete(params.path())).await
    }
}

/// Parameters for changing a member's role.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardMemberParams {
    /// ID of the board.
    pub board_id: String,

    /// ID of the board member to update.
    pub member_id: String,

    /// New role for the board member.
    pub role: BoardRole,
}

impl ToolParams for UpdateBoardMemberParams {}

#[derive(Debug, Clone)]
pub struct UpdateBoardMemberTool;

#[async_trait]
impl ToolHandler for UpdateBoardMemberTool {
    const NAME: &'static str = "update-board-member";
    const DESCRIPTION: &'static str = "Update a specific member's role on a Miro board";
    type Params = UpdateBoardMemberParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Member ID", params.member_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::patch(board_path(
            &params.board_id,
            &["members", params.member_id.as_str()],
        ))
        .json(json!({ "role": params.role }));
        fetch(&ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;
    use serde_json::json;

    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::definitions::common::test_support::call;
    use crate::domains::tools::envelope;

    #[tokio::test]
    async fn test_list_members_paging() {
        let api = Arc::new(MockApi::new());
        call(
            &api,
            "get-all-board-members",
            json!({ "boardId": "b1", "limit": null, "offset": 10 }),
        )
        .await;

        let request = api.last_request();
        assert_eq!(request.path(), "/v2/boards/b1/members");
        assert_eq!(request.query_value("limit"), Some("50"));
        assert_eq!(request.query_value("offset"), Some("10"));
    }

    #[tokio::test]
    async fn test_update_member_role() {
        let api = Arc::new(MockApi::new());
        let result = call(
            &api,
            "update-board-member",
            json!({ "boardId": "b1", "memberId": "m1", "role": "editor" }),
        )
        .await;

        assert!(!envelope::is_error(&result));
        let request = api.last_request();
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.path(), "/v2/boards/b1/members/m1");
        assert_eq!(request.body.unwrap(), json!({ "role": "editor" }));
    }

    #[tokio::test]
    async fn test_update_member_rejects_unknown_role() {
        let api = Arc::new(MockApi::new());
        let result = call(
            &api,
            "update-board-member",
            json!({ "boardId": "b1", "memberId": "m1", "role": "admin" }),
        )
        .await;

        assert!(envelope::is_error(&result));
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_remove_member_requires_member_id() {
        let api = Arc::new(MockApi::new());
        let result = call(
            &api,
            "remove-board-member",
            json!({ "boardId": "b1", "memberId": "" }),
        )
        .await;

        assert_eq!(envelope::first_text(&result), Some("Member ID is required"));
        assert_eq!(api.request_count(), 0);
    }
}
