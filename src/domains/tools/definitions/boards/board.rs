//! Board lifecycle tools: list, create, update, copy, share, delete.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    PageLimit, SharingAccess, body, confirm, fetch, null_as_default, require_any, require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

fn boards() -> Vec<String> {
    vec!["v2".to_string(), "boards".to_string()]
}

/// Board settings shared by create, update and copy.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct BoardChanges {
    name: Option<String>,
    description: Option<String>,
    policy: Option<Value>,
    team_id: Option<String>,
}

impl BoardChanges {
    fn new(
        name: Option<String>,
        description: Option<String>,
        sharing_policy: Option<SharingAccess>,
        team_id: Option<String>,
    ) -> Self {
        let policy = sharing_policy.map(|access| {
            let mut policy = Map::new();
            policy.insert("sharingPolicy".to_string(), access.policy());
            Value::Object(policy)
        });
        Self {
            name: name.filter(|n| !n.is_empty()),
            description,
            policy,
            team_id: team_id.filter(|t| !t.is_empty()),
        }
    }
}

// ============================================================================
// list-boards
// ============================================================================

/// Parameters for listing boards.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListBoardsParams {
    /// Maximum number of boards to return (default: 50).
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: PageLimit,

    /// Offset for pagination (default: 0).
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset: u32,
}

impl ToolParams for ListBoardsParams {}

#[derive(Debug, Clone)]
pub struct ListBoardsTool;

#[async_trait]
impl ToolHandler for ListBoardsTool {
    const NAME: &'static str = "list-boards";
    const DESCRIPTION: &'static str = "List all available Miro boards";
    type Params = ListBoardsParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        let request = ApiRequest::get(boards())
            .query("limit", params.limit)
            .query("offset", params.offset);
        fetch(&ctx, request).await
    }
}

// ============================================================================
// create-board
// ============================================================================

/// Parameters for creating a board.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardParams {
    /// Name of the board to create.
    pub name: String,

    /// Description of the board.
    pub description: Option<String>,

    /// Sharing policy for the board (default: private).
    pub sharing_policy: Option<SharingAccess>,

    /// Team ID to assign the board to.
    pub team_id: Option<String>,
}

impl ToolParams for CreateBoardParams {}

#[derive(Debug, Clone)]
pub struct CreateBoardTool;

#[async_trait]
impl ToolHandler for CreateBoardTool {
    const NAME: &'static str = "create-board";
    const DESCRIPTION: &'static str =
        "Create a new Miro board with specified name and sharing policies";
    type Params = CreateBoardParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board name", params.name.as_str())]) {
            return Ok(missing);
        }
        let changes = BoardChanges::new(
            Some(params.name),
            params.description,
            Some(params.sharing_policy.unwrap_or(SharingAccess::Private)),
            params.team_id,
        );
        fetch(&ctx, ApiRequest::post(boards()).json(body(&changes)?)).await
    }
}

// ============================================================================
// update-board
// ============================================================================

/// Parameters for updating a board.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardParams {
    /// Unique identifier (ID) of the board that you want to update.
    pub board_id: String,

    /// New name for the board.
    pub name: Option<String>,

    /// New description for the board.
    pub description: Option<String>,

    /// New sharing policy for the board.
    pub sharing_policy: Option<SharingAccess>,

    /// New team ID to assign the board to.
    pub team_id: Option<String>,
}

impl ToolParams for UpdateBoardParams {
    fn validate(&self) -> Result<(), String> {
        require_any(
            &[
                self.name.is_some(),
                self.description.is_some(),
                self.sharing_policy.is_some(),
                self.team_id.is_some(),
            ],
            "name, description, sharingPolicy or teamId",
        )
    }
}

#[derive(Debug, Clone)]
pub struct UpdateBoardTool;

#[async_trait]
impl ToolHandler for UpdateBoardTool {
    const NAME: &'static str = "update-board";
    const DESCRIPTION: &'static str = "Update an existing Miro board with new settings";
    type Params = UpdateBoardParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let changes = BoardChanges::new(
            params.name,
            params.description,
            params.sharing_policy,
            params.team_id,
        );
        let mut segments = boards();
        segments.push(params.board_id);
        fetch(&ctx, ApiRequest::patch(segments).json(body(&changes)?)).await
    }
}

// ============================================================================
// copy-board
// ============================================================================

/// Parameters for copying a board.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CopyBoardParams {
    /// Unique identifier (ID) of the board that you want to copy.
    pub copy_from: String,

    /// Name for the new copied board.
    pub name: Option<String>,

    /// Description for the new copied board.
    pub description: Option<String>,

    /// Sharing policy for the new copied board.
    pub sharing_policy: Option<SharingAccess>,

    /// Team ID to assign the new copied board to.
    pub team_id: Option<String>,
}

impl ToolParams for CopyBoardParams {}

#[derive(Debug, Clone)]
pub struct CopyBoardTool;

#[async_trait]
impl ToolHandler for CopyBoardTool {
    const NAME: &'static str = "copy-board";
    const DESCRIPTION: &'static str =
        "Create a copy of an existing Miro board with optional new settings";
    type Params = CopyBoardParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Source board ID", params.copy_from.as_str())]) {
            return Ok(missing);
        }
        let changes = BoardChanges::new(
            params.name,
            params.description,
            params.sharing_policy,
            params.team_id,
        );
        let request = ApiRequest::put(boards())
            .query("copy_from", &params.copy_from)
            .json(body(&changes)?);
        fetch(&ctx, request).await
    }
}

// ============================================================================
// get-specific-board / delete-board
// ============================================================================

/// Parameters addressing one board.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardIdParams {
    /// Unique identifier (ID) of the board.
    pub board_id: String,
}

impl ToolParams for BoardIdParams {}

#[derive(Debug, Clone)]
pub struct GetSpecificBoardTool;

#[async_trait]
impl ToolHandler for GetSpecificBoardTool {
    const NAME: &'static str = "get-specific-board";
    const DESCRIPTION: &'static str = "Retrieve information about a specific Miro board by its ID";
    type Params = BoardIdParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let mut segments = boards();
        segments.push(params.board_id);
        fetch(&ctx, ApiRequest::get(segments)).await
    }
}

#[derive(Debug, Clone)]
pub struct DeleteBoardTool;

#[async_trait]
impl ToolHandler for DeleteBoardTool {
    const NAME: &'static str = "delete-board";
    const DESCRIPTION: &'static str = "Delete a Miro board by its ID. Deleted boards go to Trash (on paid plans) and can be restored via UI within 90 days after deletion.";
    type Params = BoardIdParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let message = format!("Board {} has been successfully deleted.", params.board_id);
        let mut segments = boards();
        segments.push(params.board_id);
        confirm(&ctx, ApiRequest::delete(segments), message).await
    }
}

// ============================================================================
// share-board
// ============================================================================

/// Parameters for changing who can access a board.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareBoardParams {
    /// ID of the board to share.
    pub board_id: String,

    /// Access level for the shared board.
    pub access_level: SharingAccess,

    /// Team ID to assign the board to.
    pub team_id: Option<String>,
}

impl ToolParams for ShareBoardParams {}

#[derive(Debug, Clone)]
pub struct ShareBoardTool;

#[async_trait]
impl ToolHandler for ShareBoardTool {
    const NAME: &'static str = "share-board";
    const DESCRIPTION: &'static str =
        "Share a Miro board with specific access level and optional team assignment";
    type Params = ShareBoardParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let changes = BoardChanges::new(None, None, Some(params.access_level), params.team_id);
        let mut segments = boards();
        segments.push(params.board_id);
        fetch(&ctx, ApiRequest::patch(segments).json(body(&changes)?)).await
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
    async fn test_list_boards_default_paging() {
        let api = Arc::new(MockApi::returning(json!({ "data": [] })));
        let result = call(&api, "list-boards", json!({})).await;

        assert!(!envelope::is_error(&result));
        let request = api.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path(), "/v2/boards");
        assert_eq!(request.query_value("limit"), Some("50"));
        assert_eq!(request.query_value("offset"), Some("0"));
    }

    #[tokio::test]
    async fn test_create_board_defaults_to_private() {
        let api = Arc::new(MockApi::new());
        let result = call(&api, "create-board", json!({ "name": "Roadmap" })).await;

        assert!(!envelope::is_error(&result));
        let body = api.last_request().body.unwrap();
        assert_eq!(body["name"], "Roadmap");
        assert_eq!(body["policy"]["sharingPolicy"]["access"], "private");
        assert!(body.get("description").is_none());
    }

    #[tokio::test]
    async fn test_create_board_blank_name_is_precondition_error() {
        let api = Arc::new(MockApi::new());
        let result = call(&api, "create-board", json!({ "name": "" })).await;

        assert!(envelope::is_error(&result));
        assert_eq!(envelope::first_text(&result), Some("Board name is required"));
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_board_rejects_unknown_policy() {
        let api = Arc::new(MockApi::new());
        let result = call(
            &api,
            "create-board",
            json!({ "name": "x", "sharingPolicy": "everyone" }),
        )
        .await;

        assert!(envelope::is_error(&result));
        assert!(envelope::first_text(&result).unwrap().contains("unknown variant"));
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_board_requires_a_change() {
        let api = Arc::new(MockApi::new());
        let result = call(&api, "update-board", json!({ "boardId": "b1" })).await;
        assert!(envelope::is_error(&result));
        assert_eq!(api.request_count(), 0);

        let result = call(
            &api,
            "update-board",
            json!({ "boardId": "b1", "sharingPolicy": "edit" }),
        )
        .await;
        assert!(!envelope::is_error(&result));
        let request = api.last_request();
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.path(), "/v2/boards/b1");
        assert_eq!(request.body.unwrap(), json!({ "policy": { "sharingPolicy": { "access": "edit" } } }));
    }

    #[tokio::test]
    async fn test_copy_board_uses_query() {
        let api = Arc::new(MockApi::new());
        call(&api, "copy-board", json!({ "copyFrom": "src", "name": "Copy" })).await;

        let request = api.last_request();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.query_value("copy_from"), Some("src"));
        assert_eq!(request.body.unwrap()["name"], "Copy");
    }

    #[tokio::test]
    async fn test_delete_board_confirms() {
        let api = Arc::new(MockApi::returning(serde_json::Value::Null));
        let result = call(&api, "delete-board", json!({ "boardId": "b1" })).await;

        let payload = json_of(&result);
        assert_eq!(payload["success"], true);
        assert_eq!(payload["message"], "Board b1 has been successfully deleted.");
        assert_eq!(api.last_request().method, Method::DELETE);
    }

    #[tokio::test]
    async fn test_share_board_sets_access() {
        let api = Arc::new(MockApi::new());
        call(
            &api,
            "share-board",
            json!({ "boardId": "b1", "accessLevel": "view", "teamId": "t1" }),
        )
        .await;

        let body = api.last_request().body.unwrap();
        assert_eq!(body["policy"]["sharingPolicy"]["access"], "view");
        assert_eq!(body["teamId"], "t1");
    }

    #[tokio::test]
    async fn test_remote_failure_is_error_result() {
        let api = Arc::new(MockApi::failing(404, json!({ "message": "Board not found" })));
        let result = call(&api, "get-specific-board", json!({ "boardId": "nope" })).await;

        assert!(envelope::is_error(&result));
        let text = envelope::first_text(&result).unwrap();
        assert!(text.contains("404"));
        assert!(text.contains("Board not found"));
    }
}
