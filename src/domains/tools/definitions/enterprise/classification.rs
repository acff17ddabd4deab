//! Board data classification tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{fetch, org_path, require_ids};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

fn classification_path(org_id: &str, team_id: &str, board_id: &str) -> Vec<String> {
    org_path(
        org_id,
        &["teams", team_id, "boards", board_id, "data-classification"],
    )
}

/// Parameters addressing a board within a team.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardClassificationParams {
    /// ID of the organization.
    pub org_id: String,
    /// ID of the team.
    pub team_id: String,
    /// Unique identifier of the board.
    pub board_id: String,
}

impl ToolParams for BoardClassificationParams {}

#[derive(Debug, Clone)]
pub struct GetBoardClassificationTool;

#[async_trait]
impl ToolHandler for GetBoardClassificationTool {
    const NAME: &'static str = "get-board-classification";
    const DESCRIPTION: &'static str = "Retrieves board classification for a board.";
    type Params = BoardClassificationParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Organization ID", params.org_id.as_str()),
            ("Team ID", params.team_id.as_str()),
            ("Board ID", params.board_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(classification_path(
            &params.org_id,
            &params.team_id,
            &params.board_id,
        ));
        fetch(&ctx, request).await
    }
}

/// Parameters for setting a board's classification label.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardClassificationParams {
    /// ID of the organization.
    pub org_id: String,
    /// ID of the team.
    pub team_id: String,
    /// Unique identifier of the board that you want to update.
    pub board_id: String,
    /// Unique identifier of the classification label to apply.
    pub label_id: String,
}

impl ToolParams for UpdateBoardClassificationParams {}

#[derive(Debug, Clone)]
pub struct UpdateBoardClassificationTool;

#[async_trait]
impl ToolHandler for UpdateBoardClassificationTool {
    const NAME: &'static str = "update-board-classification";
    const DESCRIPTION: &'static str = "Updates board classification for an existing board.";
    type Params = UpdateBoardClassificationParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Organization ID", params.org_id.as_str()),
            ("Team ID", params.team_id.as_str()),
            ("Board ID", params.board_id.as_str()),
            ("Label ID", params.label_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::patch(classification_path(
            &params.org_id,
            &params.team_id,
            &params.board_id,
        ))
        .json(json!({ "labelId": params.label_id }));
        fetch(&ctx, request).await
    }
}
