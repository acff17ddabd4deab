//! Frame tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    Geometry, Position, board_path, body, fetch, item_get_delete_tools, require_any, require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// Frame settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrameData {
    /// Title of the frame. This title appears at the top of the frame.
    pub title: Option<String>,
    /// Format of the frame. Only 'custom' is supported currently.
    pub format: Option<String>,
    /// Type of the frame. Only 'freeform' is supported currently.
    #[serde(rename = "type")]
    pub frame_type: Option<String>,
    /// Hide or reveal the content inside a frame (Enterprise plan only).
    pub show_content: Option<bool>,
}

/// Style of a frame.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrameStyle {
    /// Fill color for the frame. Hex values like #f5f6f8, #d5f692, etc.
    pub fill_color: Option<String>,
}

#[derive(Debug, Serialize)]
struct FrameBody {
    data: Option<FrameData>,
    position: Option<Position>,
    geometry: Option<Geometry>,
    style: Option<FrameStyle>,
}

/// Parameters for creating a frame.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFrameParams {
    /// Unique identifier (ID) of the board where the frame will be created.
    pub board_id: String,
    /// The content and configuration of the frame.
    #[serde(default)]
    pub data: FrameData,
    /// Position of the frame on the board.
    pub position: Position,
    /// Dimensions of the frame.
    pub geometry: Option<Geometry>,
    /// Style configuration of the frame.
    pub style: Option<FrameStyle>,
}

impl ToolParams for CreateFrameParams {}

#[derive(Debug, Clone)]
pub struct CreateFrameTool;

#[async_trait]
impl ToolHandler for CreateFrameTool {
    const NAME: &'static str = "create-frame";
    const DESCRIPTION: &'static str = "Create a new frame on a Miro board";
    type Params = CreateFrameParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let frame = FrameBody {
            data: Some(params.data),
            position: Some(params.position),
            geometry: params.geometry,
            style: params.style,
        };
        let request =
            ApiRequest::post(board_path(&params.board_id, &["frames"])).json(body(&frame)?);
        fetch(&ctx, request).await
    }
}

/// Parameters for updating a frame.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFrameParams {
    /// Unique identifier (ID) of the board that contains the frame.
    pub board_id: String,
    /// Unique identifier (ID) of the frame that you want to update.
    pub item_id: String,
    /// The updated content and configuration of the frame.
    pub data: Option<FrameData>,
    /// Updated position of the frame on the board.
    pub position: Option<Position>,
    /// Updated dimensions of the frame.
    pub geometry: Option<Geometry>,
    /// Updated style configuration of the frame.
    pub style: Option<FrameStyle>,
}

impl ToolParams for UpdateFrameParams {
    fn validate(&self) -> Result<(), String> {
        require_any(
            &[
                self.data.is_some(),
                self.position.is_some(),
                self.geometry.is_some(),
                self.style.is_some(),
            ],
            "data, position, geometry or style",
        )
    }
}

#[derive(Debug, Clone)]
pub struct UpdateFrameTool;

#[async_trait]
impl ToolHandler for UpdateFrameTool {
    const NAME: &'static str = "update-frame-item";
    const DESCRIPTION: &'static str = "Update a frame on a Miro board based on the data, style, \
        or geometry properties provided";
    type Params = UpdateFrameParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let frame = FrameBody {
            data: params.data,
            position: params.position,
            geometry: params.geometry,
            style: params.style,
        };
        let request = ApiRequest::patch(board_path(
            &params.board_id,
            &["frames", params.item_id.as_str()],
        ))
        .json(body(&frame)?);
        fetch(&ctx, request).await
    }
}

item_get_delete_tools! {
    GetFrameTool => "get-frame-item",
        "Retrieve information about a specific frame on a Miro board";
    DeleteFrameTool => "delete-frame-item",
        "Delete a frame from a Miro board";
    segment: "frames", label: "Frame"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::definitions::common::test_support::call;

    #[tokio::test]
    async fn test_create_frame_renames_type() {
        let api = Arc::new(MockApi::new());
        call(
            &api,
            "create-frame",
            json!({
                "boardId": "b1",
                "data": { "title": "Sprint", "type": "freeform" },
                "position": { "x": 0, "y": 0 },
                "geometry": { "width": 800, "height": 600 }
            }),
        )
        .await;

        let request = api.last_request();
        assert_eq!(request.path(), "/v2/boards/b1/frames");
        assert_eq!(
            request.body.unwrap(),
            json!({
                "data": { "title": "Sprint", "type": "freeform" },
                "position": { "x": 0.0, "y": 0.0 },
                "geometry": { "width": 800.0, "height": 600.0 }
            })
        );
    }

    #[tokio::test]
    async fn test_create_frame_without_data() {
        let api = Arc::new(MockApi::new());
        call(&api, "create-frame", json!({ "boardId": "b1", "position": { "x": 5, "y": 5 } })).await;
        assert_eq!(
            api.last_request().body.unwrap(),
            json!({ "position": { "x": 5.0, "y": 5.0 } })
        );
    }
}
