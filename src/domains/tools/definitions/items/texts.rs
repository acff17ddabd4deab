//! Text item tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    PartialPosition, Position, board_path, body, choose_or_default, fetch, item_get_delete_tools,
    require_any, require_ids,
};
use crate::domains::tools::definitions::items::sticky_notes::TEXT_ALIGNS;
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// Width of a text item. Height follows from the content.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TextGeometry {
    /// Width of the text item.
    pub width: Option<f64>,
}

/// Style of a text item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Color of the text.
    pub color: Option<String>,
    /// Font size of the text.
    pub font_size: Option<f64>,
    /// Alignment of the text (left, center, right).
    pub text_align: Option<String>,
}

impl TextStyle {
    pub(crate) fn checked(self) -> Self {
        Self {
            text_align: self
                .text_align
                .map(|a| choose_or_default("textAlign", &a, TEXT_ALIGNS, "left")),
            ..self
        }
    }
}

/// Content of a text item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TextData {
    /// Text content of the text item.
    pub content: String,
}

/// Changes to a text item's content.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TextDataChanges {
    /// Updated text content of the text item.
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
struct TextBody<D, P> {
    data: Option<D>,
    position: Option<P>,
    geometry: Option<TextGeometry>,
    style: Option<TextStyle>,
}

/// Parameters for creating a text item.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTextParams {
    /// Unique identifier (ID) of the board where the text will be created.
    pub board_id: String,
    /// The content of the text item.
    pub data: TextData,
    /// Position of the text item on the board.
    pub position: Position,
    /// Dimensions of the text item.
    pub geometry: Option<TextGeometry>,
    /// Style configuration of the text item.
    pub style: Option<TextStyle>,
}

impl ToolParams for CreateTextParams {}

#[derive(Debug, Clone)]
pub struct CreateTextTool;

#[async_trait]
impl ToolHandler for CreateTextTool {
    const NAME: &'static str = "create-text-item";
    const DESCRIPTION: &'static str = "Create a new text item on a Miro board";
    type Params = CreateTextParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let text = TextBody {
            data: Some(params.data),
            position: Some(params.position),
            geometry: params.geometry,
            style: params.style.map(TextStyle::checked),
        };
        let request = ApiRequest::post(board_path(&params.board_id, &["texts"])).json(body(&text)?);
        fetch(&ctx, request).await
    }
}

/// Parameters for updating a text item.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextParams {
    /// Unique identifier (ID) of the board that contains the text item.
    pub board_id: String,
    /// Unique identifier (ID) of the text item that you want to update.
    pub item_id: String,
    /// The updated content of the text item.
    pub data: Option<TextDataChanges>,
    /// Updated position of the text item on the board.
    pub position: Option<PartialPosition>,
    /// Updated dimensions of the text item.
    pub geometry: Option<TextGeometry>,
    /// Updated style configuration of the text item.
    pub style: Option<TextStyle>,
}

impl ToolParams for UpdateTextParams {
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
pub struct UpdateTextTool;

#[async_trait]
impl ToolHandler for UpdateTextTool {
    const NAME: &'static str = "update-text-item";
    const DESCRIPTION: &'static str = "Update an existing text item on a Miro board";
    type Params = UpdateTextParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let text = TextBody {
            data: params.data,
            position: params.position,
            geometry: params.geometry,
            style: params.style.map(TextStyle::checked),
        };
        let request = ApiRequest::patch(board_path(
            &params.board_id,
            &["texts", params.item_id.as_str()],
        ))
        .json(body(&text)?);
        fetch(&ctx, request).await
    }
}

item_get_delete_tools! {
    GetTextTool => "get-text-item",
        "Retrieve information about a specific text item on a Miro board";
    DeleteTextTool => "delete-text-item",
        "Delete a text item from a Miro board";
    segment: "texts", label: "Text item"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::definitions::common::test_support::call;

    #[tokio::test]
    async fn test_create_text_style() {
        let api = Arc::new(MockApi::new());
        call(
            &api,
            "create-text-item",
            json!({
                "boardId": "b1",
                "data": { "content": "Heading" },
                "position": { "x": 0, "y": 0 },
                "style": { "fontSize": 24, "textAlign": "justify" }
            }),
        )
        .await;

        let request = api.last_request();
        assert_eq!(request.path(), "/v2/boards/b1/texts");
        assert_eq!(
            request.body.unwrap()["style"],
            json!({ "fontSize": 24.0, "textAlign": "left" })
        );
    }

    #[tokio::test]
    async fn test_get_text_path() {
        let api = Arc::new(MockApi::new());
        call(&api, "get-text-item", json!({ "boardId": "b1", "itemId": "t1" })).await;
        assert_eq!(api.last_request().path(), "/v2/boards/b1/texts/t1");
    }
}
