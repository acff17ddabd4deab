//! Shape tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    AnchoredPosition, PartialPosition, RotatedGeometry, board_path, body, fetch,
    item_get_delete_tools, require_any, require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// Geometric form of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    Rectangle,
    Circle,
    Triangle,
    Rhombus,
    RoundedRectangle,
    Pentagon,
    Hexagon,
    Octagon,
    Star,
    Arrow,
    Bracket,
}

/// Style of a shape.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Color of the shape border (hex format, e.g. #000000).
    pub border_color: Option<String>,
    /// Width of the shape border.
    pub border_width: Option<f64>,
    /// Style of the shape border (normal, dashed, etc.).
    pub border_style: Option<String>,
    /// Opacity of the shape border (0-1).
    pub border_opacity: Option<f64>,
    /// Fill color of the shape (hex format, e.g. #000000).
    pub fill_color: Option<String>,
    /// Opacity of the shape fill (0-1).
    pub fill_opacity: Option<f64>,
    /// Color of the text in the shape (hex format, e.g. #000000).
    pub color: Option<String>,
}

/// Width and height of a new shape.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ShapeGeometry {
    /// Width of the shape.
    pub width: f64,
    /// Height of the shape.
    pub height: f64,
}

/// Content of a new shape.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ShapeData {
    /// Type of the shape.
    #[serde(rename = "type")]
    pub shape: ShapeType,
    /// Text content to display inside the shape.
    pub content: Option<String>,
}

/// Changes to a shape's content.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ShapeDataChanges {
    /// Updated type of the shape.
    pub shape: Option<ShapeType>,
    /// Updated text content to display inside the shape.
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ShapeBody<G> {
    data: Option<ShapeDataChanges>,
    position: Option<PartialPosition>,
    geometry: Option<G>,
    style: Option<ShapeStyle>,
}

fn positive(field: &str, value: Option<f64>) -> Result<(), String> {
    match value {
        Some(v) if v <= 0.0 => Err(format!("{} must be positive, got {}", field, v)),
        _ => Ok(()),
    }
}

/// Parameters for creating a shape.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShapeParams {
    /// Unique identifier (ID) of the board where the shape will be created.
    pub board_id: String,
    /// The content and configuration of the shape.
    pub data: ShapeData,
    /// Position of the shape on the board.
    pub position: AnchoredPosition,
    /// Dimensions of the shape.
    pub geometry: ShapeGeometry,
    /// Style configuration of the shape.
    pub style: Option<ShapeStyle>,
}

impl ToolParams for CreateShapeParams {
    fn validate(&self) -> Result<(), String> {
        positive("geometry.width", Some(self.geometry.width))?;
        positive("geometry.height", Some(self.geometry.height))
    }
}

#[derive(Debug, Clone)]
pub struct CreateShapeTool;

#[async_trait]
impl ToolHandler for CreateShapeTool {
    const NAME: &'static str = "create-shape-item";
    const DESCRIPTION: &'static str = "Create a new shape item on a Miro board";
    type Params = CreateShapeParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let position = params.position;
        let shape = ShapeBody {
            data: Some(ShapeDataChanges {
                shape: Some(params.data.shape),
                content: params.data.content,
            }),
            position: Some(PartialPosition {
                x: Some(position.x),
                y: Some(position.y),
                origin: Some(position.origin.0),
                relative_to: Some(position.relative_to.0),
            }),
            geometry: Some(params.geometry),
            style: params.style,
        };
        let request =
            ApiRequest::post(board_path(&params.board_id, &["shapes"])).json(body(&shape)?);
        fetch(&ctx, request).await
    }
}

/// Parameters for updating a shape.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShapeParams {
    /// Unique identifier (ID) of the board that contains the shape.
    pub board_id: String,
    /// Unique identifier (ID) of the shape that you want to update.
    pub item_id: String,
    /// The updated content and configuration of the shape.
    pub data: Option<ShapeDataChanges>,
    /// Updated position of the shape on the board.
    pub position: Option<PartialPosition>,
    /// Updated dimensions of the shape.
    pub geometry: Option<RotatedGeometry>,
    /// Updated style configuration of the shape.
    pub style: Option<ShapeStyle>,
}

impl ToolParams for UpdateShapeParams {
    fn validate(&self) -> Result<(), String> {
        require_any(
            &[
                self.data.is_some(),
                self.position.is_some(),
                self.geometry.is_some(),
                self.style.is_some(),
            ],
            "data, position, geometry or style",
        )?;
        if let Some(geometry) = &self.geometry {
            positive("geometry.width", geometry.width)?;
            positive("geometry.height", geometry.height)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct UpdateShapeTool;

#[async_trait]
impl ToolHandler for UpdateShapeTool {
    const NAME: &'static str = "update-shape-item";
    const DESCRIPTION: &'static str = "Update an existing shape item on a Miro board";
    type Params = UpdateShapeParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let shape = ShapeBody {
            data: params.data,
            position: params.position,
            geometry: params.geometry,
            style: params.style,
        };
        let request = ApiRequest::patch(board_path(
            &params.board_id,
            &["shapes", params.item_id.as_str()],
        ))
        .json(body(&shape)?);
        fetch(&ctx, request).await
    }
}

item_get_delete_tools! {
    GetShapeTool => "get-shape-item",
        "Retrieve information about a specific shape item on a Miro board";
    DeleteShapeTool => "delete-shape-item",
        "Delete a shape item from a Miro board";
    segment: "shapes", label: "Shape"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::definitions::common::test_support::call;
    use crate::domains::tools::envelope;

    fn create_args(shape: &str, width: f64) -> serde_json::Value {
        json!({
            "boardId": "b1",
            "data": { "type": shape, "content": "Start" },
            "position": { "x": 0, "y": 0 },
            "geometry": { "width": width, "height": 50 }
        })
    }

    #[tokio::test]
    async fn test_create_shape_body() {
        let api = Arc::new(MockApi::new());
        call(&api, "create-shape-item", create_args("rounded_rectangle", 100.0)).await;

        let request = api.last_request();
        assert_eq!(request.path(), "/v2/boards/b1/shapes");
        let body = request.body.unwrap();
        assert_eq!(body["data"], json!({ "shape": "rounded_rectangle", "content": "Start" }));
        assert_eq!(body["position"]["origin"], "center");
        assert_eq!(body["geometry"], json!({ "width": 100.0, "height": 50.0 }));
    }

    #[tokio::test]
    async fn test_create_shape_rejects_unknown_type() {
        let api = Arc::new(MockApi::new());
        let result = call(&api, "create-shape-item", create_args("blob", 100.0)).await;

        assert!(envelope::is_error(&result));
        assert!(envelope::first_text(&result).unwrap().contains("blob"));
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_shape_rejects_zero_width() {
        let api = Arc::new(MockApi::new());
        let result = call(&api, "create-shape-item", create_args("circle", 0.0)).await;

        assert!(envelope::is_error(&result));
        assert!(envelope::first_text(&result).unwrap().contains("geometry.width"));
    }
}
