//! Card tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    Position, RotatedGeometry, board_path, body, check_date, fetch, item_get_delete_tools,
    require_any, require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// Content of a new card.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    /// Title of the card.
    pub title: String,
    /// Description of the card.
    pub description: Option<String>,
    /// User ID of the assignee.
    pub assignee_id: Option<String>,
    /// Due date for the card (ISO 8601 format).
    pub due_date: Option<String>,
}

/// Changes to a card's content.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardDataChanges {
    /// Updated title of the card.
    pub title: Option<String>,
    /// Updated description of the card.
    pub description: Option<String>,
    /// Updated user ID of the assignee.
    pub assignee_id: Option<String>,
    /// Updated due date for the card (ISO 8601 format).
    pub due_date: Option<String>,
}

/// Style of a card.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardStyle {
    /// Color of the card.
    pub card_theme: Option<String>,
}

#[derive(Debug, Serialize)]
struct CardBody<D> {
    data: Option<D>,
    position: Option<Position>,
    geometry: Option<RotatedGeometry>,
    style: Option<CardStyle>,
}

fn due_date(value: Option<&str>) -> Result<(), String> {
    value.map_or(Ok(()), |date| check_date("dueDate", date))
}

/// Parameters for creating a card.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardParams {
    /// Unique identifier (ID) of the board where the card will be created.
    pub board_id: String,
    /// The content and configuration of the card.
    pub data: CardData,
    /// Position of the card on the board.
    pub position: Position,
    /// Dimensions of the card.
    pub geometry: Option<RotatedGeometry>,
    /// Style configuration of the card.
    pub style: Option<CardStyle>,
}

impl ToolParams for CreateCardParams {
    fn validate(&self) -> Result<(), String> {
        due_date(self.data.due_date.as_deref())
    }
}

#[derive(Debug, Clone)]
pub struct CreateCardTool;

#[async_trait]
impl ToolHandler for CreateCardTool {
    const NAME: &'static str = "create-card-item";
    const DESCRIPTION: &'static str = "Create a new card item on a Miro board";
    type Params = CreateCardParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let card = CardBody {
            data: Some(params.data),
            position: Some(params.position),
            geometry: params.geometry,
            style: params.style,
        };
        let request = ApiRequest::post(board_path(&params.board_id, &["cards"])).json(body(&card)?);
        fetch(&ctx, request).await
    }
}

/// Parameters for updating a card.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardParams {
    /// Unique identifier (ID) of the board that contains the card.
    pub board_id: String,
    /// Unique identifier (ID) of the card that you want to update.
    pub item_id: String,
    /// The updated content and configuration of the card.
    pub data: Option<CardDataChanges>,
    /// Updated position of the card on the board.
    pub position: Option<Position>,
    /// Updated dimensions of the card.
    pub geometry: Option<RotatedGeometry>,
    /// Updated style configuration of the card.
    pub style: Option<CardStyle>,
}

impl ToolParams for UpdateCardParams {
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
        due_date(self.data.as_ref().and_then(|d| d.due_date.as_deref()))
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCardTool;

#[async_trait]
impl ToolHandler for UpdateCardTool {
    const NAME: &'static str = "update-card-item";
    const DESCRIPTION: &'static str = "Update an existing card item on a Miro board";
    type Params = UpdateCardParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let card = CardBody {
            data: params.data,
            position: params.position,
            geometry: params.geometry,
            style: params.style,
        };
        let request = ApiRequest::patch(board_path(
            &params.board_id,
            &["cards", params.item_id.as_str()],
        ))
        .json(body(&card)?);
        fetch(&ctx, request).await
    }
}

item_get_delete_tools! {
    GetCardTool => "get-card-item",
        "Retrieve information about a specific card item on a Miro board";
    DeleteCardTool => "delete-card-item",
        "Delete a card item from a Miro board";
    segment: "cards", label: "Card"
}
