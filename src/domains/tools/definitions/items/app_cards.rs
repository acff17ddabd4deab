//! App card tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    Geometry, Position, board_path, body, fetch, item_get_delete_tools, require_any, require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// A custom field shown on an app card.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    /// Value of the field.
    pub value: String,
    /// Shape of the icon.
    pub icon_shape: Option<String>,
    /// Fill color of the field.
    pub fill_color: Option<String>,
    /// Color of the text.
    pub text_color: Option<String>,
}

/// Content of a new app card.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AppCardData {
    /// Title of the app card.
    pub title: String,
    /// Description of the app card.
    pub description: Option<String>,
    /// Status text of the app card.
    pub status: Option<String>,
    /// Custom fields to display on the app card.
    pub fields: Option<Vec<CustomField>>,
}

/// Changes to an app card's content.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AppCardDataChanges {
    /// Updated title of the app card.
    pub title: Option<String>,
    /// Updated description of the app card.
    pub description: Option<String>,
    /// Updated status text of the app card.
    pub status: Option<String>,
    /// Updated custom fields.
    pub fields: Option<Vec<CustomField>>,
}

#[derive(Debug, Serialize)]
struct AppCardBody<D> {
    data: Option<D>,
    position: Option<Position>,
    geometry: Option<Geometry>,
}

/// Parameters for creating an app card.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppCardParams {
    /// Unique identifier (ID) of the board where the app card will be created.
    pub board_id: String,
    /// The content and configuration of the app card.
    pub data: AppCardData,
    /// Position of the app card on the board.
    pub position: Position,
    /// Dimensions of the app card.
    pub geometry: Option<Geometry>,
}

impl ToolParams for CreateAppCardParams {}

#[derive(Debug, Clone)]
pub struct CreateAppCardTool;

#[async_trait]
impl ToolHandler for CreateAppCardTool {
    const NAME: &'static str = "create-app-card-item";
    const DESCRIPTION: &'static str = "Create a new app card item on a Miro board";
    type Params = CreateAppCardParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let card = AppCardBody {
            data: Some(params.data),
            position: Some(params.position),
            geometry: params.geometry,
        };
        let request =
            ApiRequest::post(board_path(&params.board_id, &["app_cards"])).json(body(&card)?);
        fetch(&ctx, request).await
    }
}

/// Parameters for updating an app card.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppCardParams {
    /// Unique identifier (ID) of the board that contains the app card.
    pub board_id: String,
    /// Unique identifier (ID) of the app card that you want to update.
    pub item_id: String,
    /// The updated content and configuration of the app card.
    pub data: Option<AppCardDataChanges>,
    /// Updated position of the app card on the board.
    pub position: Option<Position>,
    /// Updated dimensions of the app card.
    pub geometry: Option<Geometry>,
}

impl ToolParams for UpdateAppCardParams {
    fn validate(&self) -> Result<(), String> {
        require_any(
            &[self.data.is_some(), self.position.is_some(), self.geometry.is_some()],
            "data, position or geometry",
        )
    }
}

#[derive(Debug, Clone)]
pub struct UpdateAppCardTool;

#[async_trait]
impl ToolHandler for UpdateAppCardTool {
    const NAME: &'static str = "update-app-card-item";
    const DESCRIPTION: &'static str = "Update an existing app card item on a Miro board";
    type Params = UpdateAppCardParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let card = AppCardBody {
            data: params.data,
            position: params.position,
            geometry: params.geometry,
        };
        let request = ApiRequest::patch(board_path(
            &params.board_id,
            &["app_cards", params.item_id.as_str()],
        ))
        .json(body(&card)?);
        fetch(&ctx, request).await
    }
}

item_get_delete_tools! {
    GetAppCardTool => "get-app-card-item",
        "Retrieve information about a specific app card item on a Miro board";
    DeleteAppCardTool => "delete-app-card-item",
        "Delete an app card item from a Miro board";
    segment: "app_cards", label: "App card"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::definitions::common::test_support::call;
    use crate::domains::tools::envelope;

    #[tokio::test]
    async fn test_create_app_card_body() {
        let api = Arc::new(MockApi::new());
        call(
            &api,
            "create-app-card-item",
            json!({
                "boardId": "b1",
                "data": { "title": "Ticket", "fields": [{ "value": "P1", "fillColor": "#ff0000" }] },
                "position": { "x": 1, "y": 2 }
            }),
        )
        .await;

        let request = api.last_request();
        assert_eq!(request.path(), "/v2/boards/b1/app_cards");
        assert_eq!(
            request.body.unwrap(),
            json!({
                "data": { "title": "Ticket", "fields": [{ "value": "P1", "fillColor": "#ff0000" }] },
                "position": { "x": 1.0, "y": 2.0 }
            })
        );
    }

    #[tokio::test]
    async fn test_create_app_card_requires_title() {
        let api = Arc::new(MockApi::new());
        let result = call(
            &api,
            "create-app-card-item",
            json!({ "boardId": "b1", "data": {}, "position": { "x": 1, "y": 2 } }),
        )
        .await;

        assert!(envelope::is_error(&result));
        assert!(envelope::first_text(&result).unwrap().contains("title"));
    }

    #[tokio::test]
    async fn test_update_app_card_needs_a_change() {
        let api = Arc::new(MockApi::new());
        let result = call(
            &api,
            "update-app-card-item",
            json!({ "boardId": "b1", "itemId": "a1" }),
        )
        .await;
        assert!(envelope::is_error(&result));
        assert_eq!(api.request_count(), 0);
    }
}
