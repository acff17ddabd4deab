//! Embed tools. Embeds keep a fixed aspect ratio, so only one of width
//! or height may be given.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    AnchoredPosition, Geometry, board_path, body, fetch, item_get_delete_tools, require_any,
    require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// Content of a new embed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmbedData {
    /// URL to be embedded on the board.
    pub url: String,
    /// Mode of the embed (normal, inline, etc.).
    pub mode: Option<String>,
}

/// Changes to an embed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmbedDataChanges {
    /// Updated mode of the embed (normal, inline, etc.).
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmbedBody<D> {
    data: Option<D>,
    position: Option<AnchoredPosition>,
    geometry: Option<Geometry>,
}

/// Parameters for creating an embed.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmbedParams {
    /// Unique identifier (ID) of the board where the embed will be created.
    pub board_id: String,
    /// The content and configuration of the embed.
    pub data: EmbedData,
    /// Position of the embed on the board.
    pub position: AnchoredPosition,
    /// Dimensions of the embed. Give either width or height, not both.
    pub geometry: Geometry,
}

impl ToolParams for CreateEmbedParams {
    fn validate(&self) -> Result<(), String> {
        self.geometry.exactly_one_dimension()
    }
}

#[derive(Debug, Clone)]
pub struct CreateEmbedTool;

#[async_trait]
impl ToolHandler for CreateEmbedTool {
    const NAME: &'static str = "create-embed-item";
    const DESCRIPTION: &'static str = "Create a new embed item on a Miro board";
    type Params = CreateEmbedParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Embed URL", params.data.url.as_str()),
        ]) {
            return Ok(missing);
        }
        let embed = EmbedBody {
            data: Some(params.data),
            position: Some(params.position),
            geometry: Some(params.geometry),
        };
        let request =
            ApiRequest::post(board_path(&params.board_id, &["embeds"])).json(body(&embed)?);
        fetch(&ctx, request).await
    }
}

/// Parameters for updating an embed.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmbedParams {
    /// Unique identifier (ID) of the board that contains the embed.
    pub board_id: String,
    /// Unique identifier (ID) of the embed that you want to update.
    pub item_id: String,
    /// The updated configuration of the embed.
    pub data: Option<EmbedDataChanges>,
    /// Updated position of the embed on the board.
    pub position: Option<AnchoredPosition>,
    /// Updated dimensions. When given, exactly one of width or height.
    pub geometry: Option<Geometry>,
}

impl ToolParams for UpdateEmbedParams {
    fn validate(&self) -> Result<(), String> {
        require_any(
            &[self.data.is_some(), self.position.is_some(), self.geometry.is_some()],
            "data, position or geometry",
        )?;
        self.geometry
            .as_ref()
            .map_or(Ok(()), Geometry::exactly_one_dimension)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateEmbedTool;

#[async_trait]
impl ToolHandler for UpdateEmbedTool {
    const NAME: &'static str = "update-embed-item";
    const DESCRIPTION: &'static str = "Update an existing embed item on a Miro board";
    type Params = UpdateEmbedParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let embed = EmbedBody {
            data: params.data,
            position: params.position,
            geometry: params.geometry,
        };
        let request = ApiRequest::patch(board_path(
            &params.board_id,
            &["embeds", params.item_id.as_str()],
        ))
        .json(body(&embed)?);
        fetch(&ctx, request).await
    }
}

item_get_delete_tools! {
    GetEmbedTool => "get-embed-item",
        "Retrieve information about a specific embed item on a Miro board";
    DeleteEmbedTool => "delete-embed-item",
        "Delete an embed item from a Miro board";
    segment: "embeds", label: "Embed"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};

    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::definitions::common::test_support::call;
    use crate::domains::tools::envelope;

    fn create_with(geometry: Value) -> Value {
        json!({
            "boardId": "b1",
            "data": { "url": "https://youtu.be/x" },
            "position": { "x": 0, "y": 0 },
            "geometry": geometry
        })
    }

    #[tokio::test]
    async fn test_create_embed_geometry_refinement() {
        let api = Arc::new(MockApi::new());

        let both = call(&api, "create-embed-item", create_with(json!({ "width": 5, "height": 5 }))).await;
        let neither = call(&api, "create-embed-item", create_with(json!({}))).await;
        assert!(envelope::is_error(&both));
        assert!(envelope::is_error(&neither));
        assert_eq!(api.request_count(), 0);

        let width = call(&api, "create-embed-item", create_with(json!({ "width": 5 }))).await;
        let height = call(&api, "create-embed-item", create_with(json!({ "height": 5 }))).await;
        assert!(!envelope::is_error(&width));
        assert!(!envelope::is_error(&height));
        assert_eq!(api.request_count(), 2);
    }

    #[tokio::test]
    async fn test_update_embed_geometry_optional() {
        let api = Arc::new(MockApi::new());
        let mode_only = call(
            &api,
            "update-embed-item",
            json!({ "boardId": "b1", "itemId": "e1", "data": { "mode": "inline" } }),
        )
        .await;
        assert!(!envelope::is_error(&mode_only));

        let both = call(
            &api,
            "update-embed-item",
            json!({ "boardId": "b1", "itemId": "e1", "geometry": { "width": 1, "height": 1 } }),
        )
        .await;
        assert!(envelope::is_error(&both));
        assert_eq!(api.request_count(), 1);
    }
}
