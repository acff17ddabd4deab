//! Connector tools. Connectors are lines joining two items.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    ItemRef, PageLimit, board_path, body, confirm, fetch, null_as_default, require_any,
    require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// Line style of a connector.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorStyle {
    /// Color of the connector stroke.
    pub stroke_color: Option<String>,
    /// Width of the connector stroke.
    pub stroke_width: Option<f64>,
    /// Style of the connector stroke (normal, dashed, etc.).
    pub stroke_style: Option<String>,
    /// Start stroke cap style.
    pub start_stroke_cap: Option<String>,
    /// End stroke cap style.
    pub end_stroke_cap: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectorBody {
    start_item: Option<ItemRef>,
    end_item: Option<ItemRef>,
    style: Option<ConnectorStyle>,
}

/// Parameters for connecting two items.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConnectorParams {
    /// Unique identifier (ID) of the board where the connector will be created.
    pub board_id: String,
    /// Start item of the connector.
    pub start_item: ItemRef,
    /// End item of the connector.
    pub end_item: ItemRef,
    /// Style configuration of the connector.
    pub style: Option<ConnectorStyle>,
}

impl ToolParams for CreateConnectorParams {}

#[derive(Debug, Clone)]
pub struct CreateConnectorTool;

#[async_trait]
impl ToolHandler for CreateConnectorTool {
    const NAME: &'static str = "create-connector";
    const DESCRIPTION: &'static str = "Create a connector between two items on a Miro board";
    type Params = CreateConnectorParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Start item ID", params.start_item.id.as_str()),
            ("End item ID", params.end_item.id.as_str()),
        ]) {
            return Ok(missing);
        }
        let connector = ConnectorBody {
            start_item: Some(params.start_item),
            end_item: Some(params.end_item),
            style: params.style,
        };
        let request = ApiRequest::post(board_path(&params.board_id, &["connectors"]))
            .json(body(&connector)?);
        fetch(&ctx, request).await
    }
}

/// Parameters for listing connectors.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListConnectorsParams {
    /// Unique identifier (ID) of the board whose connectors you want to retrieve.
    pub board_id: String,
    /// Maximum number of connectors to return (default: 50).
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: PageLimit,
    /// Cursor for pagination.
    pub cursor: Option<String>,
}

impl ToolParams for ListConnectorsParams {}

#[derive(Debug, Clone)]
pub struct GetConnectorsTool;

#[async_trait]
impl ToolHandler for GetConnectorsTool {
    const NAME: &'static str = "get-connectors";
    const DESCRIPTION: &'static str = "Retrieve all connectors on a Miro board";
    type Params = ListConnectorsParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(board_path(&params.board_id, &["connectors"]))
            .query("limit", params.limit)
            .query_opt("cursor", params.cursor);
        fetch(&ctx, request).await
    }
}

/// Parameters addressing one connector.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorParams {
    /// Unique identifier (ID) of the board that contains the connector.
    pub board_id: String,
    /// Unique identifier (ID) of the connector.
    pub connector_id: String,
}

impl ToolParams for ConnectorParams {}

impl ConnectorParams {
    fn check(&self) -> Result<(), rmcp::model::CallToolResult> {
        require_ids(&[
            ("Board ID", self.board_id.as_str()),
            ("Connector ID", self.connector_id.as_str()),
        ])
    }

    fn path(&self) -> Vec<String> {
        board_path(&self.board_id, &["connectors", self.connector_id.as_str()])
    }
}

#[derive(Debug, Clone)]
pub struct GetSpecificConnectorTool;

#[async_trait]
impl ToolHandler for GetSpecificConnectorTool {
    const NAME: &'static str = "get-specific-connector";
    const DESCRIPTION: &'static str = "Retrieve information about a specific connector on a Miro board";
    type Params = ConnectorParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = params.check() {
            return Ok(missing);
        }
        fetch(&ctx, ApiRequest::get(params.path())).await
    }
}

#[derive(Debug, Clone)]
pub struct DeleteConnectorTool;

#[async_trait]
impl ToolHandler for DeleteConnectorTool {
    const NAME: &'static str = "delete-connector";
    const DESCRIPTION: &'static str = "Delete a connector from a Miro board";
    type Params = ConnectorParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = params.check() {
            return Ok(missing);
        }
        let message = format!(
            "Connector {} successfully deleted from board {}",
            params.connector_id, params.board_id
        );
        confirm(&ctx, ApiRequest::delete(params.path()), message).await
    }
}

/// Parameters for updating a connector.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConnectorParams {
    /// Unique identifier (ID) of the board that contains the connector.
    pub board_id: String,
    /// Unique identifier (ID) of the connector that you want to update.
    pub connector_id: String,
    /// New start item of the connector.
    pub start_item: Option<ItemRef>,
    /// New end item of the connector.
    pub end_item: Option<ItemRef>,
    /// Updated style configuration of the connector.
    pub style: Option<ConnectorStyle>,
}

impl ToolParams for UpdateConnectorParams {
    fn validate(&self) -> Result<(), String> {
        require_any(
            &[self.start_item.is_some(), self.end_item.is_some(), self.style.is_some()],
            "startItem, endItem or style",
        )
    }
}

#[derive(Debug, Clone)]
pub struct UpdateConnectorTool;

#[async_trait]
impl ToolHandler for UpdateConnectorTool {
    const NAME: &'static str = "update-connector";
    const DESCRIPTION: &'static str = "Update an existing connector on a Miro board";
    type Params = UpdateConnectorParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Connector ID", params.connector_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let connector = ConnectorBody {
            start_item: params.start_item,
            end_item: params.end_item,
            style: params.style,
        };
        let request = ApiRequest::patch(board_path(
            &params.board_id,
            &["connectors", params.connector_id.as_str()],
        ))
        .json(body(&connector)?);
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
    async fn test_create_connector_body() {
        let api = Arc::new(MockApi::new());
        call(
            &api,
            "create-connector",
            json!({
                "boardId": "b1",
                "startItem": { "id": "i1" },
                "endItem": { "id": "i2" },
                "style": { "strokeStyle": "dashed", "strokeWidth": null }
            }),
        )
        .await;

        let request = api.last_request();
        assert_eq!(request.path(), "/v2/boards/b1/connectors");
        assert_eq!(
            request.body.unwrap(),
            json!({
                "startItem": { "id": "i1" },
                "endItem": { "id": "i2" },
                "style": { "strokeStyle": "dashed" }
            })
        );
    }

    #[tokio::test]
    async fn test_create_connector_requires_end_item() {
        let api = Arc::new(MockApi::new());
        let result = call(
            &api,
            "create-connector",
            json!({ "boardId": "b1", "startItem": { "id": "i1" } }),
        )
        .await;

        assert!(envelope::is_error(&result));
        assert!(envelope::first_text(&result).unwrap().contains("endItem"));
    }

    #[tokio::test]
    async fn test_get_connectors_cursor() {
        let api = Arc::new(MockApi::new());
        call(&api, "get-connectors", json!({ "boardId": "b1", "limit": 10, "cursor": "abc" })).await;

        let request = api.last_request();
        assert_eq!(request.query_value("limit"), Some("10"));
        assert_eq!(request.query_value("cursor"), Some("abc"));
    }

    #[tokio::test]
    async fn test_delete_connector() {
        let api = Arc::new(MockApi::returning(serde_json::Value::Null));
        call(&api, "delete-connector", json!({ "boardId": "b1", "connectorId": "c1" })).await;

        let request = api.last_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path(), "/v2/boards/b1/connectors/c1");
    }
}
