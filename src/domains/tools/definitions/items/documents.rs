//! Document tools. Documents are files linked from a URL.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    Geometry, PartialPosition, Position, board_path, body, fetch, item_get_delete_tools,
    require_any, require_ids,
};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// Source of a new document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentData {
    /// URL of the document to be added to the board.
    pub url: String,
    /// Title of the document.
    pub title: Option<String>,
}

/// Changes to a document's source.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentDataChanges {
    /// Updated URL of the document.
    pub url: Option<String>,
    /// Updated title of the document.
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
struct DocumentBody<D, P> {
    data: Option<D>,
    position: Option<P>,
    geometry: Option<Geometry>,
}

/// Parameters for creating a document item.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentParams {
    /// Unique identifier (ID) of the board where the document will be created.
    pub board_id: String,
    /// The content and configuration of the document.
    pub data: DocumentData,
    /// Position of the document on the board.
    pub position: Position,
    /// Dimensions of the document.
    pub geometry: Option<Geometry>,
}

impl ToolParams for CreateDocumentParams {}

#[derive(Debug, Clone)]
pub struct CreateDocumentTool;

#[async_trait]
impl ToolHandler for CreateDocumentTool {
    const NAME: &'static str = "create-document-item";
    const DESCRIPTION: &'static str = "Create a new document item on a Miro board";
    type Params = CreateDocumentParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Document URL", params.data.url.as_str()),
        ]) {
            return Ok(missing);
        }
        let document = DocumentBody {
            data: Some(params.data),
            position: Some(params.position),
            geometry: params.geometry,
        };
        let request =
            ApiRequest::post(board_path(&params.board_id, &["documents"])).json(body(&document)?);
        fetch(&ctx, request).await
    }
}

/// Parameters for updating a document item.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentParams {
    /// Unique identifier (ID) of the board that contains the document.
    pub board_id: String,
    /// Unique identifier (ID) of the document that you want to update.
    pub item_id: String,
    /// The updated content and configuration of the document.
    pub data: Option<DocumentDataChanges>,
    /// Updated position of the document on the board.
    pub position: Option<PartialPosition>,
    /// Updated dimensions of the document.
    pub geometry: Option<Geometry>,
}

impl ToolParams for UpdateDocumentParams {
    fn validate(&self) -> Result<(), String> {
        require_any(
            &[self.data.is_some(), self.position.is_some(), self.geometry.is_some()],
            "data, position or geometry",
        )
    }
}

#[derive(Debug, Clone)]
pub struct UpdateDocumentTool;

#[async_trait]
impl ToolHandler for UpdateDocumentTool {
    const NAME: &'static str = "update-document-item";
    const DESCRIPTION: &'static str = "Update an existing document item on a Miro board";
    type Params = UpdateDocumentParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("Item ID", params.item_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let document = DocumentBody {
            data: params.data,
            position: params.position,
            geometry: params.geometry,
        };
        let request = ApiRequest::patch(board_path(
            &params.board_id,
            &["documents", params.item_id.as_str()],
        ))
        .json(body(&document)?);
        fetch(&ctx, request).await
    }
}

item_get_delete_tools! {
    GetDocumentTool => "get-document-item",
        "Retrieve information about a specific document item on a Miro board";
    DeleteDocumentTool => "delete-document-item",
        "Delete a document item from a Miro board";
    segment: "documents", label: "Document"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::definitions::common::test_support::call;
    use crate::domains::tools::envelope;

    #[tokio::test]
    async fn test_create_document_requires_url() {
        let api = Arc::new(MockApi::new());
        let result = call(
            &api,
            "create-document-item",
            json!({ "boardId": "b1", "data": { "url": "" }, "position": { "x": 0, "y": 0 } }),
        )
        .await;

        assert_eq!(envelope::first_text(&result), Some("Document URL is required"));
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_document_partial_position() {
        let api = Arc::new(MockApi::new());
        call(
            &api,
            "update-document-item",
            json!({ "boardId": "b1", "itemId": "d1", "position": { "y": 7 } }),
        )
        .await;

        let request = api.last_request();
        assert_eq!(request.path(), "/v2/boards/b1/documents/d1");
        assert_eq!(request.body.unwrap(), json!({ "position": { "y": 7.0 } }));
    }
}
