//! Bulk creation tools.
//!
//! Each item becomes its own remote call. Calls run concurrently and the
//! result reports every item by input index. A failing item is listed in
//! `errors` and never fails the call as a whole.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{
    Position, board_path, body, check_date, decode_base64, require_ids,
};
use crate::domains::tools::definitions::items::cards::{CardData, CardStyle};
use crate::domains::tools::definitions::items::sticky_notes::{
    DEFAULT_SHAPE, StickyNoteData, StickyNoteStyle, checked_shape,
};
use crate::domains::tools::definitions::items::texts::{TextData, TextStyle};
use crate::domains::tools::{
    BulkReport, ToolContext, ToolError, ToolHandler, ToolParams, ToolResult, envelope,
    gather_indexed,
};

/// One item of a bulk request, discriminated by `type`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BulkItem {
    /// A sticky note.
    StickyNote {
        data: StickyNoteData,
        position: Position,
        style: Option<StickyNoteStyle>,
    },
    /// A card.
    Card {
        data: CardData,
        position: Position,
        style: Option<CardStyle>,
    },
    /// A text item.
    Text {
        data: TextData,
        position: Position,
        style: Option<TextStyle>,
    },
}

impl BulkItem {
    fn validate(&self) -> Result<(), String> {
        match self {
            Self::Card { data, .. } => data
                .due_date
                .as_deref()
                .map_or(Ok(()), |date| check_date("dueDate", date)),
            _ => Ok(()),
        }
    }

    /// The create request for this item.
    fn into_request(self, board_id: &str) -> Result<ApiRequest, ToolError> {
        let (segment, payload) = match self {
            Self::StickyNote {
                data,
                position,
                style,
            } => {
                let shape = data.shape.as_deref().map_or_else(
                    || DEFAULT_SHAPE.to_string(),
                    checked_shape,
                );
                let payload = json!({
                    "data": { "content": data.content, "shape": shape },
                    "position": position,
                    "style": style.map(StickyNoteStyle::checked),
                });
                ("sticky_notes", payload)
            }
            Self::Card {
                data,
                position,
                style,
            } => (
                "cards",
                json!({ "data": data, "position": position, "style": style }),
            ),
            Self::Text {
                data,
                position,
                style,
            } => (
                "texts",
                json!({
                    "data": data,
                    "position": position,
                    "style": style.map(TextStyle::checked),
                }),
            ),
        };
        Ok(ApiRequest::post(board_path(board_id, &[segment])).json(body(&payload)?))
    }
}

/// Create every item concurrently and report per-item outcomes.
async fn create_all<I>(ctx: &ToolContext, board_id: &str, items: I) -> ToolResult
where
    I: IntoIterator<Item = Result<BulkItem, String>>,
{
    let mut report: BulkReport = gather_indexed(items, |index, item| {
        let ctx = ctx.clone();
        let board_id = board_id.to_string();
        async move {
            let item = item.map_err(ToolError::invalid_arguments)?;
            item.validate()
                .map_err(|e| ToolError::invalid_arguments(format!("Item at index {}: {}", index, e)))?;
            let value = ctx.call(item.into_request(&board_id)?).await?;
            Ok::<Value, ToolError>(value)
        }
    })
    .await;

    let secrets = ctx.config().credentials.secrets();
    for failure in report.errors.iter_mut() {
        failure.error = envelope::redact(&failure.error, &secrets);
    }
    Ok(envelope::success_json(&report))
}

// ============================================================================
// create-items-in-bulk
// ============================================================================

/// Parameters for creating several items at once.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemsInBulkParams {
    /// Unique identifier (ID) of the board where the items will be created.
    pub board_id: String,

    /// Array of items to create.
    pub items: Vec<BulkItem>,
}

impl ToolParams for CreateItemsInBulkParams {
    fn validate(&self) -> Result<(), String> {
        if self.items.is_empty() {
            return Err("At least one item is required".to_string());
        }
        for (index, item) in self.items.iter().enumerate() {
            item.validate()
                .map_err(|e| format!("items[{}]: {}", index, e))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CreateItemsInBulkTool;

#[async_trait]
impl ToolHandler for CreateItemsInBulkTool {
    const NAME: &'static str = "create-items-in-bulk";
    const DESCRIPTION: &'static str =
        "Create multiple items on a Miro board in a single operation";
    type Params = CreateItemsInBulkParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Board ID", params.board_id.as_str())]) {
            return Ok(missing);
        }
        create_all(&ctx, &params.board_id, params.items.into_iter().map(Ok)).await
    }
}

// ============================================================================
// create-items-in-bulk-using-file
// ============================================================================

/// Parameters for creating items listed in a JSON file.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemsFromFileParams {
    /// Unique identifier (ID) of the board where the items will be created.
    pub board_id: String,

    /// Base64 encoded JSON file data containing an `items` array.
    pub file_data: String,
}

impl ToolParams for CreateItemsFromFileParams {}

/// Decode the file and split it into raw items.
fn file_items(file_data: &str) -> Result<Vec<Value>, String> {
    let bytes = decode_base64("file data", file_data)?;
    let document: Value = serde_json::from_slice(&bytes)
        .map_err(|e| format!("Error parsing JSON file data: {}", e))?;
    match document.get("items") {
        Some(Value::Array(items)) if !items.is_empty() => Ok(items.clone()),
        _ => Err("JSON file must contain a non-empty 'items' array".to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct CreateItemsFromFileTool;

#[async_trait]
impl ToolHandler for CreateItemsFromFileTool {
    const NAME: &'static str = "create-items-in-bulk-using-file";
    const DESCRIPTION: &'static str = "Create multiple items on a Miro board in a single \
        operation using a JSON file from device";
    type Params = CreateItemsFromFileParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Board ID", params.board_id.as_str()),
            ("File data", params.file_data.as_str()),
        ]) {
            return Ok(missing);
        }
        let items = match file_items(&params.file_data) {
            Ok(items) => items,
            Err(reason) => return Ok(envelope::error(reason)),
        };
        let parsed = items.into_iter().enumerate().map(|(index, raw)| {
            serde_json::from_value::<BulkItem>(raw)
                .map_err(|e| format!("Item at index {} is invalid: {}", index, e))
        });
        create_all(&ctx, &params.board_id, parsed).await
    }
}
