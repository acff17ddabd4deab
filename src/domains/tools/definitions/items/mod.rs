//! Board item tools: generic items plus one module per item type.

pub mod app_cards;
pub mod bulk;
pub mod cards;
pub mod connectors;
pub mod documents;
pub mod embeds;
pub mod frames;
pub mod images;
pub mod item;
pub mod mindmaps;
pub mod shapes;
pub mod sticky_notes;
pub mod texts;

pub use app_cards::{CreateAppCardTool, DeleteAppCardTool, GetAppCardTool, UpdateAppCardTool};
pub use bulk::{CreateItemsFromFileTool, CreateItemsInBulkTool};
pub use cards::{CreateCardTool, DeleteCardTool, GetCardTool, UpdateCardTool};
pub use connectors::{
    CreateConnectorTool, DeleteConnectorTool, GetConnectorsTool, GetSpecificConnectorTool,
    UpdateConnectorTool,
};
pub use documents::{CreateDocumentTool, DeleteDocumentTool, GetDocumentTool, UpdateDocumentTool};
pub use embeds::{CreateEmbedTool, DeleteEmbedTool, GetEmbedTool, UpdateEmbedTool};
pub use frames::{CreateFrameTool, DeleteFrameTool, GetFrameTool, UpdateFrameTool};
pub use images::{
    CreateImageFromFileTool, CreateImageFromUrlTool, DeleteImageTool, GetImageTool,
    UpdateImageFromFileTool, UpdateImageTool,
};
pub use item::{DeleteItemTool, GetItemsOnBoardTool, GetSpecificItemTool, UpdateItemPositionTool};
pub use mindmaps::{
    CreateMindmapNodeTool, DeleteMindmapNodeTool, GetMindmapNodeTool, GetMindmapNodesTool,
};
pub use shapes::{CreateShapeTool, DeleteShapeTool, GetShapeTool, UpdateShapeTool};
pub use sticky_notes::{
    CreateStickyNoteTool, DeleteStickyNoteTool, GetStickyNoteTool, UpdateStickyNoteTool,
};
pub use texts::{CreateTextTool, DeleteTextTool, GetTextTool, UpdateTextTool};

use crate::domains::tools::{ToolError, ToolRegistry};

/// Register every item tool.
pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    registry
        .register_tool::<GetItemsOnBoardTool>()?
        .register_tool::<GetSpecificItemTool>()?
        .register_tool::<UpdateItemPositionTool>()?
        .register_tool::<DeleteItemTool>()?
        .register_tool::<CreateAppCardTool>()?
        .register_tool::<GetAppCardTool>()?
        .register_tool::<UpdateAppCardTool>()?
        .register_tool::<DeleteAppCardTool>()?
        .register_tool::<CreateCardTool>()?
        .register_tool::<GetCardTool>()?
        .register_tool::<UpdateCardTool>()?
        .register_tool::<DeleteCardTool>()?
        .register_tool::<CreateConnectorTool>()?
        .register_tool::<GetConnectorsTool>()?
        .register_tool::<GetSpecificConnectorTool>()?
        .register_tool::<UpdateConnectorTool>()?
        .register_tool::<DeleteConnectorTool>()?
        .register_tool::<CreateStickyNoteTool>()?
        .register_tool::<GetStickyNoteTool>()?
        .register_tool::<UpdateStickyNoteTool>()?
        .register_tool::<DeleteStickyNoteTool>()?
        .register_tool::<CreateFrameTool>()?
        .register_tool::<GetFrameTool>()?
        .register_tool::<UpdateFrameTool>()?
        .register_tool::<DeleteFrameTool>()?
        .register_tool::<CreateDocumentTool>()?
        .register_tool::<GetDocumentTool>()?
        .register_tool::<UpdateDocumentTool>()?
        .register_tool::<DeleteDocumentTool>()?
        .register_tool::<CreateTextTool>()?
        .register_tool::<GetTextTool>()?
        .register_tool::<UpdateTextTool>()?
        .register_tool::<DeleteTextTool>()?
        .register_tool::<CreateImageFromUrlTool>()?
        .register_tool::<CreateImageFromFileTool>()?
        .register_tool::<GetImageTool>()?
        .register_tool::<UpdateImageTool>()?
        .register_tool::<UpdateImageFromFileTool>()?
        .register_tool::<DeleteImageTool>()?
        .register_tool::<CreateShapeTool>()?
        .register_tool::<GetShapeTool>()?
        .register_tool::<UpdateShapeTool>()?
        .register_tool::<DeleteShapeTool>()?
        .register_tool::<CreateEmbedTool>()?
        .register_tool::<GetEmbedTool>()?
        .register_tool::<UpdateEmbedTool>()?
        .register_tool::<DeleteEmbedTool>()?
        .register_tool::<CreateMindmapNodeTool>()?
        .register_tool::<GetMindmapNodeTool>()?
        .register_tool::<GetMindmapNodesTool>()?
        .register_tool::<DeleteMindmapNodeTool>()?
        .register_tool::<CreateItemsInBulkTool>()?
        .register_tool::<CreateItemsFromFileTool>()?;
    Ok(())
}
