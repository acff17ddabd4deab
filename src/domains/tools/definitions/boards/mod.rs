//! Board-level tools: boards, members, tags and groups.

pub mod board;
pub mod groups;
pub mod members;
pub mod tags;

pub use board::{
    CopyBoardTool, CreateBoardTool, DeleteBoardTool, GetSpecificBoardTool, ListBoardsTool,
    ShareBoardTool, UpdateBoardTool,
};
pub use groups::{
    CreateGroupTool, DeleteGroupTool, GetAllGroupsTool, GetGroupItemsTool, GetGroupTool,
    UngroupItemsTool, UpdateGroupTool,
};
pub use members::{
    GetAllBoardMembersTool, GetSpecificBoardMemberTool, RemoveBoardMemberTool,
    UpdateBoardMemberTool,
};
pub use tags::{
    AttachTagTool, CreateTagTool, DeleteTagTool, DetachTagTool, GetAllTagsTool, GetItemTagsTool,
    GetTagTool, UpdateTagTool,
};

use crate::domains::tools::{ToolError, ToolRegistry};

/// Register every board-level tool.
pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    registry
        .register_tool::<ListBoardsTool>()?
        .register_tool::<CreateBoardTool>()?
        .register_tool::<UpdateBoardTool>()?
        .register_tool::<DeleteBoardTool>()?
        .register_tool::<CopyBoardTool>()?
        .register_tool::<GetSpecificBoardTool>()?
        .register_tool::<ShareBoardTool>()?
        .register_tool::<GetAllBoardMembersTool>()?
        .register_tool::<GetSpecificBoardMemberTool>()?
        .register_tool::<RemoveBoardMemberTool>()?
        .register_tool::<UpdateBoardMemberTool>()?
        .register_tool::<CreateTagTool>()?
        .register_tool::<GetTagTool>()?
        .register_tool::<GetAllTagsTool>()?
        .register_tool::<UpdateTagTool>()?
        .register_tool::<DeleteTagTool>()?
        .register_tool::<AttachTagTool>()?
        .register_tool::<DetachTagTool>()?
        .register_tool::<GetItemTagsTool>()?
        .register_tool::<CreateGroupTool>()?
        .register_tool::<GetAllGroupsTool>()?
        .register_tool::<GetGroupTool>()?
        .register_tool::<GetGroupItemsTool>()?
        .register_tool::<UpdateGroupTool>()?
        .register_tool::<UngroupItemsTool>()?
        .register_tool::<DeleteGroupTool>()?;
    Ok(())
}
