//! Enterprise tools. These need an Enterprise plan and an admin token.

pub mod classification;
pub mod exports;
pub mod legal;
pub mod logs;
pub mod organization;

pub use classification::{GetBoardClassificationTool, UpdateBoardClassificationTool};
pub use exports::{
    CreateBoardExportJobTool, GetBoardExportJobResultsTool, GetBoardExportJobStatusTool,
};
pub use legal::{
    GetAllCasesTool, GetAllLegalHoldsTool, GetCaseTool, GetLegalHoldContentItemsTool,
    GetLegalHoldTool,
};
pub use logs::{GetAuditLogsTool, GetBoardContentLogsTool};
pub use organization::{
    AddProjectMemberTool, GetOrganizationInfoTool, GetOrganizationMemberTool,
    GetOrganizationMembersTool, GetProjectMemberTool, RemoveProjectMemberTool,
};

use crate::domains::tools::{ToolError, ToolRegistry};

/// Register every enterprise tool.
pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    registry
        .register_tool::<GetBoardClassificationTool>()?
        .register_tool::<UpdateBoardClassificationTool>()?
        .register_tool::<CreateBoardExportJobTool>()?
        .register_tool::<GetBoardExportJobStatusTool>()?
        .register_tool::<GetBoardExportJobResultsTool>()?
        .register_tool::<GetAuditLogsTool>()?
        .register_tool::<GetOrganizationInfoTool>()?
        .register_tool::<GetOrganizationMembersTool>()?
        .register_tool::<GetOrganizationMemberTool>()?
        .register_tool::<AddProjectMemberTool>()?
        .register_tool::<GetProjectMemberTool>()?
        .register_tool::<RemoveProjectMemberTool>()?
        .register_tool::<GetAllCasesTool>()?
        .register_tool::<GetCaseTool>()?
        .register_tool::<GetAllLegalHoldsTool>()?
        .register_tool::<GetLegalHoldTool>()?
        .register_tool::<GetLegalHoldContentItemsTool>()?
        .register_tool::<GetBoardContentLogsTool>()?;
    Ok(())
}
