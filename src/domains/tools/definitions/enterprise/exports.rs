//! Board export jobs.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{body, fetch, org_path, require_ids};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Csv,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportBody<'a> {
    board_ids: &'a [String],
    format: Option<ExportFormat>,
}

/// Parameters for starting a board export.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardExportJobParams {
    /// Unique identifier of the organization.
    pub org_id: String,
    /// Unique identifier of the board export job.
    pub request_id: String,
    /// Array of board IDs to export.
    pub board_ids: Vec<String>,
    /// Export format (default: pdf).
    pub format: Option<ExportFormat>,
}

impl ToolParams for CreateBoardExportJobParams {
    fn validate(&self) -> Result<(), String> {
        if self.board_ids.is_empty() {
            return Err("boardIds must contain at least one board ID".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CreateBoardExportJobTool;

#[async_trait]
impl ToolHandler for CreateBoardExportJobTool {
    const NAME: &'static str = "create-board-export-job";
    const DESCRIPTION: &'static str = "Creates an export job for one or more boards.";
    type Params = CreateBoardExportJobParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Organization ID", params.org_id.as_str()),
            ("Request ID", params.request_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let export = ExportBody {
            board_ids: &params.board_ids,
            format: params.format,
        };
        let request = ApiRequest::post(org_path(&params.org_id, &["boards", "export", "jobs"]))
            .query("request_id", &params.request_id)
            .json(body(&export)?);
        fetch(&ctx, request).await
    }
}

/// Parameters addressing one export job.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportJobParams {
    /// Unique identifier of the organization.
    pub org_id: String,
    /// Unique identifier of the board export job.
    pub job_id: String,
}

impl ToolParams for ExportJobParams {}

impl ExportJobParams {
    fn check(&self) -> Result<(), rmcp::model::CallToolResult> {
        require_ids(&[
            ("Organization ID", self.org_id.as_str()),
            ("Job ID", self.job_id.as_str()),
        ])
    }

    fn path(&self, rest: &[&str]) -> Vec<String> {
        let mut segments = vec!["boards", "export", "jobs", self.job_id.as_str()];
        segments.extend_from_slice(rest);
        org_path(&self.org_id, &segments)
    }
}

#[derive(Debug, Clone)]
pub struct GetBoardExportJobStatusTool;

#[async_trait]
impl ToolHandler for GetBoardExportJobStatusTool {
    const NAME: &'static str = "get-board-export-job-status";
    const DESCRIPTION: &'static str = "Retrieves the status of a board export job.";
    type Params = ExportJobParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = params.check() {
            return Ok(missing);
        }
        fetch(&ctx, ApiRequest::get(params.path(&[]))).await
    }
}

#[derive(Debug, Clone)]
pub struct GetBoardExportJobResultsTool;

#[async_trait]
impl ToolHandler for GetBoardExportJobResultsTool {
    const NAME: &'static str = "get-board-export-job-results";
    const DESCRIPTION: &'static str = "Retrieves the result of a board export job.";
    type Params = ExportJobParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = params.check() {
            return Ok(missing);
        }
        fetch(&ctx, ApiRequest::get(params.path(&["results"]))).await
    }
}
