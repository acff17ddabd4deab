//! Audit and board content logs.

use std::fmt;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{check_date, fetch, org_path, require_ids};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// Sort order of audit log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditSorting {
    Asc,
    Desc,
}

impl fmt::Display for AuditSorting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        })
    }
}

/// Parameters for reading audit logs.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogsParams {
    /// Retrieve audit logs created after this date (ISO 8601 format).
    pub created_after: String,
    /// Retrieve audit logs created before this date (ISO 8601 format).
    pub created_before: String,
    /// Cursor for pagination.
    pub cursor: Option<String>,
    /// Maximum number of results to return (default: 100).
    pub limit: Option<u32>,
    /// Sort order for results (default: ASC).
    pub sorting: Option<AuditSorting>,
}

impl ToolParams for AuditLogsParams {
    fn validate(&self) -> Result<(), String> {
        check_date("createdAfter", &self.created_after)?;
        check_date("createdBefore", &self.created_before)
    }
}

#[derive(Debug, Clone)]
pub struct GetAuditLogsTool;

#[async_trait]
impl ToolHandler for GetAuditLogsTool {
    const NAME: &'static str = "get-audit-logs";
    const DESCRIPTION: &'static str = "Retrieves a page of audit events from the last 90 days.";
    type Params = AuditLogsParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        let request = ApiRequest::get(["v2", "audit", "logs"])
            .query("createdAfter", &params.created_after)
            .query("createdBefore", &params.created_before)
            .query_opt("cursor", params.cursor)
            .query_opt("limit", params.limit)
            .query_opt("sorting", params.sorting);
        fetch(&ctx, request).await
    }
}

/// Sort order of content log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentLogSorting {
    Asc,
    Desc,
}

impl fmt::Display for ContentLogSorting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Parameters for reading board content logs.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardContentLogsParams {
    /// Unique identifier of the organization.
    pub org_id: String,
    /// Start date for filtering (ISO 8601 format).
    pub from: String,
    /// End date for filtering (ISO 8601 format).
    pub to: String,
    /// List of board IDs to filter by.
    #[serde(default)]
    pub board_ids: Vec<String>,
    /// List of user emails to filter by.
    #[serde(default)]
    pub emails: Vec<String>,
    /// Cursor for pagination.
    pub cursor: Option<String>,
    /// Maximum number of results to return.
    pub limit: Option<u32>,
    /// Sort order for results.
    pub sorting: Option<ContentLogSorting>,
}

impl ToolParams for BoardContentLogsParams {
    fn validate(&self) -> Result<(), String> {
        check_date("from", &self.from)?;
        check_date("to", &self.to)
    }
}

/// Comma-joined list, or `None` when empty.
fn joined(values: &[String]) -> Option<String> {
    (!values.is_empty()).then(|| values.join(","))
}

#[derive(Debug, Clone)]
pub struct GetBoardContentLogsTool;

#[async_trait]
impl ToolHandler for GetBoardContentLogsTool {
    const NAME: &'static str = "get-board-content-logs";
    const DESCRIPTION: &'static str =
        "Retrieves content change logs of board items within an organization";
    type Params = BoardContentLogsParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Organization ID", params.org_id.as_str())]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(org_path(&params.org_id, &["content-logs", "items"]))
            .query("from", &params.from)
            .query("to", &params.to)
            .query_opt("board_ids", joined(&params.board_ids))
            .query_opt("emails", joined(&params.emails))
            .query_opt("cursor", params.cursor)
            .query_opt("limit", params.limit)
            .query_opt("sorting", params.sorting);
        fetch(&ctx, request).await
    }
}
