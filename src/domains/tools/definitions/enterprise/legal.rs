//! eDiscovery cases and legal holds.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{fetch, org_path, require_ids};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

fn case_path(org_id: &str, case_id: &str, rest: &[&str]) -> Vec<String> {
    let mut segments = vec!["cases", case_id];
    segments.extend_from_slice(rest);
    org_path(org_id, &segments)
}

fn positive_limit(limit: u32) -> Result<(), String> {
    if limit == 0 {
        return Err("limit must be greater than 0".to_string());
    }
    Ok(())
}

/// Parameters for listing cases.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCasesParams {
    /// The ID of the organization for which you want to retrieve the list of cases.
    pub org_id: String,
    /// The maximum number of items in the result list.
    pub limit: u32,
    /// Cursor for pagination.
    pub cursor: Option<String>,
}

impl ToolParams for ListCasesParams {
    fn validate(&self) -> Result<(), String> {
        positive_limit(self.limit)
    }
}

#[derive(Debug, Clone)]
pub struct GetAllCasesTool;

#[async_trait]
impl ToolHandler for GetAllCasesTool {
    const NAME: &'static str = "get-all-cases";
    const DESCRIPTION: &'static str = "Retrieves the list of eDiscovery cases in an organization.";
    type Params = ListCasesParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Organization ID", params.org_id.as_str())]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(org_path(&params.org_id, &["cases"]))
            .query("limit", params.limit)
            .query_opt("cursor", params.cursor);
        fetch(&ctx, request).await
    }
}

/// Parameters addressing one case.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseParams {
    /// The ID of the organization.
    pub org_id: String,
    /// The ID of the case.
    pub case_id: String,
}

impl ToolParams for CaseParams {}

#[derive(Debug, Clone)]
pub struct GetCaseTool;

#[async_trait]
impl ToolHandler for GetCaseTool {
    const NAME: &'static str = "get-case";
    const DESCRIPTION: &'static str = "Retrieves information about a case in an organization.";
    type Params = CaseParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Organization ID", params.org_id.as_str()),
            ("Case ID", params.case_id.as_str()),
        ]) {
            return Ok(missing);
        }
        fetch(&ctx, ApiRequest::get(case_path(&params.org_id, &params.case_id, &[]))).await
    }
}

/// Parameters for listing the legal holds of a case.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListLegalHoldsParams {
    /// The ID of the organization.
    pub org_id: String,
    /// The ID of the case for which you want to retrieve the list of legal holds.
    pub case_id: String,
    /// The maximum number of items in the result list.
    pub limit: u32,
    /// Cursor for pagination.
    pub cursor: Option<String>,
}

impl ToolParams for ListLegalHoldsParams {
    fn validate(&self) -> Result<(), String> {
        positive_limit(self.limit)
    }
}

#[derive(Debug, Clone)]
pub struct GetAllLegalHoldsTool;

#[async_trait]
impl ToolHandler for GetAllLegalHoldsTool {
    const NAME: &'static str = "get-all-legal-holds";
    const DESCRIPTION: &'static str =
        "Retrieves the list of all legal holds within a case for an organization.";
    type Params = ListLegalHoldsParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Organization ID", params.org_id.as_str()),
            ("Case ID", params.case_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(case_path(&params.org_id, &params.case_id, &["legal-holds"]))
            .query("limit", params.limit)
            .query_opt("cursor", params.cursor);
        fetch(&ctx, request).await
    }
}

/// Parameters addressing one legal hold.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegalHoldParams {
    /// The ID of the organization.
    pub org_id: String,
    /// The ID of the case.
    pub case_id: String,
    /// The ID of the legal hold.
    pub legal_hold_id: String,
}

impl ToolParams for LegalHoldParams {}

#[derive(Debug, Clone)]
pub struct GetLegalHoldTool;

#[async_trait]
impl ToolHandler for GetLegalHoldTool {
    const NAME: &'static str = "get-legal-hold";
    const DESCRIPTION: &'static str =
        "Retrieves information about a legal hold within a case for an organization.";
    type Params = LegalHoldParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Organization ID", params.org_id.as_str()),
            ("Case ID", params.case_id.as_str()),
            ("Legal hold ID", params.legal_hold_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(case_path(
            &params.org_id,
            &params.case_id,
            &["legal-holds", params.legal_hold_id.as_str()],
        ));
        fetch(&ctx, request).await
    }
}

/// Parameters for listing content items under a legal hold.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegalHoldContentParams {
    /// The ID of the organization.
    pub org_id: String,
    /// The ID of the case.
    pub case_id: String,
    /// The ID of the legal hold.
    pub legal_hold_id: String,
    /// The maximum number of items in the result list.
    pub limit: u32,
    /// Cursor for pagination.
    pub cursor: Option<String>,
}

impl ToolParams for LegalHoldContentParams {
    fn validate(&self) -> Result<(), String> {
        positive_limit(self.limit)
    }
}

#[derive(Debug, Clone)]
pub struct GetLegalHoldContentItemsTool;

#[async_trait]
impl ToolHandler for GetLegalHoldContentItemsTool {
    const NAME: &'static str = "get-legal-hold-content-items";
    const DESCRIPTION: &'static str =
        "Retrieves the list of content items under legal hold in a case for an organization.";
    type Params = LegalHoldContentParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Organization ID", params.org_id.as_str()),
            ("Case ID", params.case_id.as_str()),
            ("Legal hold ID", params.legal_hold_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(case_path(
            &params.org_id,
            &params.case_id,
            &["legal-holds", params.legal_hold_id.as_str(), "content-items"],
        ))
        .query("limit", params.limit)
        .query_opt("cursor", params.cursor);
        fetch(&ctx, request).await
    }
}
