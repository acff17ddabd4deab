//! Organization and project membership tools.

use std::fmt;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domains::miro::ApiRequest;
use crate::domains::tools::definitions::common::{confirm, fetch, org_path, require_ids};
use crate::domains::tools::{ToolContext, ToolHandler, ToolParams, ToolResult};

/// Parameters addressing an organization.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationParams {
    /// ID of the organization.
    pub org_id: String,
}

impl ToolParams for OrganizationParams {}

#[derive(Debug, Clone)]
pub struct GetOrganizationInfoTool;

#[async_trait]
impl ToolHandler for GetOrganizationInfoTool {
    const NAME: &'static str = "get-organization-info";
    const DESCRIPTION: &'static str = "Retrieves organization information.";
    type Params = OrganizationParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Organization ID", params.org_id.as_str())]) {
            return Ok(missing);
        }
        fetch(&ctx, ApiRequest::get(org_path(&params.org_id, &[]))).await
    }
}

/// Organization role filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationRole {
    OrganizationInternalAdmin,
    OrganizationInternalUser,
    OrganizationExternalUser,
    OrganizationTeamGuestUser,
    Unknown,
}

impl fmt::Display for OrganizationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OrganizationInternalAdmin => "organization_internal_admin",
            Self::OrganizationInternalUser => "organization_internal_user",
            Self::OrganizationExternalUser => "organization_external_user",
            Self::OrganizationTeamGuestUser => "organization_team_guest_user",
            Self::Unknown => "unknown",
        })
    }
}

/// License filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum License {
    Full,
    Occasional,
    Free,
    FreeRestricted,
    FullTrial,
    Unknown,
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Full => "full",
            Self::Occasional => "occasional",
            Self::Free => "free",
            Self::FreeRestricted => "free_restricted",
            Self::FullTrial => "full_trial",
            Self::Unknown => "unknown",
        })
    }
}

/// Parameters for listing organization members.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListOrganizationMembersParams {
    /// ID of the organization.
    pub org_id: String,
    /// Filter by comma-separated email addresses.
    pub emails: Option<String>,
    /// Filter by user role.
    pub role: Option<OrganizationRole>,
    /// Filter by license type.
    pub license: Option<License>,
    /// Filter by active status.
    pub active: Option<bool>,
    /// Cursor for pagination.
    pub cursor: Option<String>,
    /// Maximum number of results to return.
    pub limit: Option<u32>,
}

impl ToolParams for ListOrganizationMembersParams {}

#[derive(Debug, Clone)]
pub struct GetOrganizationMembersTool;

#[async_trait]
impl ToolHandler for GetOrganizationMembersTool {
    const NAME: &'static str = "get-organization-members";
    const DESCRIPTION: &'static str = "Retrieves organization members based on the filters provided.";
    type Params = ListOrganizationMembersParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[("Organization ID", params.org_id.as_str())]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(org_path(&params.org_id, &["members"]))
            .query_opt("emails", params.emails.filter(|e| !e.is_empty()))
            .query_opt("role", params.role)
            .query_opt("license", params.license)
            .query_opt("active", params.active)
            .query_opt("cursor", params.cursor)
            .query_opt("limit", params.limit);
        fetch(&ctx, request).await
    }
}

/// Parameters addressing one organization member.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMemberParams {
    /// ID of the organization.
    pub org_id: String,
    /// ID of the organization member.
    pub member_id: String,
}

impl ToolParams for OrganizationMemberParams {}

#[derive(Debug, Clone)]
pub struct GetOrganizationMemberTool;

#[async_trait]
impl ToolHandler for GetOrganizationMemberTool {
    const NAME: &'static str = "get-organization-member";
    const DESCRIPTION: &'static str = "Retrieves organization member information.";
    type Params = OrganizationMemberParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Organization ID", params.org_id.as_str()),
            ("Member ID", params.member_id.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::get(org_path(
            &params.org_id,
            &["members", params.member_id.as_str()],
        ));
        fetch(&ctx, request).await
    }
}

// ============================================================================
// Project members
// ============================================================================

/// Role of a user in a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    Owner,
    Editor,
    Commenter,
    Viewer,
}

fn project_members_path(org_id: &str, team_id: &str, project_id: &str, rest: &[&str]) -> Vec<String> {
    let mut segments = vec!["teams", team_id, "projects", project_id, "members"];
    segments.extend_from_slice(rest);
    org_path(org_id, &segments)
}

/// Parameters for adding a user to a project.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddProjectMemberParams {
    /// The ID of the organization to which the project belongs.
    pub org_id: String,
    /// The ID of the team to which the project belongs.
    pub team_id: String,
    /// The ID of the project to which you want to add a user.
    pub project_id: String,
    /// Email ID of the user to add to the project.
    pub email: String,
    /// Role to assign to the user.
    pub role: ProjectRole,
}

impl ToolParams for AddProjectMemberParams {}

#[derive(Debug, Clone)]
pub struct AddProjectMemberTool;

#[async_trait]
impl ToolHandler for AddProjectMemberTool {
    const NAME: &'static str = "add-project-member";
    const DESCRIPTION: &'static str = "Add a user to a project in an organization team";
    type Params = AddProjectMemberParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = require_ids(&[
            ("Organization ID", params.org_id.as_str()),
            ("Team ID", params.team_id.as_str()),
            ("Project ID", params.project_id.as_str()),
            ("Email", params.email.as_str()),
        ]) {
            return Ok(missing);
        }
        let request = ApiRequest::post(project_members_path(
            &params.org_id,
            &params.team_id,
            &params.project_id,
            &[],
        ))
        .json(json!({ "email": params.email, "role": params.role }));
        fetch(&ctx, request).await
    }
}

/// Parameters addressing one project member.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMemberParams {
    /// The ID of the organization to which the project belongs.
    pub org_id: String,
    /// The ID of the team to which the project belongs.
    pub team_id: String,
    /// The ID of the project.
    pub project_id: String,
    /// The ID of the project member.
    pub member_id: String,
}

impl ToolParams for ProjectMemberParams {}

impl ProjectMemberParams {
    fn check(&self) -> Result<(), rmcp::model::CallToolResult> {
        require_ids(&[
            ("Organization ID", self.org_id.as_str()),
            ("Team ID", self.team_id.as_str()),
            ("Project ID", self.project_id.as_str()),
            ("Member ID", self.member_id.as_str()),
        ])
    }

    fn path(&self) -> Vec<String> {
        project_members_path(
            &self.org_id,
            &self.team_id,
            &self.project_id,
            &[self.member_id.as_str()],
        )
    }
}

#[derive(Debug, Clone)]
pub struct GetProjectMemberTool;

#[async_trait]
impl ToolHandler for GetProjectMemberTool {
    const NAME: &'static str = "get-project-member";
    const DESCRIPTION: &'static str = "Retrieve information about a specific member of a project";
    type Params = ProjectMemberParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = params.check() {
            return Ok(missing);
        }
        fetch(&ctx, ApiRequest::get(params.path())).await
    }
}

#[derive(Debug, Clone)]
pub struct RemoveProjectMemberTool;

#[async_trait]
impl ToolHandler for RemoveProjectMemberTool {
    const NAME: &'static str = "remove-project-member";
    const DESCRIPTION: &'static str = "Remove a member from a project";
    type Params = ProjectMemberParams;

    async fn execute(ctx: ToolContext, params: Self::Params) -> ToolResult {
        if let Err(missing) = params.check() {
            return Ok(missing);
        }
        let message = format!(
            "Member {} successfully removed from project {}",
            params.member_id, params.project_id
        );
        confirm(&ctx, ApiRequest::delete(params.path()), message).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;
    use serde_json::json;

    use crate::domains::miro::mock::MockApi;
    use crate::domains::tools::definitions::common::test_support::{call, json_of};
    use crate::domains::tools::envelope;

    #[tokio::test]
    async fn test_organization_members_filters() {
        let api = Arc::new(MockApi::new());
        call(
            &api,
            "get-organization-members",
            json!({
                "orgId": "o1",
                "role": "organization_internal_admin",
                "license": "full_trial",
                "active": false
            }),
        )
        .await;

        let request = api.last_request();
        assert_eq!(request.path(), "/v2/orgs/o1/members");
        assert_eq!(request.query_value("role"), Some("organization_internal_admin"));
        assert_eq!(request.query_value("license"), Some("full_trial"));
        assert_eq!(request.query_value("active"), Some("false"));
        assert_eq!(request.query_value("limit"), None);
    }

    #[tokio::test]
    async fn test_add_project_member() {
        let api = Arc::new(MockApi::new());
        call(
            &api,
            "add-project-member",
            json!({
                "orgId": "o1", "teamId": "t1", "projectId": "p1",
                "email": "a@example.com", "role": "viewer"
            }),
        )
        .await;

        let request = api.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "/v2/orgs/o1/teams/t1/projects/p1/members");
        assert_eq!(
            request.body.unwrap(),
            json!({ "email": "a@example.com", "role": "viewer" })
        );
    }

    #[tokio::test]
    async fn test_add_project_member_rejects_unknown_role() {
        let api = Arc::new(MockApi::new());
        let result = call(
            &api,
            "add-project-member",
            json!({
                "orgId": "o1", "teamId": "t1", "projectId": "p1",
                "email": "a@example.com", "role": "coowner"
            }),
        )
        .await;
        assert!(envelope::is_error(&result));
    }

    #[tokio::test]
    async fn test_remove_project_member() {
        let api = Arc::new(MockApi::returning(serde_json::Value::Null));
        let result = call(
            &api,
            "remove-project-member",
            json!({ "orgId": "o1", "teamId": "t1", "projectId": "p1", "memberId": "m1" }),
        )
        .await;

        assert_eq!(api.last_request().method, Method::DELETE);
        assert_eq!(api.last_request().path(), "/v2/orgs/o1/teams/t1/projects/p1/members/m1");
        assert_eq!(json_of(&result)["success"], true);
    }
}
