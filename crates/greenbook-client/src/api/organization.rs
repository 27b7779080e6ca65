//! Organization endpoints.

use crate::client::ApiClient;
use greenbook_core::Result;
use greenbook_core::organization::{Organization, OrganizationSummary, Role};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct OrganizationIdRequest<'a> {
    organization_id: &'a str,
}

#[derive(Debug, Serialize)]
struct UserIdRequest<'a> {
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
struct ApproverGroupsRequest<'a> {
    #[serde(rename = "organizationID")]
    organization_id: &'a str,
}

impl ApiClient {
    /// Fetches the whole organization aggregate.
    pub async fn organization_info(&self, organization_id: &str) -> Result<Organization> {
        self.post(
            "/api/organizations/info",
            &OrganizationIdRequest { organization_id },
        )
        .await
    }

    /// Resolves the organization owning the given user.
    pub async fn organization_by_user(&self, user_id: &str) -> Result<OrganizationSummary> {
        self.post("/api/organizations/get_by_user", &UserIdRequest { user_id })
            .await
    }

    /// Role groups available as workflow approvers.
    pub async fn approver_groups(&self, organization_id: &str) -> Result<Vec<Role>> {
        self.post(
            "/api/organization/approver-groups",
            &ApproverGroupsRequest { organization_id },
        )
        .await
    }
}
