//! Company-data asset and criteria-template endpoints.

use crate::client::ApiClient;
use greenbook_core::Result;
use greenbook_core::criteria::Criterion;
use greenbook_core::outline::SectionForest;
use serde::{Deserialize, Serialize};

/// A company-data asset: the section forest plus its lock state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetContent {
    #[serde(default)]
    pub sections: SectionForest,
    #[serde(rename = "isLocked", default)]
    pub is_locked: bool,
    #[serde(rename = "lockedBy", default)]
    pub locked_by: Option<String>,
}

/// A criteria template as returned by `get_standard_template`.
#[derive(Debug, Clone, Deserialize)]
pub struct CriteriaTemplate {
    #[serde(rename = "assetName")]
    pub asset_name: String,
    #[serde(default)]
    pub content: CriteriaTemplateContent,
    #[serde(rename = "lastModified", default)]
    pub last_modified: Option<String>,
    #[serde(rename = "modifiedBy", default)]
    pub modified_by: Option<String>,
    #[serde(rename = "isLocked", default)]
    pub is_locked: bool,
    #[serde(rename = "lockedBy", default)]
    pub locked_by: Option<String>,
    #[serde(rename = "lockedAt", default)]
    pub locked_at: Option<String>,
    #[serde(rename = "blockStatus", default)]
    pub block_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CriteriaTemplateContent {
    #[serde(rename = "selectedCriteria", default)]
    pub selected_criteria: Vec<Criterion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedTemplate {
    #[serde(rename = "lastModified", default)]
    pub last_modified: Option<String>,
}

#[derive(Debug, Serialize)]
struct AssetContentRequest<'a> {
    organization_id: &'a str,
    asset_id: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateCompanyTableRequest<'a> {
    company_name: &'a str,
    creator_id: &'a str,
    organization_id: &'a str,
    template_url: &'a str,
}

#[derive(Debug, Serialize)]
struct TemplateRequest<'a> {
    asset_id: &'a str,
    organization_id: &'a str,
    role_ids: &'a [String],
}

#[derive(Debug, Serialize)]
struct SaveTemplateRequest<'a> {
    asset_id: &'a str,
    organization_id: &'a str,
    #[serde(rename = "BlockID")]
    block_id: &'a str,
    #[serde(rename = "assetName")]
    asset_name: &'a str,
    #[serde(rename = "selectedCriteria")]
    selected_criteria: &'a [Criterion],
}

impl ApiClient {
    /// Full-asset fetch of a company-data section forest.
    pub async fn asset_content(
        &self,
        organization_id: &str,
        asset_id: &str,
    ) -> Result<AssetContent> {
        self.post(
            "/api/organizations/get_asset_content",
            &AssetContentRequest {
                organization_id,
                asset_id,
            },
        )
        .await
    }

    /// Creates a company-data asset from an industry template.
    pub async fn create_company_table(
        &self,
        company_name: &str,
        creator_id: &str,
        organization_id: &str,
        template_url: &str,
    ) -> Result<()> {
        self.post_unit(
            "/api/organizations/create_company_table",
            &CreateCompanyTableRequest {
                company_name,
                creator_id,
                organization_id,
                template_url,
            },
        )
        .await
    }

    /// Fetches a criteria template with its selection and lock metadata.
    pub async fn standard_template(
        &self,
        asset_id: &str,
        organization_id: &str,
        role_ids: &[String],
    ) -> Result<CriteriaTemplate> {
        self.post(
            "/api/organizations/get_standard_template",
            &TemplateRequest {
                asset_id,
                organization_id,
                role_ids,
            },
        )
        .await
    }

    /// Posts the whole criteria selection back.
    pub async fn save_standard_template(
        &self,
        asset_id: &str,
        organization_id: &str,
        block_id: &str,
        asset_name: &str,
        selected_criteria: &[Criterion],
    ) -> Result<SavedTemplate> {
        self.post(
            "/api/organizations/save_standard_template",
            &SaveTemplateRequest {
                asset_id,
                organization_id,
                block_id,
                asset_name,
                selected_criteria,
            },
        )
        .await
    }
}
