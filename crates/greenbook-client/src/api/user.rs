//! User profile endpoints.

use crate::client::ApiClient;
use greenbook_core::Result;
use serde::{Deserialize, Serialize};

/// Profile fields as returned by the backend. Everything is optional;
/// callers keep their current values for anything absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userName", default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: Option<String>,
    #[serde(rename = "organizationName", default)]
    pub organization_name: Option<String>,
    #[serde(rename = "organizationRole", default)]
    pub organization_role: Option<String>,
}

#[derive(Debug, Serialize)]
struct UserIdRequest<'a> {
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
struct ChangeUsernameRequest<'a> {
    user_id: &'a str,
    new_username: &'a str,
}

#[derive(Debug, Serialize)]
struct ChangePasswordRequest<'a> {
    user_id: &'a str,
    current_password: &'a str,
    new_password: &'a str,
}

impl ApiClient {
    pub async fn fetch_user_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.post(
            "/api/user/profile/Personal_Information",
            &UserIdRequest { user_id },
        )
        .await
    }

    pub async fn change_username(&self, user_id: &str, new_username: &str) -> Result<()> {
        self.post_unit(
            "/api/user/profile/Change_Username",
            &ChangeUsernameRequest {
                user_id,
                new_username,
            },
        )
        .await
    }

    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        self.post_unit(
            "/api/user/profile/Change_Password",
            &ChangePasswordRequest {
                user_id,
                current_password,
                new_password,
            },
        )
        .await
    }
}
