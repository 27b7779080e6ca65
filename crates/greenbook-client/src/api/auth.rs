//! Login and registration.

use crate::client::ApiClient;
use greenbook_core::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// The login response is one of the few flat-shaped bodies: its fields sit
/// next to `status` at the top level instead of under `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub username: String,
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

impl ApiClient {
    /// Exchanges credentials for a bearer token and identity.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        self.post_flat("/api/login", &CredentialsRequest { username, password })
            .await
    }

    /// Registers a new account.
    pub async fn register(&self, username: &str, password: &str) -> Result<()> {
        self.post_unit("/api/register", &CredentialsRequest { username, password })
            .await
    }
}
