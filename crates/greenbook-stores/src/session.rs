//! Session/user store: the authenticated identity and profile actions.
//!
//! Identity mutations always write through to session storage
//! synchronously; no mutation path may skip the storage side effect.

use greenbook_client::ApiClient;
use greenbook_client::api::user::UserProfile;
use greenbook_core::session::{
    KEY_ACCESS_TOKEN, KEY_USER_ID, KEY_USERNAME, KeyValueStorage, Session,
};
use greenbook_core::{GreenbookError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::warn;

/// Profile-fetch retry bounds: 3 attempts, fixed 1-second delay.
const PROFILE_FETCH_ATTEMPTS: u32 = 3;
const PROFILE_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Result tuple for the profile-update actions, which report failure
/// instead of returning an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl UpdateOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// The authentication guard: true when session storage still holds an
/// identity, whatever the in-memory state looks like.
pub fn is_authenticated_in_storage(storage: &dyn KeyValueStorage) -> bool {
    storage.get(KEY_USER_ID).is_some_and(|id| !id.is_empty())
}

pub struct SessionStore {
    client: Arc<ApiClient>,
    storage: Arc<dyn KeyValueStorage>,
    state: RwLock<Session>,
}

impl SessionStore {
    pub fn new(client: Arc<ApiClient>, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            client,
            storage,
            state: RwLock::new(Session::default()),
        }
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.state.read().await.clone()
    }

    /// Current user id, if authenticated.
    pub async fn user_id(&self) -> Option<String> {
        self.state.read().await.user_id.clone()
    }

    /// Sets the in-memory identity and persists it to storage.
    pub async fn login(&self, user_id: &str, username: &str, access_token: Option<&str>) {
        {
            let mut session = self.state.write().await;
            session.user_id = Some(user_id.to_string());
            session.username = username.to_string();
            session.access_token = access_token.map(String::from);
            session.is_authenticated = true;
        }
        self.storage.set(KEY_USER_ID, user_id);
        self.storage.set(KEY_USERNAME, username);
        match access_token {
            Some(token) => self.storage.set(KEY_ACCESS_TOKEN, token),
            None => self.storage.remove(KEY_ACCESS_TOKEN),
        }
        self.client.set_bearer_token(access_token.map(String::from));
    }

    /// Clears the identity from memory and storage.
    pub async fn logout(&self) {
        *self.state.write().await = Session::default();
        self.storage.remove(KEY_USER_ID);
        self.storage.remove(KEY_USERNAME);
        self.storage.remove(KEY_ACCESS_TOKEN);
        self.client.set_bearer_token(None);
    }

    /// Exchanges credentials for a token and logs the identity in.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<()> {
        let login = self.client.login(username, password).await?;
        self.login(&login.user_id, &login.username, Some(&login.access_token))
            .await;
        Ok(())
    }

    /// Registers a new account. Does not log in.
    pub async fn register(&self, username: &str, password: &str) -> Result<()> {
        self.client.register(username, password).await
    }

    /// Rehydrates the identity from storage at startup. When an identity
    /// is present, a full profile fetch runs with bounded retry; giving up
    /// is silent (logged only).
    pub async fn initialize_from_storage(&self) {
        let user_id = self.storage.get(KEY_USER_ID);
        let username = self.storage.get(KEY_USERNAME);
        let (Some(user_id), Some(username)) = (user_id, username) else {
            return;
        };
        let token = self.storage.get(KEY_ACCESS_TOKEN);
        self.login(&user_id, &username, token.as_deref()).await;

        for attempt in 1..=PROFILE_FETCH_ATTEMPTS {
            match self.fetch_user_profile().await {
                Ok(()) => return,
                Err(error) => {
                    warn!(attempt, %error, "profile fetch failed");
                    if attempt < PROFILE_FETCH_ATTEMPTS {
                        tokio::time::sleep(PROFILE_RETRY_DELAY).await;
                    }
                }
            }
        }
    }

    /// One profile fetch, merging returned fields over the current state.
    pub async fn fetch_user_profile(&self) -> Result<()> {
        let user_id = self
            .user_id()
            .await
            .ok_or_else(|| GreenbookError::missing_params("no user id in session"))?;
        let profile = self.client.fetch_user_profile(&user_id).await?;
        self.apply_profile(profile).await;
        Ok(())
    }

    /// Merges profile fields, keeping current values for anything absent.
    async fn apply_profile(&self, profile: UserProfile) {
        let mut session = self.state.write().await;
        if let Some(username) = profile.username {
            session.username = username;
        }
        if let Some(email) = profile.email {
            session.email = email;
        }
        if let Some(avatar_url) = profile.avatar_url {
            session.avatar_url = avatar_url;
        }
        if let Some(organization_name) = profile.organization_name {
            session.organization_name = organization_name;
        }
        if let Some(organization_role) = profile.organization_role {
            session.organization_role = organization_role;
        }
    }

    /// Renames the account. Reports `{success, error}` instead of
    /// throwing; on success the new name is applied to state and storage.
    pub async fn update_username(&self, new_username: &str) -> UpdateOutcome {
        let Some(user_id) = self.user_id().await else {
            return UpdateOutcome::failed("not logged in");
        };
        match self.client.change_username(&user_id, new_username).await {
            Ok(()) => {
                self.state.write().await.username = new_username.to_string();
                self.storage.set(KEY_USERNAME, new_username);
                UpdateOutcome::ok()
            }
            Err(error) => UpdateOutcome::failed(error.user_message()),
        }
    }

    /// Changes the password, with the same non-throwing contract.
    pub async fn update_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> UpdateOutcome {
        let Some(user_id) = self.user_id().await else {
            return UpdateOutcome::failed("not logged in");
        };
        match self
            .client
            .change_password(&user_id, current_password, new_password)
            .await
        {
            Ok(()) => UpdateOutcome::ok(),
            Err(error) => UpdateOutcome::failed(error.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenbook_client::ApiConfig;
    use greenbook_core::session::MemoryStorage;

    fn store_with_storage(storage: Arc<MemoryStorage>) -> SessionStore {
        let client = Arc::new(ApiClient::new(ApiConfig::default()));
        SessionStore::new(client, storage)
    }

    #[tokio::test]
    async fn login_persists_identity_to_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with_storage(storage.clone());

        store.login("u1", "Alice", Some("t1")).await;
        let session = store.session().await;
        assert!(session.is_authenticated);
        assert_eq!(session.username, "Alice");
        assert_eq!(storage.get(KEY_USER_ID).as_deref(), Some("u1"));
        assert_eq!(storage.get(KEY_ACCESS_TOKEN).as_deref(), Some("t1"));
        assert!(is_authenticated_in_storage(storage.as_ref()));
    }

    #[tokio::test]
    async fn logout_clears_memory_and_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with_storage(storage.clone());

        store.login("u1", "Alice", Some("t1")).await;
        store.logout().await;

        let session = store.session().await;
        assert!(!session.is_authenticated);
        assert!(session.user_id.is_none());
        assert_eq!(storage.get(KEY_USER_ID), None);
        assert_eq!(storage.get(KEY_USERNAME), None);
        assert_eq!(storage.get(KEY_ACCESS_TOKEN), None);
        assert!(!is_authenticated_in_storage(storage.as_ref()));
    }

    #[tokio::test]
    async fn update_actions_fail_without_throwing_when_logged_out() {
        let store = store_with_storage(Arc::new(MemoryStorage::new()));
        let outcome = store.update_username("new-name").await;
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("not logged in"));

        let outcome = store.update_password("old", "new").await;
        assert!(!outcome.success);
    }
}
