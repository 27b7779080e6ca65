//! Organization store: the cached organization aggregate.
//!
//! Every mutation path refetches or replaces the whole aggregate; there
//! are no partial updates. Navigation decisions after a failed bootstrap
//! belong to the caller, so `initialize_organization` reports an outcome
//! instead of redirecting.

use crate::session::SessionStore;
use greenbook_client::ApiClient;
use greenbook_core::organization::{Organization, OrganizationSummary};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// Outcome of the organization bootstrap, for the caller to map onto
/// navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizationInit {
    /// Aggregate loaded; proceed.
    Ready,
    /// No session user or no organization for it; a login destination is
    /// appropriate.
    MissingSession,
    /// The organization exists but its data could not be loaded.
    Unavailable,
}

pub struct OrganizationStore {
    client: Arc<ApiClient>,
    session: Arc<SessionStore>,
    state: RwLock<Organization>,
}

impl OrganizationStore {
    pub fn new(client: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self {
            client,
            session,
            state: RwLock::new(Organization::default()),
        }
    }

    /// Snapshot of the cached aggregate.
    pub async fn organization(&self) -> Organization {
        self.state.read().await.clone()
    }

    /// Derived role count of the cached aggregate.
    pub async fn role_count(&self) -> usize {
        self.state.read().await.role_count()
    }

    /// Fetches and atomically replaces the aggregate. Returns a success
    /// flag rather than an error; callers must check it.
    pub async fn fetch_organization_info(&self, organization_id: &str) -> bool {
        match self.client.organization_info(organization_id).await {
            Ok(organization) => {
                *self.state.write().await = organization;
                true
            }
            Err(error) => {
                warn!(%organization_id, %error, "failed to fetch organization info");
                false
            }
        }
    }

    /// Resolves the organization owning the current session's user.
    /// `None` when there is no session user or the lookup fails.
    pub async fn get_organization_by_user_id(&self) -> Option<OrganizationSummary> {
        let user_id = self.session.user_id().await?;
        match self.client.organization_by_user(&user_id).await {
            Ok(summary) => Some(summary),
            Err(error) => {
                warn!(%user_id, %error, "failed to resolve organization by user");
                None
            }
        }
    }

    /// Composes user→organization resolution and the aggregate fetch.
    pub async fn initialize_organization(&self) -> OrganizationInit {
        let Some(summary) = self.get_organization_by_user_id().await else {
            return OrganizationInit::MissingSession;
        };
        if self.fetch_organization_info(&summary.organization_id).await {
            OrganizationInit::Ready
        } else {
            OrganizationInit::Unavailable
        }
    }
}
