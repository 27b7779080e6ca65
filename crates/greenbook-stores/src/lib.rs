//! Store layer for the Greenbook client SDK.
//!
//! One store per functional area, each an explicit owned object rather
//! than an ambient singleton: construct a [`StoreContext`] at session
//! start and hand references to the views that need them. Stores keep
//! their state behind `tokio::sync::RwLock`, call the backend through a
//! shared [`ApiClient`], and surface asynchronous errors through the toast
//! channel where the UI showed them.
//!
//! There is no cross-method mutual exclusion: two rapid invocations of the
//! same mutating action can race, and the last response to resolve wins in
//! local state. The backend is the source of truth; local state is an
//! advisory cache.

pub mod company_info;
pub mod criteria;
pub mod organization;
pub mod report_edit;
pub mod review;
pub mod session;
pub mod workflow;

pub use company_info::CompanyInfoStore;
pub use criteria::CriteriaTemplateStore;
pub use organization::{OrganizationInit, OrganizationStore};
pub use report_edit::{MutationOutcome, ReportEditStore};
pub use review::ReviewStore;
pub use session::{SessionStore, UpdateOutcome};
pub use workflow::WorkflowStore;

use greenbook_client::ApiClient;
use greenbook_core::notify::Notifier;
use greenbook_core::session::KeyValueStorage;
use std::sync::Arc;

/// All stores of one client session, sharing a client, storage, and toast
/// sink.
pub struct StoreContext {
    pub session: Arc<SessionStore>,
    pub organization: Arc<OrganizationStore>,
    pub company_info: Arc<CompanyInfoStore>,
    pub criteria: Arc<CriteriaTemplateStore>,
    pub report_edit: Arc<ReportEditStore>,
    pub review: Arc<ReviewStore>,
    pub workflow: Arc<WorkflowStore>,
}

impl StoreContext {
    pub fn new(
        client: Arc<ApiClient>,
        storage: Arc<dyn KeyValueStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(client.clone(), storage));
        Self {
            organization: Arc::new(OrganizationStore::new(client.clone(), session.clone())),
            company_info: Arc::new(CompanyInfoStore::new(client.clone(), notifier.clone())),
            criteria: Arc::new(CriteriaTemplateStore::new(client.clone(), notifier.clone())),
            report_edit: Arc::new(ReportEditStore::new(client.clone())),
            review: Arc::new(ReviewStore::new(client.clone())),
            workflow: Arc::new(WorkflowStore::new(client, notifier)),
            session,
        }
    }
}
