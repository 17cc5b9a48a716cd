// src/jobs/mod.rs
//! Job listing state and the apply-confirmation protocol.

pub mod controller;
pub mod pending;

use async_trait::async_trait;

use crate::api::types::Job;
use crate::error::Result;

/// The slice of the remote API the listing controller depends on.
/// [`crate::api::ApiClient`] is the production implementation; tests swap in
/// a fake.
#[async_trait]
pub trait JobsApi: Send + Sync {
    async fn recommended_jobs(&self, user_id: &str) -> Result<Vec<Job>>;
    async fn jobs_by_role(&self, job_role: &str) -> Result<Vec<Job>>;
    async fn find_jobs(
        &self,
        user_id: &str,
        job_role: &str,
        location: Option<&str>,
    ) -> Result<Vec<Job>>;
    async fn applied_jobs(&self, user_id: &str) -> Result<Vec<Job>>;
    async fn all_jobs(&self, user_id: &str) -> Result<Vec<Job>>;
    async fn apply_job(&self, user_id: &str, job_id: &str) -> Result<()>;
}

pub use controller::{JobListingController, SourceKind, Tab};
pub use pending::{PendingApply, PendingApplySlot};
