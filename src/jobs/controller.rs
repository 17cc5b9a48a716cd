// src/jobs/controller.rs
//! State over the three mutually exclusive recommendation sources plus the
//! independently fetched applied set.
//!
//! Sources: default server recommendations, role-selected lists keyed by
//! role, and an explicit custom search. Activating custom search snapshots
//! and clears the other two; clearing it restores the snapshot. Applied jobs
//! are filtered out of every recommendation view.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::warn;

use crate::api::types::Job;
use crate::jobs::JobsApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Recommended,
    Applied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Default,
    RoleSelected,
    CustomSearch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomSearch {
    pub job_role: String,
    pub location: Option<String>,
}

/// Snapshot of the non-custom sources, restored when custom search clears.
#[derive(Debug, Default)]
struct PriorSources {
    default_jobs: Vec<Job>,
    selected_roles: Vec<String>,
    role_jobs: HashMap<String, Vec<Job>>,
}

pub struct JobListingController {
    api: Arc<dyn JobsApi>,
    user_id: String,
    pub tab: Tab,
    default_jobs: Vec<Job>,
    selected_roles: Vec<String>,
    role_jobs: HashMap<String, Vec<Job>>,
    custom: Option<CustomSearch>,
    custom_jobs: Vec<Job>,
    prior: Option<PriorSources>,
    applied: Vec<Job>,
}

impl JobListingController {
    pub fn new(api: Arc<dyn JobsApi>, user_id: String) -> Self {
        JobListingController {
            api,
            user_id,
            tab: Tab::Recommended,
            default_jobs: Vec::new(),
            selected_roles: Vec::new(),
            role_jobs: HashMap::new(),
            custom: None,
            custom_jobs: Vec::new(),
            prior: None,
            applied: Vec::new(),
        }
    }

    /// Initial population: recommendations and applied set fetched
    /// concurrently and joined. Failed fetches degrade to empty lists.
    pub async fn load(&mut self) {
        let (recommended, applied) = tokio::join!(
            self.api.recommended_jobs(&self.user_id),
            self.api.applied_jobs(&self.user_id),
        );
        self.default_jobs = degrade("recommended jobs", recommended);
        self.applied = degrade("applied jobs", applied);
    }

    /// Alternative population path over `get-all-jobs`: one fetch partitioned
    /// by the applied flag. Resets any role/custom selection state.
    pub async fn load_all(&mut self) {
        let jobs = degrade("all jobs", self.api.all_jobs(&self.user_id).await);
        self.selected_roles.clear();
        self.role_jobs.clear();
        self.custom = None;
        self.custom_jobs.clear();
        self.prior = None;
        let (applied, rest): (Vec<Job>, Vec<Job>) =
            jobs.into_iter().partition(|j| j.applied);
        self.default_jobs = rest;
        self.applied = applied;
    }

    pub fn source_kind(&self) -> SourceKind {
        if self.custom.is_some() {
            SourceKind::CustomSearch
        } else if !self.selected_roles.is_empty() {
            SourceKind::RoleSelected
        } else {
            SourceKind::Default
        }
    }

    pub fn selected_roles(&self) -> &[String] {
        &self.selected_roles
    }

    pub fn custom_search(&self) -> Option<&CustomSearch> {
        self.custom.as_ref()
    }

    /// Toggle a predefined role. Selecting fetches that role's list;
    /// deselecting drops its key only, leaving other roles untouched. A
    /// toggle while custom search is active clears the search first.
    pub async fn toggle_role(&mut self, role: &str) {
        if self.custom.is_some() {
            self.clear_search();
        }
        if let Some(pos) = self.selected_roles.iter().position(|r| r == role) {
            self.selected_roles.remove(pos);
            self.role_jobs.remove(role);
            return;
        }
        let jobs = degrade("jobs by role", self.api.jobs_by_role(role).await);
        self.selected_roles.push(role.to_string());
        self.role_jobs.insert(role.to_string(), jobs);
    }

    /// Activate custom search: snapshot and clear the other two sources,
    /// replace (never merge) the displayed recommendations.
    pub async fn search(&mut self, job_role: &str, location: Option<&str>) {
        if self.custom.is_none() {
            self.prior = Some(PriorSources {
                default_jobs: std::mem::take(&mut self.default_jobs),
                selected_roles: std::mem::take(&mut self.selected_roles),
                role_jobs: std::mem::take(&mut self.role_jobs),
            });
        }
        self.custom = Some(CustomSearch {
            job_role: job_role.to_string(),
            location: location.map(str::to_string),
        });
        self.custom_jobs = degrade(
            "find jobs",
            self.api.find_jobs(&self.user_id, job_role, location).await,
        );
    }

    /// Deactivate custom search and restore whichever source was active
    /// before it.
    pub fn clear_search(&mut self) {
        if self.custom.take().is_none() {
            return;
        }
        self.custom_jobs.clear();
        if let Some(prior) = self.prior.take() {
            self.default_jobs = prior.default_jobs;
            self.selected_roles = prior.selected_roles;
            self.role_jobs = prior.role_jobs;
        }
    }

    /// The recommendation view for the active source, minus anything already
    /// applied (by flag or by membership in the applied set).
    pub fn recommended_view(&self) -> Vec<&Job> {
        let applied_ids: HashSet<&str> =
            self.applied.iter().map(|j| j.id.as_str()).collect();
        let visible = |job: &&Job| !job.applied && !applied_ids.contains(job.id.as_str());

        match self.source_kind() {
            SourceKind::Default => self.default_jobs.iter().filter(visible).collect(),
            SourceKind::RoleSelected => self
                .selected_roles
                .iter()
                .filter_map(|role| self.role_jobs.get(role))
                .flatten()
                .filter(visible)
                .collect(),
            SourceKind::CustomSearch => self.custom_jobs.iter().filter(visible).collect(),
        }
    }

    pub fn applied_view(&self) -> &[Job] {
        &self.applied
    }

    /// Refetch the lists a confirmed application affects: the active
    /// recommendation source and the applied set.
    pub async fn refresh(&mut self) {
        match self.source_kind() {
            SourceKind::Default => {
                self.default_jobs = degrade(
                    "recommended jobs",
                    self.api.recommended_jobs(&self.user_id).await,
                );
            }
            SourceKind::RoleSelected => {
                for role in self.selected_roles.clone() {
                    let jobs = degrade("jobs by role", self.api.jobs_by_role(&role).await);
                    self.role_jobs.insert(role, jobs);
                }
            }
            SourceKind::CustomSearch => {
                if let Some(custom) = self.custom.clone() {
                    self.custom_jobs = degrade(
                        "find jobs",
                        self.api
                            .find_jobs(&self.user_id, &custom.job_role, custom.location.as_deref())
                            .await,
                    );
                }
            }
        }
        self.applied = degrade("applied jobs", self.api.applied_jobs(&self.user_id).await);
    }
}

/// A failed job-list fetch renders as an empty list, not an error.
fn degrade(what: &str, result: crate::error::Result<Vec<Job>>) -> Vec<Job> {
    match result {
        Ok(jobs) => jobs,
        Err(e) => {
            warn!("fetching {what} failed, showing none: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn job(id: &str, title: &str) -> Job {
        Job {
            id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            description: None,
            requirements: Vec::new(),
            matching_skills: Vec::new(),
            experience_required: None,
            score: None,
            link: None,
            applied: false,
            applied_at: None,
        }
    }

    fn applied_job(id: &str, title: &str) -> Job {
        Job {
            applied: true,
            ..job(id, title)
        }
    }

    #[derive(Default)]
    struct FakeApi {
        recommended: Vec<Job>,
        by_role: HashMap<String, Vec<Job>>,
        found: Vec<Job>,
        applied: Vec<Job>,
        all: Vec<Job>,
        fail_recommended: bool,
        apply_calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl JobsApi for FakeApi {
        async fn recommended_jobs(&self, _user_id: &str) -> crate::error::Result<Vec<Job>> {
            if self.fail_recommended {
                return Err(Error::Api("boom".into()));
            }
            Ok(self.recommended.clone())
        }

        async fn jobs_by_role(&self, job_role: &str) -> crate::error::Result<Vec<Job>> {
            Ok(self.by_role.get(job_role).cloned().unwrap_or_default())
        }

        async fn find_jobs(
            &self,
            _user_id: &str,
            _job_role: &str,
            _location: Option<&str>,
        ) -> crate::error::Result<Vec<Job>> {
            Ok(self.found.clone())
        }

        async fn applied_jobs(&self, _user_id: &str) -> crate::error::Result<Vec<Job>> {
            Ok(self.applied.clone())
        }

        async fn all_jobs(&self, _user_id: &str) -> crate::error::Result<Vec<Job>> {
            Ok(self.all.clone())
        }

        async fn apply_job(&self, _user_id: &str, job_id: &str) -> crate::error::Result<()> {
            self.apply_calls.lock().unwrap().push(job_id.to_string());
            Ok(())
        }
    }

    fn controller(api: FakeApi) -> JobListingController {
        JobListingController::new(Arc::new(api), "u1".to_string())
    }

    #[tokio::test]
    async fn load_populates_default_and_applied() {
        let mut ctl = controller(FakeApi {
            recommended: vec![job("1", "Dev")],
            applied: vec![applied_job("2", "Old")],
            ..Default::default()
        });
        ctl.load().await;
        assert_eq!(ctl.recommended_view().len(), 1);
        assert_eq!(ctl.applied_view().len(), 1);
        assert_eq!(ctl.source_kind(), SourceKind::Default);
    }

    #[tokio::test]
    async fn failed_fetch_degrades_to_empty() {
        let mut ctl = controller(FakeApi {
            fail_recommended: true,
            applied: vec![applied_job("2", "Old")],
            ..Default::default()
        });
        ctl.load().await;
        assert!(ctl.recommended_view().is_empty());
        assert_eq!(ctl.applied_view().len(), 1);
    }

    #[tokio::test]
    async fn role_toggle_unions_and_removes_independently() {
        let mut by_role = HashMap::new();
        by_role.insert(
            "Python Developer".to_string(),
            vec![job("p1", "Py"), job("p2", "Py"), job("p3", "Py")],
        );
        by_role.insert(
            "ML Engineer".to_string(),
            vec![job("m1", "ML"), job("m2", "ML"), job("m3", "ML")],
        );
        let mut ctl = controller(FakeApi {
            by_role,
            ..Default::default()
        });

        ctl.toggle_role("Python Developer").await;
        ctl.toggle_role("ML Engineer").await;
        assert_eq!(ctl.source_kind(), SourceKind::RoleSelected);
        assert_eq!(ctl.recommended_view().len(), 6);

        ctl.toggle_role("ML Engineer").await;
        assert_eq!(ctl.recommended_view().len(), 3);
        assert_eq!(ctl.selected_roles(), ["Python Developer".to_string()]);

        ctl.toggle_role("Python Developer").await;
        assert_eq!(ctl.source_kind(), SourceKind::Default);
        assert!(ctl.recommended_view().is_empty());
    }

    #[tokio::test]
    async fn custom_search_replaces_then_restores_prior_source() {
        let mut by_role = HashMap::new();
        by_role.insert("Python Developer".to_string(), vec![job("p1", "Py")]);
        let mut ctl = controller(FakeApi {
            recommended: vec![job("r1", "Rec")],
            by_role,
            found: vec![job("f1", "Found"), job("f2", "Found")],
            ..Default::default()
        });
        ctl.load().await;
        ctl.toggle_role("Python Developer").await;

        ctl.search("Data Engineer", Some("Berlin")).await;
        assert_eq!(ctl.source_kind(), SourceKind::CustomSearch);
        assert!(ctl.selected_roles().is_empty());
        let view: Vec<&str> = ctl.recommended_view().iter().map(|j| j.id.as_str()).collect();
        assert_eq!(view, ["f1", "f2"]);

        ctl.clear_search();
        assert_eq!(ctl.source_kind(), SourceKind::RoleSelected);
        let view: Vec<&str> = ctl.recommended_view().iter().map(|j| j.id.as_str()).collect();
        assert_eq!(view, ["p1"]);
    }

    #[tokio::test]
    async fn repeated_search_keeps_first_snapshot() {
        let mut ctl = controller(FakeApi {
            recommended: vec![job("r1", "Rec")],
            found: vec![job("f1", "Found")],
            ..Default::default()
        });
        ctl.load().await;

        ctl.search("First", None).await;
        ctl.search("Second", None).await;
        ctl.clear_search();

        assert_eq!(ctl.source_kind(), SourceKind::Default);
        let view: Vec<&str> = ctl.recommended_view().iter().map(|j| j.id.as_str()).collect();
        assert_eq!(view, ["r1"]);
    }

    #[tokio::test]
    async fn clear_search_without_active_search_is_a_no_op() {
        let mut ctl = controller(FakeApi {
            recommended: vec![job("r1", "Rec")],
            ..Default::default()
        });
        ctl.load().await;
        ctl.clear_search();
        assert_eq!(ctl.recommended_view().len(), 1);
    }

    #[tokio::test]
    async fn applied_jobs_are_filtered_out_of_recommendations() {
        let mut ctl = controller(FakeApi {
            // "3" is in both sets; "4" carries the applied flag directly.
            recommended: vec![job("3", "Both"), applied_job("4", "Flagged"), job("5", "Fresh")],
            applied: vec![applied_job("3", "Both")],
            ..Default::default()
        });
        ctl.load().await;

        let view: Vec<&str> = ctl.recommended_view().iter().map(|j| j.id.as_str()).collect();
        assert_eq!(view, ["5"]);
        assert_eq!(ctl.applied_view().len(), 1);
    }

    #[tokio::test]
    async fn load_all_partitions_by_applied_flag() {
        let mut ctl = controller(FakeApi {
            all: vec![job("1", "Open"), applied_job("2", "Done"), job("3", "Open")],
            ..Default::default()
        });
        ctl.load_all().await;
        assert_eq!(ctl.recommended_view().len(), 2);
        assert_eq!(ctl.applied_view().len(), 1);
        assert_eq!(ctl.source_kind(), SourceKind::Default);
    }

    #[tokio::test]
    async fn refresh_refetches_applied_set() {
        let mut ctl = controller(FakeApi {
            recommended: vec![job("1", "Dev")],
            applied: vec![applied_job("2", "Done")],
            ..Default::default()
        });
        ctl.load().await;
        ctl.refresh().await;
        assert_eq!(ctl.applied_view().len(), 1);
        assert_eq!(ctl.recommended_view().len(), 1);
    }
}
