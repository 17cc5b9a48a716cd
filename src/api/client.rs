// src/api/client.rs
//! Typed HTTP client for the remote JobSY service.
//!
//! One fixed origin, one attempt per call. Non-success responses are
//! normalized into [`Error::Api`] carrying the server-supplied message.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};

use crate::api::types::{
    AllJobsResponse, AppliedJobsResponse, ApplyJobResponse, FindJobsResponse, Job,
    JobsByRoleResponse, LoginResponse, ParseResumeResponse, Profile, RecommendedJobsResponse,
    RegisterResponse,
};
use crate::error::{Error, Result};
use crate::jobs::JobsApi;
use crate::utils::{content_type_for, validate_file_extension, RESUME_EXTENSIONS};

const USER_REGISTER_ENDPOINT: &str = "/user-register";
const USER_LOGIN_ENDPOINT: &str = "/user-login";
const PROFILE_ENDPOINT: &str = "/profile";
const PARSE_RESUME_ENDPOINT: &str = "/get-parse-resume";
const RECOMMENDED_JOBS_ENDPOINT: &str = "/recommended-jobs";
const JOBS_BY_ROLE_ENDPOINT: &str = "/jobs-by-role";
const FIND_JOBS_ENDPOINT: &str = "/find-jobs";
const APPLIED_JOBS_ENDPOINT: &str = "/applied-jobs";
const APPLY_JOB_ENDPOINT: &str = "/apply-job";
const ALL_JOBS_ENDPOINT: &str = "/get-all-jobs";

/// Which parameter identifies the profile to fetch.
pub enum ProfileQuery<'a> {
    ById(&'a str),
    ByEmail(&'a str),
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// No explicit timeout: the service cold-starts slowly on its free tier,
    /// so calls wait on the transport defaults rather than racing a timer.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisterResponse> {
        let url = format!("{}{}", self.base_url, USER_REGISTER_ENDPOINT);
        let payload = serde_json::json!({
            "full_name": full_name,
            "email": email,
            "password": password,
        });
        let response = self.client.post(&url).json(&payload).send().await?;
        decode(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = format!("{}{}", self.base_url, USER_LOGIN_ENDPOINT);
        let payload = serde_json::json!({
            "email": email,
            "password": password,
        });
        let response = self.client.post(&url).json(&payload).send().await?;
        decode(response).await
    }

    pub async fn fetch_profile(&self, query: ProfileQuery<'_>) -> Result<Profile> {
        let url = format!("{}{}", self.base_url, PROFILE_ENDPOINT);
        let (key, value) = match query {
            ProfileQuery::ById(id) => ("user_id", id),
            ProfileQuery::ByEmail(email) => ("user_email", email),
        };
        let response = self.client.get(&url).query(&[(key, value)]).send().await?;
        decode(response).await
    }

    /// Uploads a resume for server-side parsing. The file is validated
    /// locally (existence and extension) before any bytes go out.
    pub async fn parse_resume(&self, file_path: &Path, user_id: &str) -> Result<ParseResumeResponse> {
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Validation(format!("not a file: {}", file_path.display())))?
            .to_string();
        validate_file_extension(&file_name, RESUME_EXTENSIONS)?;
        let content_type = content_type_for(&file_name)?;

        let file_content = tokio::fs::read(file_path).await.map_err(|e| {
            Error::Validation(format!("cannot read {}: {e}", file_path.display()))
        })?;

        let form = Form::new().part(
            "file",
            Part::bytes(file_content)
                .file_name(file_name)
                .mime_str(content_type)
                .map_err(|e| Error::Validation(format!("bad content type: {e}")))?,
        );

        let url = format!("{}{}", self.base_url, PARSE_RESUME_ENDPOINT);
        debug!("uploading resume to {url}");
        let response = self
            .client
            .post(&url)
            .query(&[("user_id", user_id)])
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn recommended_jobs(&self, user_id: &str) -> Result<Vec<Job>> {
        let url = format!("{}{}", self.base_url, RECOMMENDED_JOBS_ENDPOINT);
        let response = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        let body: RecommendedJobsResponse = decode(response).await?;
        Ok(body.recommended_jobs)
    }

    pub async fn jobs_by_role(&self, job_role: &str) -> Result<Vec<Job>> {
        let url = format!("{}{}", self.base_url, JOBS_BY_ROLE_ENDPOINT);
        let response = self
            .client
            .get(&url)
            .query(&[("job_role", job_role)])
            .send()
            .await?;
        let body: JobsByRoleResponse = decode(response).await?;
        Ok(body.jobs)
    }

    pub async fn find_jobs(
        &self,
        user_id: &str,
        job_role: &str,
        location: Option<&str>,
    ) -> Result<Vec<Job>> {
        let url = format!("{}{}", self.base_url, FIND_JOBS_ENDPOINT);
        let mut params = vec![("user_id", user_id), ("job_role", job_role)];
        if let Some(location) = location {
            params.push(("location", location));
        }
        let response = self.client.post(&url).query(&params).send().await?;
        let body: FindJobsResponse = decode(response).await?;
        Ok(body.all_jobs.unwrap_or_default())
    }

    pub async fn applied_jobs(&self, user_id: &str) -> Result<Vec<Job>> {
        let url = format!("{}{}", self.base_url, APPLIED_JOBS_ENDPOINT);
        let response = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        let body: AppliedJobsResponse = decode(response).await?;
        Ok(body.applied_jobs)
    }

    pub async fn apply_job(&self, user_id: &str, job_id: &str) -> Result<ApplyJobResponse> {
        let url = format!("{}{}", self.base_url, APPLY_JOB_ENDPOINT);
        let response = self
            .client
            .put(&url)
            .query(&[("user_id", user_id), ("job_id", job_id)])
            .send()
            .await?;
        decode(response).await
    }

    pub async fn all_jobs(&self, user_id: &str) -> Result<Vec<Job>> {
        let url = format!("{}{}", self.base_url, ALL_JOBS_ENDPOINT);
        let response = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        let body: AllJobsResponse = decode(response).await?;
        Ok(body.into_jobs())
    }
}

/// Parse a successful body as `T`; turn a non-success status into
/// [`Error::Api`] with the normalized server message.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        serde_json::from_str(&body).map_err(|e| {
            warn!("response did not match schema: {e}");
            Error::Decode(e.to_string())
        })
    } else {
        Err(Error::Api(error_message(&body)))
    }
}

/// The service reports failures inconsistently: FastAPI-style `detail`
/// strings, an `error` field, or an arbitrary object. Prefer them in that
/// order, falling back to the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => {
            if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
                detail.to_string()
            } else if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
                error.to_string()
            } else {
                value.to_string()
            }
        }
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl JobsApi for ApiClient {
    async fn recommended_jobs(&self, user_id: &str) -> Result<Vec<Job>> {
        ApiClient::recommended_jobs(self, user_id).await
    }

    async fn jobs_by_role(&self, job_role: &str) -> Result<Vec<Job>> {
        ApiClient::jobs_by_role(self, job_role).await
    }

    async fn find_jobs(
        &self,
        user_id: &str,
        job_role: &str,
        location: Option<&str>,
    ) -> Result<Vec<Job>> {
        ApiClient::find_jobs(self, user_id, job_role, location).await
    }

    async fn applied_jobs(&self, user_id: &str) -> Result<Vec<Job>> {
        ApiClient::applied_jobs(self, user_id).await
    }

    async fn all_jobs(&self, user_id: &str) -> Result<Vec<Job>> {
        ApiClient::all_jobs(self, user_id).await
    }

    async fn apply_job(&self, user_id: &str, job_id: &str) -> Result<()> {
        ApiClient::apply_job(self, user_id, job_id).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_detail_string() {
        assert_eq!(
            error_message(r#"{"detail": "Invalid credentials"}"#),
            "Invalid credentials"
        );
    }

    #[test]
    fn error_message_falls_back_to_error_field() {
        assert_eq!(
            error_message(r#"{"error": "User not found"}"#),
            "User not found"
        );
    }

    #[test]
    fn error_message_ignores_non_string_detail() {
        // FastAPI validation errors put an array under `detail`.
        let msg = error_message(r#"{"detail": [{"loc": ["body", "email"]}]}"#);
        assert!(msg.contains("detail"));
    }

    #[test]
    fn error_message_stringifies_unknown_shapes() {
        let msg = error_message(r#"{"status": "failed", "code": 7}"#);
        assert!(msg.contains("failed"));
    }

    #[test]
    fn error_message_passes_through_non_json_bodies() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
