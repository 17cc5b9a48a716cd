// src/api/types.rs
//! Response schemas for the remote service, validated at the client boundary.
//!
//! Field presence varies between endpoints (the service is loose about
//! optional fields), so optional and defaulted fields are explicit here
//! instead of each call site trusting a field to exist.

use serde::{Deserialize, Serialize};

/// A job listing as returned by every jobs endpoint.
///
/// Wire aliases cover the service's mixed naming: Mongo-style `_id`,
/// `job_description` on some endpoints, camelCase on others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, alias = "job_description")]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, rename = "matchingSkills", alias = "matching_skills")]
    pub matching_skills: Vec<String>,
    #[serde(default, rename = "experienceRequired", alias = "experience_required")]
    pub experience_required: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub applied: bool,
    #[serde(default, rename = "appliedAt")]
    pub applied_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub score: Option<String>,
}

/// Full profile as served by `/profile`.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

/// Partial profile fields, merged into the session field-by-field.
/// `None` means "not present in this update", never "clear the field".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub experience: Option<Vec<ExperienceEntry>>,
    #[serde(default)]
    pub education: Option<Vec<EducationEntry>>,
}

impl From<Profile> for ProfileUpdate {
    fn from(p: Profile) -> Self {
        ProfileUpdate {
            full_name: p.full_name,
            phone: p.phone,
            skills: Some(p.skills),
            experience: Some(p.experience),
            education: Some(p.education),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user_id: String,
    /// Drives post-login routing: jobs when a resume is on file, upload otherwise.
    #[serde(default)]
    pub resume_uploaded: bool,
}

#[derive(Debug, Deserialize)]
pub struct ParseResumeResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub parsed_data: ProfileUpdate,
}

#[derive(Debug, Deserialize)]
pub struct RecommendedJobsResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub jobs_returned: Option<u64>,
    #[serde(default)]
    pub recommended_jobs: Vec<Job>,
}

#[derive(Debug, Deserialize)]
pub struct JobsByRoleResponse {
    #[serde(default)]
    pub job_role: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

#[derive(Debug, Deserialize)]
pub struct FindJobsResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub jobs_found: Option<u64>,
    #[serde(default)]
    pub all_jobs: Option<Vec<Job>>,
}

#[derive(Debug, Deserialize)]
pub struct AppliedJobsResponse {
    #[serde(default)]
    pub applied_jobs: Vec<Job>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyJobResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// `/get-all-jobs` answers with either a bare array or a message object.
/// Anything that is not an array normalizes to an empty list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AllJobsResponse {
    Jobs(Vec<Job>),
    Other(serde_json::Value),
}

impl AllJobsResponse {
    pub fn into_jobs(self) -> Vec<Job> {
        match self {
            AllJobsResponse::Jobs(jobs) => jobs,
            AllJobsResponse::Other(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_accepts_mongo_and_camel_case_fields() {
        let raw = r#"{
            "_id": "65f1",
            "title": "Rust Engineer",
            "company": "Acme",
            "job_description": "Build services",
            "requirements": ["Rust"],
            "matchingSkills": ["Rust", "Tokio"],
            "experienceRequired": "2+ years",
            "score": 0.82,
            "link": "https://example.com/apply",
            "applied": false
        }"#;
        let job: Job = serde_json::from_str(raw).unwrap();
        assert_eq!(job.id, "65f1");
        assert_eq!(job.description.as_deref(), Some("Build services"));
        assert_eq!(job.matching_skills, vec!["Rust", "Tokio"]);
        assert_eq!(job.experience_required.as_deref(), Some("2+ years"));
        assert!(!job.applied);
    }

    #[test]
    fn job_defaults_missing_optionals() {
        let job: Job = serde_json::from_str(r#"{"id": "1", "title": "Dev"}"#).unwrap();
        assert_eq!(job.company, "");
        assert!(job.requirements.is_empty());
        assert!(job.link.is_none());
        assert!(!job.applied);
        assert!(job.applied_at.is_none());
    }

    #[test]
    fn all_jobs_response_normalizes_non_array_bodies() {
        let arr: AllJobsResponse =
            serde_json::from_str(r#"[{"id": "1", "title": "Dev"}]"#).unwrap();
        assert_eq!(arr.into_jobs().len(), 1);

        let msg: AllJobsResponse =
            serde_json::from_str(r#"{"message": "no jobs yet"}"#).unwrap();
        assert!(msg.into_jobs().is_empty());
    }

    #[test]
    fn login_response_defaults_resume_uploaded() {
        let res: LoginResponse =
            serde_json::from_str(r#"{"message": "ok", "user_id": "u1"}"#).unwrap();
        assert!(!res.resume_uploaded);
    }

    #[test]
    fn profile_update_from_profile_keeps_all_sections() {
        let profile: Profile = serde_json::from_str(
            r#"{
                "user_id": "u1",
                "full_name": "Ada",
                "email": "ada@example.com",
                "skills": ["python"],
                "experience": [{"position": "Engineer", "company": "Acme", "duration": "2y"}],
                "education": [{"degree": "BSc", "institution": "MIT", "year": "2019"}]
            }"#,
        )
        .unwrap();
        let update = ProfileUpdate::from(profile);
        assert_eq!(update.full_name.as_deref(), Some("Ada"));
        assert_eq!(update.skills.as_deref(), Some(["python".to_string()].as_slice()));
        assert_eq!(update.experience.as_ref().map(|e| e.len()), Some(1));
    }
}
