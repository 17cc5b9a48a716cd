// src/session/model.rs
use serde::{Deserialize, Serialize};

use crate::api::types::{EducationEntry, ExperienceEntry, ProfileUpdate};

/// The authenticated user's identity plus cached profile fields.
///
/// Created on login/registration, enriched by resume parsing and profile
/// fetches, destroyed on logout. The on-disk mirror holds exactly this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

impl Session {
    pub fn new(user_id: String, email: String) -> Self {
        Session {
            user_id,
            email,
            full_name: None,
            phone: None,
            skills: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
        }
    }

    /// Field-wise merge: fields absent from the update are kept as-is.
    pub fn merge(&mut self, update: ProfileUpdate) {
        if let Some(full_name) = update.full_name {
            self.full_name = Some(full_name);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(skills) = update.skills {
            self.skills = skills;
        }
        if let Some(experience) = update.experience {
            self.experience = experience;
        }
        if let Some(education) = update.education {
            self.education = education;
        }
    }
}
