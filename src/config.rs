// src/config.rs
//! Layered configuration: built-in defaults, an optional TOML file in the
//! state directory, then environment variables on top.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The production origin; override with `JOBSY_API_URL` or the config file.
pub const DEFAULT_API_BASE_URL: &str = "https://jobsy-backend.onrender.com";

const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session.json";
const PENDING_APPLY_FILE: &str = "pending-apply.json";
const LOG_FILE: &str = "jobsy.log";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub service: ServiceConfig,
}

/// Where client-owned state lives.
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub state_dir: PathBuf,
    pub session_path: PathBuf,
    pub pending_apply_path: PathBuf,
    pub log_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_base_url: String,
}

/// Optional overrides from `<state_dir>/config.toml`.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
}

impl ConfigManager {
    pub fn load() -> Result<Self> {
        let state_dir = resolve_state_dir(std::env::var("JOBSY_STATE_DIR").ok());
        let file = read_file_config(&state_dir.join(CONFIG_FILE))?;
        let api_base_url =
            resolve_api_base_url(std::env::var("JOBSY_API_URL").ok(), file.api_base_url);

        Ok(ConfigManager {
            environment: EnvironmentConfig {
                session_path: state_dir.join(SESSION_FILE),
                pending_apply_path: state_dir.join(PENDING_APPLY_FILE),
                log_path: state_dir.join(LOG_FILE),
                state_dir,
            },
            service: ServiceConfig { api_base_url },
        })
    }

    pub fn ensure_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.environment.state_dir)?;
        Ok(())
    }
}

fn resolve_state_dir(env_override: Option<String>) -> PathBuf {
    if let Some(dir) = env_override.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|d| d.join("jobsy"))
        .unwrap_or_else(|| PathBuf::from(".jobsy"))
}

fn resolve_api_base_url(env_override: Option<String>, file_value: Option<String>) -> String {
    env_override
        .filter(|u| !u.is_empty())
        .or(file_value)
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    match fs::read_to_string(path) {
        Ok(raw) => toml::from_str(&raw).map_err(|e| {
            Error::Validation(format!("invalid config file {}: {e}", path.display()))
        }),
        Err(_) => Ok(FileConfig::default()),
    }
}
