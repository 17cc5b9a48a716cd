// src/cli.rs
//! Top-level commands, one per route. Everything past the entry commands
//! sits behind the route guard.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::commands;
use crate::config::ConfigManager;
use crate::guard;
use crate::session::{Session, SessionStore};

#[derive(Parser)]
#[command(name = "jobsy")]
#[command(about = "Terminal client for the JobSY job-matching service", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in with an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show your profile
    Profile,
    /// Upload a resume for analysis
    Upload { file: PathBuf },
    /// Replace the resume on file
    Reupload { file: PathBuf },
    /// Browse and apply to jobs
    Jobs,
}

pub async fn dispatch(cli: Cli, config: &ConfigManager) -> anyhow::Result<()> {
    let store = SessionStore::load(config.environment.session_path.clone());
    let api = Arc::new(ApiClient::new(config.service.api_base_url.clone()));

    match cli.command {
        Command::Register {
            full_name,
            email,
            password,
        } => commands::auth::register(&api, &store, &full_name, &email, &password).await,
        Command::Login { email, password } => {
            commands::auth::login(&api, &store, &email, &password).await
        }
        Command::Logout => commands::auth::logout(&store),
        Command::Profile => match guarded(&store) {
            Some(session) => commands::profile::show(&api, &store, session).await,
            None => Ok(()),
        },
        Command::Upload { file } => match guarded(&store) {
            Some(session) => commands::upload::run(&api, &store, session, &file, false).await,
            None => Ok(()),
        },
        Command::Reupload { file } => match guarded(&store) {
            Some(session) => commands::upload::run(&api, &store, session, &file, true).await,
            None => Ok(()),
        },
        Command::Jobs => match guarded(&store) {
            Some(session) => commands::jobs::browse(api, session, config).await,
            None => Ok(()),
        },
    }
}

/// The route guard, applied at dispatch: with no session the user is sent
/// back to the entry flow instead of the command running.
fn guarded(store: &SessionStore) -> Option<Session> {
    match guard::require_session(store) {
        Ok(session) => Some(session),
        Err(_) => {
            println!("You're signed out. Run `jobsy login` (or `jobsy register`) first.");
            None
        }
    }
}
