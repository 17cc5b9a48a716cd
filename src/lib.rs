// src/lib.rs
//! Terminal client for the JobSY job-matching service.
//!
//! The service owns matching, parsing, and persistence; this crate owns the
//! two pieces of client state (the session and the single pending-apply
//! record) and the listing logic between them. [`api`] talks to the remote
//! origin, [`session`] mirrors the signed-in user to disk, [`jobs`] holds the
//! recommendation-source state machine and the apply-confirmation protocol,
//! and [`commands`] exposes each screen as a subcommand.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod guard;
pub mod jobs;
pub mod session;
pub mod utils;

pub use error::{Error, Result};
