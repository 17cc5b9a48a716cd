// src/api/mod.rs
//! Gateway to the remote JobSY service.

pub mod client;
pub mod types;

pub use client::{ApiClient, ProfileQuery};
pub use types::Job;
