// src/commands/upload.rs
use std::path::Path;

use crate::api::ApiClient;
use crate::session::{Session, SessionStore};

/// Send a resume for server-side parsing and merge the parsed fields into
/// the session. `upload` and `reupload` share this flow.
pub async fn run(
    api: &ApiClient,
    store: &SessionStore,
    session: Session,
    file: &Path,
    reupload: bool,
) -> anyhow::Result<()> {
    if reupload {
        println!("Replacing the resume on file with {}…", file.display());
    } else {
        println!("Analyzing {}…", file.display());
    }

    match api.parse_resume(file, &session.user_id).await {
        Ok(res) => {
            store.merge(res.parsed_data)?;
            println!("✓ Resume analyzed and profile updated.");
            println!("  View it with `jobsy profile`");
        }
        Err(e) => println!("✗ {e}"),
    }
    Ok(())
}
