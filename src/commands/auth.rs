// src/commands/auth.rs
use tracing::info;

use crate::api::ApiClient;
use crate::session::SessionStore;

pub async fn register(
    api: &ApiClient,
    store: &SessionStore,
    full_name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    match api.register(full_name, email, password).await {
        Ok(res) => {
            info!(user_id = %res.user_id, "registered");
            store.login(res.user_id, email.to_string())?;
            println!("✓ Account created for {email}.");
            println!("  Next: upload your resume with `jobsy upload <file>`");
        }
        Err(e) => println!("✗ {e}"),
    }
    Ok(())
}

pub async fn login(
    api: &ApiClient,
    store: &SessionStore,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    match api.login(email, password).await {
        Ok(res) => {
            info!(user_id = %res.user_id, resume_uploaded = res.resume_uploaded, "signed in");
            let resume_uploaded = res.resume_uploaded;
            store.login(res.user_id, email.to_string())?;
            println!("✓ Signed in as {email}.");
            if resume_uploaded {
                println!("  Browse jobs with `jobsy jobs`");
            } else {
                println!("  No resume on file yet — upload one with `jobsy upload <file>`");
            }
        }
        Err(e) => println!("✗ {e}"),
    }
    Ok(())
}

pub fn logout(store: &SessionStore) -> anyhow::Result<()> {
    store.logout()?;
    println!("✓ Signed out.");
    Ok(())
}
