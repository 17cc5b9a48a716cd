// src/commands/profile.rs
use crate::api::types::ProfileUpdate;
use crate::api::{ApiClient, ProfileQuery};
use crate::session::{Session, SessionStore};

/// Fetch the full profile, merge it into the session, render it. If the
/// fetch fails, render the cached session fields instead.
pub async fn show(api: &ApiClient, store: &SessionStore, session: Session) -> anyhow::Result<()> {
    let session = match api.fetch_profile(ProfileQuery::ByEmail(&session.email)).await {
        Ok(profile) => store.merge(ProfileUpdate::from(profile))?,
        Err(e) => {
            println!("✗ Could not refresh profile: {e}");
            session
        }
    };
    render(&session);
    Ok(())
}

fn render(session: &Session) {
    println!("Profile Information");
    println!("  Full name:    {}", session.full_name.as_deref().unwrap_or("N/A"));
    println!("  Phone number: {}", session.phone.as_deref().unwrap_or("Not provided"));
    println!("  Email:        {}", session.email);

    if session.skills.is_empty() {
        println!("  Skills:       No skills found");
    } else {
        println!("  Skills:       {}", session.skills.join(", "));
    }

    if session.experience.is_empty() {
        println!("  Experience:   No experience found");
    } else {
        println!("  Experience:");
        for exp in &session.experience {
            println!(
                "    {} at {} ({})",
                exp.position.as_deref().unwrap_or("—"),
                exp.company.as_deref().unwrap_or("—"),
                exp.duration.as_deref().unwrap_or("—"),
            );
        }
    }

    if session.education.is_empty() {
        println!("  Education:    No education found");
    } else {
        println!("  Education:");
        for ed in &session.education {
            println!(
                "    {} — {} ({})",
                ed.degree.as_deref().unwrap_or("—"),
                ed.institution.as_deref().unwrap_or("—"),
                ed.year.as_deref().unwrap_or("—"),
            );
        }
    }
}
