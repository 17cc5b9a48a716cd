// src/commands/jobs.rs
//! Interactive job browser: the jobs page as a line-driven loop.
//!
//! Lifecycle signals arrive over the event bus: `PageEnter` when the browser
//! starts, `FocusRegained` when the user's attention returns (an empty line
//! or an explicit `refresh`). Both trigger the pending-apply check, so an
//! application started in a previous run is picked up here.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::api::types::Job;
use crate::api::ApiClient;
use crate::config::ConfigManager;
use crate::events::{EventBus, UiEvent};
use crate::jobs::{JobListingController, PendingApplySlot, SourceKind, Tab};
use crate::session::Session;
use crate::utils::truncate;

/// Role tags offered for one-tap filtering on the jobs view.
pub const PREDEFINED_ROLES: &[&str] = &[
    "Python Developer",
    "ML Engineer",
    "Frontend Developer",
    "Backend Developer",
    "Full Stack Developer",
    "Data Analyst",
    "DevOps Engineer",
];

pub async fn browse(
    api: Arc<ApiClient>,
    session: Session,
    config: &ConfigManager,
) -> anyhow::Result<()> {
    let bus = EventBus::new();
    let mut events = bus.subscribe();
    let slot = PendingApplySlot::open(config.environment.pending_apply_path.clone());
    let mut ctl = JobListingController::new(api.clone(), session.user_id.clone());

    println!("Loading jobs…");
    ctl.load().await;
    bus.emit(UiEvent::PageEnter);

    render(&ctl);
    println!("Type `help` for commands.");

    loop {
        // Deliver queued lifecycle signals before taking the next command.
        let mut recheck = false;
        while let Ok(event) = events.try_recv() {
            match event {
                UiEvent::PageEnter | UiEvent::FocusRegained => recheck = true,
            }
        }
        if recheck {
            check_pending(&slot, &mut ctl, &api, &session).await?;
        }

        print!("jobs> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();

        if line.is_empty() {
            // Enter with no command = attention came back to the terminal.
            bus.emit(UiEvent::FocusRegained);
            continue;
        }

        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "help" | "h" => print_help(),
            "list" | "l" => render(&ctl),
            "tab" | "t" => {
                match rest {
                    "recommended" | "r" => ctl.tab = Tab::Recommended,
                    "applied" | "a" => ctl.tab = Tab::Applied,
                    _ => {
                        println!("Usage: tab recommended|applied");
                        continue;
                    }
                }
                render(&ctl);
            }
            "roles" => print_roles(&ctl),
            "role" | "r" => {
                let Some(role) = resolve_role(rest) else {
                    println!("Unknown role {rest:?} — see `roles`, or use `search` for free text.");
                    continue;
                };
                ctl.toggle_role(role).await;
                render(&ctl);
            }
            "search" | "s" => {
                if rest.is_empty() {
                    println!("Usage: search <role> [@ <location>]");
                    continue;
                }
                let (role, location) = match rest.split_once('@') {
                    Some((role, location)) => (role.trim(), Some(location.trim())),
                    None => (rest, None),
                };
                ctl.search(role, location).await;
                render(&ctl);
            }
            "clear" => {
                ctl.clear_search();
                render(&ctl);
            }
            "all" => {
                ctl.load_all().await;
                render(&ctl);
            }
            "apply" | "a" => {
                let Ok(n) = rest.parse::<usize>() else {
                    println!("Usage: apply <number from the recommended list>");
                    continue;
                };
                start_apply(&slot, &mut ctl, &api, &session, n).await?;
            }
            "refresh" => {
                ctl.refresh().await;
                bus.emit(UiEvent::FocusRegained);
                render(&ctl);
            }
            "quit" | "q" | "exit" => break,
            _ => println!("Unknown command {cmd:?} — type `help`."),
        }
    }

    Ok(())
}

/// Begin the apply flow for the n-th (1-based) recommended job. Jobs with an
/// external link go through the pending-apply handoff; jobs without one are
/// marked applied directly.
async fn start_apply(
    slot: &PendingApplySlot,
    ctl: &mut JobListingController,
    api: &ApiClient,
    session: &Session,
    n: usize,
) -> anyhow::Result<()> {
    let job = match ctl.recommended_view().get(n.wrapping_sub(1)) {
        Some(job) => (*job).clone(),
        None => {
            println!("No job #{n} in the recommended list.");
            return Ok(());
        }
    };

    match &job.link {
        Some(link) => {
            let link = link.clone();
            let record = slot.begin(job)?;
            println!("Open the employer's application page:");
            println!("  {link}");
            println!(
                "When you're back, press Enter to record whether you applied to \"{}\".",
                record.job.title
            );
        }
        None => match api.apply_job(&session.user_id, &job.id).await {
            Ok(_) => {
                println!("✓ Marked as applied: {} at {}", job.title, job.company);
                ctl.refresh().await;
                render(ctl);
            }
            Err(e) => println!("✗ {e}"),
        },
    }
    Ok(())
}

/// The confirmation prompt for an unconfirmed pending record. Confirming
/// consumes the record first, then calls the apply endpoint once and
/// refreshes the affected lists; cancelling just discards it.
async fn check_pending(
    slot: &PendingApplySlot,
    ctl: &mut JobListingController,
    api: &ApiClient,
    session: &Session,
) -> anyhow::Result<()> {
    let Some(record) = slot.pending() else {
        return Ok(());
    };

    print!(
        "Did you apply to \"{}\" at {}? [y/N] ",
        record.job.title, record.job.company
    );
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    if answer.trim().eq_ignore_ascii_case("y") {
        if let Some(job) = slot.confirm() {
            match api.apply_job(&session.user_id, &job.id).await {
                Ok(_) => {
                    println!("✓ Recorded your application to {}.", job.title);
                    ctl.refresh().await;
                    render(ctl);
                }
                Err(e) => println!("✗ Could not record the application: {e}"),
            }
        }
    } else {
        slot.cancel();
        println!("Okay — not recorded as an application.");
    }
    Ok(())
}

fn resolve_role(input: &str) -> Option<&'static str> {
    if let Ok(n) = input.parse::<usize>() {
        return PREDEFINED_ROLES.get(n.wrapping_sub(1)).copied();
    }
    PREDEFINED_ROLES
        .iter()
        .find(|r| r.eq_ignore_ascii_case(input))
        .copied()
}

fn render(ctl: &JobListingController) {
    let recommended = ctl.recommended_view();
    let applied = ctl.applied_view();

    println!();
    match ctl.tab {
        Tab::Recommended => println!(
            "[Recommended ({})]  Applied ({})",
            recommended.len(),
            applied.len()
        ),
        Tab::Applied => println!(
            " Recommended ({})  [Applied ({})]",
            recommended.len(),
            applied.len()
        ),
    }
    match ctl.source_kind() {
        SourceKind::Default => {}
        SourceKind::RoleSelected => {
            println!("Roles: {}", ctl.selected_roles().join(", "));
        }
        SourceKind::CustomSearch => {
            if let Some(search) = ctl.custom_search() {
                match &search.location {
                    Some(location) => {
                        println!("Search: {} in {location}", search.job_role)
                    }
                    None => println!("Search: {}", search.job_role),
                }
            }
        }
    }

    match ctl.tab {
        Tab::Recommended => {
            if recommended.is_empty() {
                println!("No recommended jobs available.");
                return;
            }
            for (i, job) in recommended.iter().enumerate() {
                print_job(i + 1, job);
            }
        }
        Tab::Applied => {
            if applied.is_empty() {
                println!("You haven't applied to any jobs yet.");
                return;
            }
            for (i, job) in applied.iter().enumerate() {
                print_job(i + 1, job);
            }
        }
    }
}

fn print_job(n: usize, job: &Job) {
    let mut headline = format!("{n:>2}. {} — {}", job.title, job.company);
    if let Some(score) = job.score {
        headline.push_str(&format!("  (match score {score:.2})"));
    }
    if job.applied {
        headline.push_str("  ✓ applied");
    }
    println!("{headline}");
    if !job.matching_skills.is_empty() {
        println!("      matches: {}", job.matching_skills.join(", "));
    }
    if let Some(exp) = &job.experience_required {
        println!("      experience: {exp}");
    }
    if let Some(desc) = &job.description {
        println!("      {}", truncate(desc, 100));
    }
}

fn print_roles(ctl: &JobListingController) {
    println!("Predefined roles (toggle with `role <n>`):");
    for (i, role) in PREDEFINED_ROLES.iter().enumerate() {
        let mark = if ctl.selected_roles().iter().any(|r| r == role) {
            "x"
        } else {
            " "
        };
        println!("  [{mark}] {}. {role}", i + 1);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  list              show the active tab");
    println!("  tab <r|a>         switch between recommended and applied");
    println!("  roles             list predefined role filters");
    println!("  role <n|name>     toggle a predefined role filter");
    println!("  search <role> [@ <location>]   free-text search (replaces filters)");
    println!("  clear             leave search mode, restore previous view");
    println!("  all               reload everything via the all-jobs endpoint");
    println!("  apply <n>         apply to the n-th recommended job");
    println!("  refresh           refetch the current lists");
    println!("  quit              leave the browser");
    println!("An empty line re-checks for an application you started elsewhere.");
}
