//! changes: interactive review of a plan's pending file changes.
//!
//! Entry point for the `changes` binary. Loads the plan's pending paths from
//! the plan server, runs the review screen, and acts on how the review ended:
//! apply everything, report that everything was rejected, or fail with the
//! server's error.
//!
//! # Startup sequence
//!
//! 1. Parse CLI args, load config, set up file logging, all before terminal init.
//! 2. Fetch the plan snapshot. An empty plan prints "No changes pending" and
//!    the terminal is never touched.
//! 3. `install_panic_hook()`, `register_sigterm()`, `init_tui()`, then spawn
//!    the event task and run the review loop.
//! 4. `restore_tui()` at the single exit point of the loop, then the batch
//!    apply (if confirmed) and the final message on the restored terminal.
//!    A failed apply runs the optional `on_apply_fail` hook before exiting.

mod app;
mod client;
mod config;
mod event;
mod hook;
mod logging;
mod runner;
mod theme;
mod tui;
mod ui;

use changes_core::{
    conclude, PlanChangeSet, PlanProvider, PlanRef, ReviewError, ReviewOutcome, ReviewSession,
};
use clap::Parser;
use tracing::{error, info};

use crate::client::PlanClient;
use crate::theme::Theme;

/// Review, reject, or apply the pending changes of a plan.
#[derive(Debug, Parser)]
#[command(name = "changes", version)]
struct Cli {
    /// Plan identifier.
    #[arg(long)]
    plan: String,

    /// Plan branch.
    #[arg(long, default_value = "main")]
    branch: String,

    /// Plan server base URL (overrides `server_url` in the config file).
    #[arg(long)]
    server: Option<String>,

    /// Color theme: `dark` or `catppuccin-mocha` (overrides the config file).
    #[arg(long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    let config = config::load(&config::config_path());
    logging::init_logging(&config.log_path())?;

    let theme = Theme::from_name(cli.theme.as_deref().unwrap_or(&config.theme));
    let server_url = cli.server.unwrap_or_else(|| config.server_url.clone());
    let client = PlanClient::new(server_url, config.auth_token.clone());
    let plan = PlanRef::new(cli.plan, cli.branch);

    let change_set = match client.current_change_set(&plan).await {
        Ok(set) => set,
        Err(e) => {
            error!(error = %e, "could not load plan");
            eprintln!("Error loading plan: {e}");
            std::process::exit(1);
        }
    };

    let outcome = if change_set.is_empty() {
        ReviewOutcome::NothingPending
    } else {
        review(change_set, &client, &plan, &theme).await?
    };
    info!(?outcome, "review finished");

    match conclude(outcome, &client, &plan).await {
        Ok(report) => {
            if let Some(msg) = report.message() {
                println!("{msg}");
            }
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "review failed");
            eprintln!();
            eprintln!("{err}");
            if let (ReviewError::Apply(apply_err), Some(command)) = (&err, &config.on_apply_fail) {
                if let Err(e) = hook::run_apply_fail_hook(command, &plan, &apply_err.msg).await {
                    error!(error = %e, "could not start on_apply_fail hook");
                }
            }
            std::process::exit(1);
        }
    }
}

/// Runs the interactive review screen and returns how it ended.
///
/// `restore_tui()` is reached after the loop on every non-panic path, including
/// a draw error, which is returned only after the terminal is restored.
async fn review(
    change_set: PlanChangeSet,
    client: &PlanClient,
    plan: &PlanRef,
    theme: &Theme,
) -> std::io::Result<ReviewOutcome> {
    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    let mut state = app::AppState::new(ReviewSession::new(change_set), plan.clone());
    let result =
        runner::run_session(&mut terminal, &mut rx, &mut state, client, theme, &term_flag).await;

    tui::restore_tui()?;
    result?;
    Ok(state.into_outcome())
}
