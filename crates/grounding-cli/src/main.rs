//! Grounding Sun CLI - one grounding affirmation per day
//!
//! Shows the day's affirmation, rerolls it, and manages theme and reminder
//! preferences stored in the local database.

mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::common::Context;
use crate::commands::completions::run_completions;
use crate::commands::list::run_list;
use crate::commands::reminders::run_reminders;
use crate::commands::reroll::run_reroll;
use crate::commands::theme::run_theme;
use crate::commands::today::run_today;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("grounding=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let context = Context::from_cli(&cli)?;

    match cli.command {
        None => run_today(context, None, false).await?,
        Some(Commands::Today { date, json }) => run_today(context, date.as_deref(), json).await?,
        Some(Commands::Reroll { date, json }) => {
            run_reroll(context, date.as_deref(), json).await?;
        }
        Some(Commands::List { json }) => run_list(context, json).await?,
        Some(Commands::Theme { command }) => run_theme(&context, command)?,
        Some(Commands::Reminders { command }) => run_reminders(context, command).await?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
