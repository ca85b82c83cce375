use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "grounding")]
#[command(about = "One grounding affirmation per day, from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Where affirmations are fetched from
    #[arg(long, global = true, value_enum, default_value_t = SourceKind::Static)]
    pub source: SourceKind,

    /// Skip refreshing affirmations and use the cached list only
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the affirmation assigned to a day (default: today)
    Today {
        /// Day to show, as YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace a day's affirmation with a new random pick
    Reroll {
        /// Day to reroll, as YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every available affirmation
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change the color theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
    /// Manage daily reminders
    Reminders {
        #[command(subcommand)]
        command: Option<ReminderCommands>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SourceKind {
    /// Bundled list
    Static,
    /// Remote backend
    Remote,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Subcommand)]
pub enum ThemeCommands {
    /// Show the active theme
    Show,
    /// Always use the light theme
    Light,
    /// Always use the dark theme
    Dark,
    /// Follow the time of day
    Auto,
}

#[derive(Clone, Debug, Eq, PartialEq, Subcommand)]
pub enum ReminderCommands {
    /// Show reminder settings and upcoming reminders
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Turn daily reminders on
    Enable {
        /// Reminder time, as HH:MM (24-hour)
        #[arg(long, value_name = "HH:MM")]
        time: Option<String>,
        /// Number of days to plan ahead (kept for later runs)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=64))]
        days: Option<u32>,
    },
    /// Turn daily reminders off
    Disable,
}
