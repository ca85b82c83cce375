use chrono::{NaiveDateTime, NaiveTime};
use grounding_core::db::KeyValueStore;
use grounding_core::models::ReminderSettings;
use grounding_core::reminders::{
    first_reminder_date, InMemoryNotificationCenter, ReminderRequest, ReminderScheduler,
};
use grounding_core::util::local_now;
use serde::Serialize;

use crate::cli::ReminderCommands;
use crate::commands::common::{parse_reminder_time, Context, Repository};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ReminderStatus {
    pub enabled: bool,
    pub time: String,
    pub days: u32,
    pub upcoming: Vec<ReminderRequest>,
}

pub async fn run_reminders(
    context: Context,
    command: Option<ReminderCommands>,
) -> Result<(), CliError> {
    match command.unwrap_or(ReminderCommands::Status { json: false }) {
        ReminderCommands::Status { json } => run_status(context, json).await,
        ReminderCommands::Enable { time, days } => {
            run_enable(context, time.as_deref(), days).await
        }
        ReminderCommands::Disable => run_disable(&context),
    }
}

async fn run_status(context: Context, as_json: bool) -> Result<(), CliError> {
    let repository = context.open_repository().await?;
    let status = reminder_status(&repository, local_now()).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    if !status.enabled {
        println!("Daily reminders are off.");
        return Ok(());
    }

    println!(
        "Daily reminders at {}, planned {} days ahead:",
        status.time, status.days
    );
    for line in format_reminder_lines(&status.upcoming) {
        println!("{line}");
    }
    Ok(())
}

async fn run_enable(
    context: Context,
    time: Option<&str>,
    days: Option<u32>,
) -> Result<(), CliError> {
    let time = time.map(parse_reminder_time).transpose()?;
    let repository = context.open_repository().await?;
    let settings = enable_reminders(repository.store(), time, days)?;

    let status = reminder_status(&repository, local_now()).await?;
    println!(
        "Daily reminders enabled at {}.",
        settings.effective_time().format("%H:%M")
    );
    for line in format_reminder_lines(&status.upcoming) {
        println!("{line}");
    }
    Ok(())
}

fn run_disable(context: &Context) -> Result<(), CliError> {
    let db = context.open_database()?;
    disable_reminders(&db)?;
    println!("Daily reminders disabled.");
    Ok(())
}

/// Turn reminders on, keeping the saved time and window unless new ones are given
pub fn enable_reminders(
    store: &impl KeyValueStore,
    time: Option<NaiveTime>,
    days: Option<u32>,
) -> Result<ReminderSettings, CliError> {
    let mut settings = ReminderSettings::load(store)?;
    settings.enabled = Some(true);
    if time.is_some() {
        settings.time = time;
    }
    if days.is_some() {
        settings.days = days;
    }
    settings.save(store)?;
    Ok(settings)
}

pub fn disable_reminders(store: &impl KeyValueStore) -> Result<ReminderSettings, CliError> {
    let mut settings = ReminderSettings::load(store)?;
    settings.enabled = Some(false);
    settings.save(store)?;
    Ok(settings)
}

/// Plan the reminder window from saved settings
///
/// The window opens on the first day whose reminder is still ahead of `now`.
pub async fn reminder_status(
    repository: &Repository,
    now: NaiveDateTime,
) -> Result<ReminderStatus, CliError> {
    let settings = ReminderSettings::load(repository.store())?;
    let center = InMemoryNotificationCenter::new();
    let start = first_reminder_date(now, settings.effective_time());

    ReminderScheduler::new()
        .with_days_ahead(settings.effective_days())
        .apply_settings(&settings, repository, &center, start)
        .await?;

    Ok(ReminderStatus {
        enabled: settings.is_enabled(),
        time: settings.effective_time().format("%H:%M").to_string(),
        days: settings.effective_days(),
        upcoming: center.pending()?,
    })
}

pub fn format_reminder_lines(requests: &[ReminderRequest]) -> Vec<String> {
    requests
        .iter()
        .map(|request| {
            format!(
                "{}  {}",
                request.fire_at.format("%a %b %-d %H:%M"),
                request.body
            )
        })
        .collect()
}
