use grounding_core::db::KeyValueStore;
use grounding_core::theme::{current_hour, ThemeController};
use grounding_core::AppTheme;

use crate::cli::ThemeCommands;
use crate::commands::common::Context;
use crate::error::CliError;

pub fn run_theme(context: &Context, command: Option<ThemeCommands>) -> Result<(), CliError> {
    let db = context.open_database()?;
    let controller = apply_theme_command(db, command.unwrap_or(ThemeCommands::Show), current_hour())?;
    println!("{}", describe_theme(&controller));
    Ok(())
}

pub fn apply_theme_command<S: KeyValueStore>(
    store: S,
    command: ThemeCommands,
    hour: u32,
) -> Result<ThemeController<S>, CliError> {
    let mut controller = ThemeController::load(store, hour)?;
    match command {
        ThemeCommands::Show => {}
        ThemeCommands::Light => controller.set_manual_theme(AppTheme::Light)?,
        ThemeCommands::Dark => controller.set_manual_theme(AppTheme::Dark)?,
        ThemeCommands::Auto => controller.enable_auto_theme(hour)?,
    }
    Ok(controller)
}

pub fn describe_theme<S: KeyValueStore>(controller: &ThemeController<S>) -> String {
    let mode = if controller.auto_theme_enabled() {
        "follows time of day"
    } else {
        "manual"
    };
    format!("{} ({mode})", controller.current_theme())
}
