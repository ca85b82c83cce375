use crate::commands::common::{render_affirmation, resolve_date, Context};
use crate::error::CliError;

pub async fn run_reroll(context: Context, date: Option<&str>, as_json: bool) -> Result<(), CliError> {
    let date = resolve_date(date)?;
    let repository = context.open_repository().await?;

    let affirmation = repository.reroll(date);
    tracing::debug!("Rerolled {date} to affirmation {}", affirmation.id);
    println!("{}", render_affirmation(date, &affirmation, as_json)?);
    Ok(())
}
