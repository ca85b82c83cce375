use crate::commands::common::{format_affirmation_lines, Context};
use crate::error::CliError;

pub async fn run_list(context: Context, as_json: bool) -> Result<(), CliError> {
    let repository = context.open_repository().await?;
    let affirmations = repository.affirmations();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&affirmations)?);
    } else if affirmations.is_empty() {
        println!("No affirmations available.");
    } else {
        for line in format_affirmation_lines(&affirmations) {
            println!("{line}");
        }
    }

    Ok(())
}
