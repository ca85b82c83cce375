use std::env;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use grounding_core::api::{
    AffirmationDto, AffirmationSource, ApiError, RemoteAffirmationSource, StaticAffirmationSource,
};
use grounding_core::db::{run_app_migrations, Database};
use grounding_core::util::{local_today, normalize_text_option, parse_date_key};
use grounding_core::{Affirmation, AffirmationRepository};
use serde::Serialize;

use crate::cli::{Cli, SourceKind};
use crate::error::CliError;

pub type Repository = AffirmationRepository<CliSource, Database>;

/// Affirmation source chosen on the command line
pub enum CliSource {
    Static(StaticAffirmationSource),
    Remote(RemoteAffirmationSource),
}

impl AffirmationSource for CliSource {
    async fn fetch_affirmations(&self) -> Result<Vec<AffirmationDto>, ApiError> {
        match self {
            Self::Static(source) => source.fetch_affirmations().await,
            Self::Remote(source) => source.fetch_affirmations().await,
        }
    }
}

/// Resolved global options shared by every command
pub struct Context {
    pub db_path: PathBuf,
    pub source: CliSource,
    pub offline: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        Ok(Self {
            db_path: resolve_db_path(cli.db_path.clone()),
            source: build_source(cli.source)?,
            offline: cli.offline,
        })
    }

    pub fn open_database(&self) -> Result<Database, CliError> {
        let db = Database::open(&self.db_path)?;
        run_app_migrations(&db)?;
        Ok(db)
    }

    /// Open the repository and refresh it unless running offline
    ///
    /// A failed refresh is reported on stderr; the cached list stays usable.
    pub async fn open_repository(self) -> Result<Repository, CliError> {
        let db = self.open_database()?;
        let repository = AffirmationRepository::new(self.source, db);

        if !self.offline {
            repository.fetch_affirmations().await;
            if let Some(error) = repository.error() {
                let fallback = if repository.affirmations().is_empty() {
                    "no cached affirmations"
                } else {
                    "using cached affirmations"
                };
                eprintln!("Could not refresh affirmations ({fallback}): {error}");
            }
        }

        Ok(repository)
    }
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("GROUNDING_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("grounding-sun")
        .join("grounding.db")
}

fn build_source(kind: SourceKind) -> Result<CliSource, CliError> {
    match kind {
        SourceKind::Static => Ok(CliSource::Static(StaticAffirmationSource::new())),
        SourceKind::Remote => {
            let source = match normalize_text_option(env::var("GROUNDING_API_BASE_URL").ok()) {
                Some(url) => RemoteAffirmationSource::new(url)
                    .map_err(|error| CliError::Config(error.to_string()))?,
                None => RemoteAffirmationSource::default(),
            };
            Ok(CliSource::Remote(source))
        }
    }
}

/// Parse a `--date` argument, defaulting to today in the local timezone
pub fn resolve_date(value: Option<&str>) -> Result<NaiveDate, CliError> {
    match value {
        Some(raw) => parse_date_key(raw).ok_or_else(|| CliError::InvalidDate(raw.to_string())),
        None => Ok(local_today()),
    }
}

pub fn parse_reminder_time(value: &str) -> Result<NaiveTime, CliError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| CliError::InvalidTime(value.to_string()))
}

#[derive(Debug, Serialize)]
pub struct AffirmationItem {
    pub date: String,
    pub id: String,
    pub text: String,
}

pub fn render_affirmation(
    date: NaiveDate,
    affirmation: &Affirmation,
    as_json: bool,
) -> Result<String, CliError> {
    if as_json {
        let item = AffirmationItem {
            date: grounding_core::util::date_key(date),
            id: affirmation.id.clone(),
            text: affirmation.text.clone(),
        };
        return Ok(serde_json::to_string_pretty(&item)?);
    }

    Ok(format!("{}  {}", date.format("%a %b %-d"), affirmation.text))
}

pub fn format_affirmation_lines(affirmations: &[Affirmation]) -> Vec<String> {
    let width = affirmations
        .iter()
        .map(|affirmation| affirmation.id.chars().count())
        .max()
        .unwrap_or(0);

    affirmations
        .iter()
        .map(|affirmation| format!("{:>width$}  {}", affirmation.id, affirmation.text))
        .collect()
}
