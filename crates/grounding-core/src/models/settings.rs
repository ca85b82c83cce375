//! User preference models

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::db::KeyValueStore;
use crate::error::{Error, Result};
use crate::reminders::{DEFAULT_DAYS_AHEAD, MAX_DAYS_AHEAD};

/// Storage key for the daily reminder toggle
pub const REMINDER_ENABLED_KEY: &str = "daily_reminder_enabled";
/// Storage key for the reminder hour (0-23)
pub const REMINDER_HOUR_KEY: &str = "daily_reminder_hour";
/// Storage key for the reminder minute (0-59)
pub const REMINDER_MINUTE_KEY: &str = "daily_reminder_minute";
/// Storage key for the number of days planned ahead
pub const REMINDER_DAYS_KEY: &str = "daily_reminder_days";

/// Default reminder time when none has been saved
pub const DEFAULT_REMINDER_HOUR: u32 = 9;

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppTheme {
    /// Soft peach and warm gold
    #[default]
    Light,
    /// Deep navy and muted plum
    Dark,
}

impl AppTheme {
    /// Lowercase name used for persistence and display
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for AppTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppTheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::InvalidInput(format!("unknown theme: {other}"))),
        }
    }
}

/// Daily reminder preferences
///
/// Every field is three-state: `None` means the user never chose a value,
/// which is distinct from an explicit `false` or a saved time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReminderSettings {
    /// Whether daily reminders are on
    pub enabled: Option<bool>,
    /// Time of day reminders fire at
    pub time: Option<NaiveTime>,
    /// Number of days planned ahead
    pub days: Option<u32>,
}

impl ReminderSettings {
    /// Whether reminders are on, treating unset as off
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    /// The reminder time, treating unset as 09:00
    #[must_use]
    pub fn effective_time(&self) -> NaiveTime {
        self.time.unwrap_or_else(default_reminder_time)
    }

    /// The planning window, treating unset as 14 days
    #[must_use]
    pub fn effective_days(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_DAYS_AHEAD)
    }

    /// Load reminder preferences from the store
    ///
    /// Unparseable values are treated as unset.
    pub fn load(store: &impl KeyValueStore) -> Result<Self> {
        let enabled = store.get_bool(REMINDER_ENABLED_KEY)?;

        let hour = store
            .get(REMINDER_HOUR_KEY)?
            .and_then(|value| value.trim().parse::<u32>().ok());
        let minute = store
            .get(REMINDER_MINUTE_KEY)?
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(0);
        let time = hour.and_then(|hour| NaiveTime::from_hms_opt(hour, minute, 0));
        let days = store
            .get(REMINDER_DAYS_KEY)?
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|days| (1..=MAX_DAYS_AHEAD).contains(days));

        Ok(Self {
            enabled,
            time,
            days,
        })
    }

    /// Save reminder preferences, removing keys for unset fields
    pub fn save(&self, store: &impl KeyValueStore) -> Result<()> {
        match self.enabled {
            Some(enabled) => store.set(REMINDER_ENABLED_KEY, bool_str(enabled))?,
            None => store.remove(REMINDER_ENABLED_KEY)?,
        }

        if let Some(time) = self.time {
            store.set(REMINDER_HOUR_KEY, &time.hour().to_string())?;
            store.set(REMINDER_MINUTE_KEY, &time.minute().to_string())?;
        } else {
            store.remove(REMINDER_HOUR_KEY)?;
            store.remove(REMINDER_MINUTE_KEY)?;
        }

        match self.days {
            Some(days) => store.set(REMINDER_DAYS_KEY, &days.to_string())?,
            None => store.remove(REMINDER_DAYS_KEY)?,
        }
        Ok(())
    }
}

/// 09:00, the reminder time used until the user picks one
#[must_use]
pub fn default_reminder_time() -> NaiveTime {
    NaiveTime::from_hms_opt(DEFAULT_REMINDER_HOUR, 0, 0).unwrap_or_default()
}

pub(crate) const fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
