//! Time-of-day theme selection with manual override

use std::ops::RangeInclusive;

use chrono::{Local, Timelike};

use crate::db::KeyValueStore;
use crate::error::Result;
use crate::models::{bool_str, AppTheme};

/// Hours treated as daytime for the automatic theme (6 AM through 6 PM)
pub const DAY_HOURS: RangeInclusive<u32> = 6..=18;

/// Store key of the automatic theme toggle
pub const AUTO_THEME_KEY: &str = "auto_theme_enabled";

/// Store key of the manually chosen theme
pub const MANUAL_THEME_KEY: &str = "manual_theme";

/// Theme for an hour of the day (0-23)
#[must_use]
pub fn theme_for_hour(hour: u32) -> AppTheme {
    if DAY_HOURS.contains(&hour) {
        AppTheme::Light
    } else {
        AppTheme::Dark
    }
}

/// Current local hour
#[must_use]
pub fn current_hour() -> u32 {
    Local::now().hour()
}

/// Tracks the active theme and persists the user's override
pub struct ThemeController<S> {
    store: S,
    current: AppTheme,
    auto_enabled: bool,
}

impl<S: KeyValueStore> ThemeController<S> {
    /// Restore the controller from persisted preferences
    ///
    /// Automatic mode is on unless the user explicitly turned it off; a
    /// missing manual theme falls back to light.
    pub fn load(store: S, hour: u32) -> Result<Self> {
        let auto_enabled = store.get_bool(AUTO_THEME_KEY)?.unwrap_or(true);

        let current = if auto_enabled {
            theme_for_hour(hour)
        } else {
            store
                .get(MANUAL_THEME_KEY)?
                .and_then(|value| value.parse().ok())
                .unwrap_or_default()
        };

        Ok(Self {
            store,
            current,
            auto_enabled,
        })
    }

    pub const fn current_theme(&self) -> AppTheme {
        self.current
    }

    pub const fn auto_theme_enabled(&self) -> bool {
        self.auto_enabled
    }

    /// Re-evaluate the automatic theme; returns `true` if the theme changed
    pub fn update_for_hour(&mut self, hour: u32) -> bool {
        if !self.auto_enabled {
            return false;
        }

        let theme = theme_for_hour(hour);
        if theme == self.current {
            return false;
        }
        tracing::debug!("Switching theme from {} to {theme}", self.current);
        self.current = theme;
        true
    }

    /// Pin a theme, turning automatic mode off
    pub fn set_manual_theme(&mut self, theme: AppTheme) -> Result<()> {
        self.store.set(AUTO_THEME_KEY, bool_str(false))?;
        self.store.set(MANUAL_THEME_KEY, theme.as_str())?;
        self.auto_enabled = false;
        self.current = theme;
        Ok(())
    }

    /// Turn automatic mode back on and apply it for `hour`
    pub fn enable_auto_theme(&mut self, hour: u32) -> Result<()> {
        self.store.set(AUTO_THEME_KEY, bool_str(true))?;
        self.auto_enabled = true;
        self.update_for_hour(hour);
        Ok(())
    }
}
