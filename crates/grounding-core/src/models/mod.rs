//! Data models for Grounding Sun

mod affirmation;
mod settings;

pub use affirmation::{
    decode_snapshot, encode_snapshot, Affirmation, FALLBACK_ID, FALLBACK_TEXT,
};
pub(crate) use settings::bool_str;
pub use settings::{
    default_reminder_time, AppTheme, ReminderSettings, REMINDER_ENABLED_KEY, REMINDER_HOUR_KEY,
    REMINDER_MINUTE_KEY,
};
