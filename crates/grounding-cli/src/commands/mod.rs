pub mod common;
pub mod completions;
pub mod list;
pub mod reminders;
pub mod reroll;
pub mod theme;
pub mod today;
