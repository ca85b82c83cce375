//! grounding-core - Core library for Grounding Sun
//!
//! This crate contains the models, key-value persistence, affirmation sources,
//! and the daily assignment logic shared by every Grounding Sun interface.

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod reminders;
pub mod repository;
pub mod theme;
pub mod util;

pub use error::{Error, Result};
pub use models::{Affirmation, AppTheme};
pub use repository::{AffirmationRepository, RepositoryState};
