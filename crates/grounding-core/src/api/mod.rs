//! Affirmation sources

mod client;
mod remote;
mod static_source;

pub use client::{AffirmationDto, AffirmationSource, ApiError};
pub use remote::{RemoteAffirmationSource, AFFIRMATIONS_PATH, DEFAULT_API_BASE_URL};
pub use static_source::{StaticAffirmationSource, DEFAULT_STATIC_DELAY, STATIC_AFFIRMATIONS};
