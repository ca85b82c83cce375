//! Contract for affirmation data sources

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Affirmation;

/// Affirmation as delivered by a source
///
/// Unknown fields are ignored on decode and never reach [`Affirmation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffirmationDto {
    pub id: String,
    pub text: String,
}

impl AffirmationDto {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

impl From<AffirmationDto> for Affirmation {
    fn from(dto: AffirmationDto) -> Self {
        Self {
            id: dto.id,
            text: dto.text,
        }
    }
}

/// Errors returned by affirmation sources
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The source has no backend yet
    #[error("This feature is not yet available.")]
    NotImplemented,

    /// Transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Response could not be decoded
    #[error("Data error: {0}")]
    Decoding(String),
}

/// A source of affirmations (async)
#[allow(async_fn_in_trait)]
pub trait AffirmationSource {
    /// Fetch the full ordered list of affirmations
    async fn fetch_affirmations(&self) -> Result<Vec<AffirmationDto>, ApiError>;
}

impl<T: AffirmationSource> AffirmationSource for &T {
    async fn fetch_affirmations(&self) -> Result<Vec<AffirmationDto>, ApiError> {
        (**self).fetch_affirmations().await
    }
}
