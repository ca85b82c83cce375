//! Remote affirmation backend
//!
//! The backend does not exist yet. The source keeps its configuration so
//! callers can already be wired against it, but every fetch fails with
//! [`ApiError::NotImplemented`] and no request is sent.

use super::client::{AffirmationDto, AffirmationSource, ApiError};
use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

/// Base URL of the planned backend
pub const DEFAULT_API_BASE_URL: &str = "https://api.groundingsun.com";

/// Path the list endpoint will be served from
pub const AFFIRMATIONS_PATH: &str = "/affirmations";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAffirmationSource {
    base_url: String,
}

impl RemoteAffirmationSource {
    /// Create a source for `base_url`, which must be an http(s) URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = normalize_text_option(Some(base_url.into()))
            .ok_or_else(|| Error::InvalidInput("API base URL must not be empty".to_string()))?;
        if !is_http_url(&base_url) {
            return Err(Error::InvalidInput(format!(
                "API base URL must start with http:// or https://: {base_url}"
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL the list will be fetched from once the backend ships
    pub fn affirmations_url(&self) -> String {
        format!("{}{AFFIRMATIONS_PATH}", self.base_url)
    }
}

impl Default for RemoteAffirmationSource {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl AffirmationSource for RemoteAffirmationSource {
    async fn fetch_affirmations(&self) -> std::result::Result<Vec<AffirmationDto>, ApiError> {
        tracing::debug!(
            "Remote affirmations requested from {}, backend not available",
            self.affirmations_url()
        );
        Err(ApiError::NotImplemented)
    }
}
