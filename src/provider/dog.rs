//! random.dog provider
//!
//! random.dog serves videos and animations alongside photos, so the
//! strategy keeps asking until it gets a still image or runs out of
//! attempts.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::{ImageStrategy, JsonSource};
use crate::error::FetchError;
use crate::metrics::DOG_REJECTED_URLS_TOTAL;

/// Upper bound on upstream calls per fetch
pub const MAX_DOG_ATTEMPTS: u32 = 10;

/// Accepted path suffixes (case-sensitive)
const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

#[derive(Debug, Deserialize)]
struct DogImage {
    url: String,
}

/// Whether a URL's path ends in one of the accepted image extensions
///
/// Unparseable URLs are not images.
pub fn is_image_url(raw: &str) -> bool {
    url::Url::parse(raw)
        .map(|parsed| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|extension| parsed.path().ends_with(extension))
        })
        .unwrap_or(false)
}

/// Polls random.dog until it returns a still image
pub struct DogStrategy {
    source: Arc<dyn JsonSource>,
    endpoint: String,
}

impl DogStrategy {
    pub fn new(source: Arc<dyn JsonSource>, endpoint: String) -> Self {
        Self { source, endpoint }
    }
}

#[async_trait]
impl ImageStrategy for DogStrategy {
    fn name(&self) -> &'static str {
        "dog"
    }

    /// # Errors
    /// - `Provider` as soon as any attempt fails to reach or parse the
    ///   upstream; remaining attempts are not used
    /// - `RetryExhausted` after `MAX_DOG_ATTEMPTS` non-image URLs
    async fn fetch_image_url(&self) -> Result<String, FetchError> {
        for attempt in 1..=MAX_DOG_ATTEMPTS {
            let payload = self.source.get_json(&self.endpoint).await?;

            let DogImage { url } = serde_json::from_value(payload)
                .map_err(|e| FetchError::provider("dog", format!("unexpected payload: {e}")))?;

            if is_image_url(&url) {
                tracing::debug!(attempt, %url, "Accepted dog image");
                return Ok(url);
            }

            DOG_REJECTED_URLS_TOTAL.inc();
            tracing::debug!(attempt, %url, "Skipping non-image dog media");
        }

        Err(FetchError::RetryExhausted {
            attempts: MAX_DOG_ATTEMPTS,
        })
    }
}
