//! The Cat API provider

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::{ImageStrategy, JsonSource};
use crate::error::FetchError;

/// One element of the search response
#[derive(Debug, Deserialize)]
struct CatImage {
    url: String,
}

/// Reads the first `url` from The Cat API's image search
pub struct CatStrategy {
    source: Arc<dyn JsonSource>,
    endpoint: String,
}

impl CatStrategy {
    pub fn new(source: Arc<dyn JsonSource>, endpoint: String) -> Self {
        Self { source, endpoint }
    }
}

#[async_trait]
impl ImageStrategy for CatStrategy {
    fn name(&self) -> &'static str {
        "cat"
    }

    async fn fetch_image_url(&self) -> Result<String, FetchError> {
        let payload = self.source.get_json(&self.endpoint).await?;

        let images: Vec<CatImage> = serde_json::from_value(payload)
            .map_err(|e| FetchError::provider("cat", format!("unexpected payload: {e}")))?;

        images
            .into_iter()
            .next()
            .map(|image| image.url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| FetchError::provider("cat", "response contained no image URL"))
    }
}
