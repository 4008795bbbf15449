//! Image providers
//!
//! One `ImageStrategy` per animal type, selected by the `ImageDispatcher`.
//!
//! - `cat`: The Cat API, first element of a JSON array
//! - `dog`: random.dog, retried until an image (not a video) comes back
//! - `bear`: PlaceBear, URL built locally from random dimensions

mod bear;
mod cat;
mod dog;
mod source;

pub use bear::{BearStrategy, HEIGHT_RANGE, WIDTH_RANGE, bear_url};
pub use cat::CatStrategy;
pub use dog::{DogStrategy, MAX_DOG_ATTEMPTS, is_image_url};
pub use source::{HttpJsonSource, JsonSource};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::config::ProvidersConfig;
use crate::data::AnimalType;
use crate::error::FetchError;
use crate::metrics;

/// A way of obtaining one random image URL for a single animal type
#[async_trait]
pub trait ImageStrategy: Send + Sync {
    /// Provider label used in logs and metrics
    fn name(&self) -> &'static str;

    /// Fetch a single image URL
    async fn fetch_image_url(&self) -> Result<String, FetchError>;
}

/// Routes fetch requests to the strategy registered for each animal type
///
/// The dispatcher itself never retries and never rewrites strategy
/// errors.
#[derive(Clone, Default)]
pub struct ImageDispatcher {
    strategies: HashMap<AnimalType, Arc<dyn ImageStrategy>>,
}

impl ImageDispatcher {
    /// Create a dispatcher with no strategies
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the strategy for an animal type
    pub fn with_strategy(
        mut self,
        animal_type: AnimalType,
        strategy: Arc<dyn ImageStrategy>,
    ) -> Self {
        self.strategies.insert(animal_type, strategy);
        self
    }

    /// Build the production dispatcher from configuration
    ///
    /// Cat and dog share the given HTTP client.
    pub fn from_config(config: &ProvidersConfig, http_client: reqwest::Client) -> Self {
        let source: Arc<dyn JsonSource> = Arc::new(HttpJsonSource::new(http_client));

        Self::new()
            .with_strategy(
                AnimalType::Cat,
                Arc::new(CatStrategy::new(source.clone(), config.cat_url.clone())),
            )
            .with_strategy(
                AnimalType::Dog,
                Arc::new(DogStrategy::new(source, config.dog_url.clone())),
            )
            .with_strategy(
                AnimalType::Bear,
                Arc::new(BearStrategy::new(config.bear_base_url.clone())),
            )
    }

    /// Fetch one image URL for the given animal type
    ///
    /// # Errors
    /// - `UnsupportedType` if no strategy is registered for the type
    /// - whatever the strategy returns, unchanged
    pub async fn fetch_image(&self, animal_type: AnimalType) -> Result<String, FetchError> {
        let strategy = self
            .strategies
            .get(&animal_type)
            .ok_or_else(|| FetchError::UnsupportedType(animal_type.to_string()))?;

        let started = Instant::now();
        let result = strategy.fetch_image_url().await;

        let status = match &result {
            Ok(_) => "success",
            Err(error) => error.kind(),
        };
        metrics::observe_provider_fetch(strategy.name(), status, started.elapsed());

        match &result {
            Ok(url) => tracing::debug!(provider = strategy.name(), %url, "Fetched image URL"),
            Err(error) => tracing::warn!(provider = strategy.name(), %error, "Image fetch failed"),
        }

        result
    }
}
