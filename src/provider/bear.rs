//! PlaceBear provider
//!
//! PlaceBear renders a bear for any `/<width>/<height>` path, so no
//! request is made here; the URL is built from random dimensions.

use std::ops::RangeInclusive;

use async_trait::async_trait;
use rand::Rng;

use super::ImageStrategy;
use crate::error::FetchError;

pub const WIDTH_RANGE: RangeInclusive<u32> = 500..=800;
pub const HEIGHT_RANGE: RangeInclusive<u32> = 400..=600;

/// Build a PlaceBear URL with independently drawn width and height
pub fn bear_url<R: Rng + ?Sized>(base_url: &str, rng: &mut R) -> String {
    let width = rng.gen_range(WIDTH_RANGE);
    let height = rng.gen_range(HEIGHT_RANGE);
    format!("{}/{}/{}", base_url.trim_end_matches('/'), width, height)
}

pub struct BearStrategy {
    base_url: String,
}

impl BearStrategy {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

#[async_trait]
impl ImageStrategy for BearStrategy {
    fn name(&self) -> &'static str {
        "bear"
    }

    async fn fetch_image_url(&self) -> Result<String, FetchError> {
        Ok(bear_url(&self.base_url, &mut rand::thread_rng()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dimensions(url: &str) -> (u32, u32) {
        let mut parts = url.rsplitn(3, '/');
        let height = parts.next().unwrap().parse().unwrap();
        let width = parts.next().unwrap().parse().unwrap();
        (width, height)
    }

    #[test]
    fn dimensions_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            let url = bear_url("https://placebear.com", &mut rng);
            assert!(url.starts_with("https://placebear.com/"));

            let (width, height) = dimensions(&url);
            assert!(WIDTH_RANGE.contains(&width), "width {width} out of range");
            assert!(HEIGHT_RANGE.contains(&height), "height {height} out of range");
        }
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let mut rng = StdRng::seed_from_u64(1);
        let url = bear_url("https://placebear.com/", &mut rng);
        assert!(!url.contains("com//"));
    }

    #[tokio::test]
    async fn strategy_always_succeeds() {
        let strategy = BearStrategy::new("https://placebear.com".to_string());

        for _ in 0..1000 {
            let url = strategy.fetch_image_url().await.unwrap();
            let (width, height) = dimensions(&url);
            assert!(WIDTH_RANGE.contains(&width));
            assert!(HEIGHT_RANGE.contains(&height));
        }
    }
}
