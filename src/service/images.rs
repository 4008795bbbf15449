//! Image service
//!
//! Fetches images through the provider dispatcher and records each one.

use std::sync::Arc;

use crate::data::{AnimalImage, AnimalType, Database};
use crate::error::AppError;
use crate::metrics::RECORDS_CREATED_TOTAL;
use crate::provider::ImageDispatcher;

/// Image service
pub struct ImageService {
    db: Arc<Database>,
    dispatcher: Arc<ImageDispatcher>,
}

impl ImageService {
    /// Create new image service
    pub fn new(db: Arc<Database>, dispatcher: Arc<ImageDispatcher>) -> Self {
        Self { db, dispatcher }
    }

    /// Fetch `amount` new images and persist each one
    ///
    /// Images are fetched one after another; each is stored before the
    /// next fetch starts, and the result keeps that order.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount < 1` (nothing is fetched or stored)
    /// - the first fetch or database error. Records stored by earlier
    ///   iterations stay stored.
    pub async fn fetch(
        &self,
        animal_type: AnimalType,
        amount: i64,
    ) -> Result<Vec<AnimalImage>, AppError> {
        if amount < 1 {
            return Err(AppError::InvalidAmount(amount));
        }

        let mut records = Vec::new();

        for _ in 0..amount {
            let image_url = self.dispatcher.fetch_image(animal_type).await?;
            let record = self.db.append_image(animal_type, &image_url).await?;

            RECORDS_CREATED_TOTAL
                .with_label_values(&[animal_type.as_str()])
                .inc();
            tracing::info!(
                id = record.id,
                animal_type = %record.animal_type,
                image_url = %record.image_url,
                "Saved image"
            );

            records.push(record);
        }

        Ok(records)
    }

    /// Get the most recently stored image for an animal type
    ///
    /// # Errors
    /// `NotFound` if nothing has been stored for this type
    pub async fn get_last(&self, animal_type: AnimalType) -> Result<AnimalImage, AppError> {
        self.db
            .most_recent_image(animal_type)
            .await?
            .ok_or(AppError::NotFound)
    }
}
