//! JSON image endpoints
//!
//! - POST /fetch
//! - GET /last/:animal_type

use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;

use super::FetchRequest;
use crate::AppState;
use crate::data::{AnimalImage, AnimalType};
use crate::error::{AppError, Result};

/// Create image API router
///
/// Routes:
/// - POST /fetch - Fetch and store new images
/// - GET /last/:animal_type - Most recently stored image
pub fn images_router() -> Router<AppState> {
    Router::new()
        .route("/fetch", post(fetch_images))
        .route("/last/:animal_type", get(get_last_image))
}

/// POST /fetch
///
/// Fetches `amount` images of `animal_type` from the upstream provider,
/// stores each one and returns the stored records in order. A body that
/// doesn't deserialize is a 400 with the usual error body.
async fn fetch_images(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<FetchRequest>, AppError>,
) -> Result<Json<Vec<AnimalImage>>> {
    let animal_type: AnimalType = request.animal_type.parse()?;
    let records = state.images.fetch(animal_type, request.amount).await?;
    Ok(Json(records))
}

/// GET /last/:animal_type
///
/// Returns the most recently stored image of the given type, or 404.
async fn get_last_image(
    State(state): State<AppState>,
    Path(animal_type): Path<String>,
) -> Result<Json<AnimalImage>> {
    let animal_type: AnimalType = animal_type.parse()?;
    let record = state.images.get_last(animal_type).await?;
    Ok(Json(record))
}
