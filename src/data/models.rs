//! Data models
//!
//! Rust structs representing database entities.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

// =============================================================================
// Animal type
// =============================================================================

/// The fixed set of animals the service knows how to fetch
///
/// Stored as lowercase text ("cat", "dog", "bear").
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AnimalType {
    Cat,
    Dog,
    Bear,
}

impl AnimalType {
    pub const ALL: [AnimalType; 3] = [AnimalType::Cat, AnimalType::Dog, AnimalType::Bear];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalType::Cat => "cat",
            AnimalType::Dog => "dog",
            AnimalType::Bear => "bear",
        }
    }
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimalType {
    type Err = FetchError;

    /// Parse a type tag. Matching is exact: "Cat" is not "cat".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cat" => Ok(AnimalType::Cat),
            "dog" => Ok(AnimalType::Dog),
            "bear" => Ok(AnimalType::Bear),
            other => Err(FetchError::UnsupportedType(other.to_string())),
        }
    }
}

// =============================================================================
// Animal image record
// =============================================================================

/// One fetched image, as persisted
///
/// Records are append-only: `id` and `created_at` are assigned on insert
/// and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnimalImage {
    pub id: i64,
    pub animal_type: AnimalType,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}
