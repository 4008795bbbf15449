//! Request DTOs
//!
//! Records are returned as `AnimalImage` directly; only inbound payloads
//! need their own types.

use serde::Deserialize;

/// POST /fetch body
///
/// `animal_type` stays a string so unknown tags surface as
/// `UnsupportedType` rather than a generic body rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchRequest {
    pub animal_type: String,
    #[serde(default = "default_amount")]
    pub amount: i64,
}

/// POST /ui form fields
#[derive(Debug, Clone, Deserialize)]
pub struct ImageForm {
    pub animal_type: String,
    /// Raw field value; blank means 1
    #[serde(default)]
    pub amount: Option<String>,
    /// "fetch" or "last"
    pub action: String,
}

impl ImageForm {
    /// Parse the amount field, defaulting blank input to 1
    pub fn amount(&self) -> Result<i64, crate::error::AppError> {
        match self.amount.as_deref().map(str::trim) {
            None | Some("") => Ok(default_amount()),
            Some(raw) => raw.parse().map_err(|_| {
                crate::error::AppError::Validation(format!(
                    "Amount must be a whole number, got {raw:?}"
                ))
            }),
        }
    }
}

fn default_amount() -> i64 {
    1
}
