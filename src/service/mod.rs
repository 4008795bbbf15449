//! Service layer
//!
//! Contains business logic separated from HTTP handlers.
//! Services orchestrate image providers and the database.

mod images;

pub use images::ImageService;
