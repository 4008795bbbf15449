//! API layer
//!
//! HTTP handlers for:
//! - JSON image API
//! - HTML form UI
//! - Metrics (Prometheus)

mod dto;
mod images;
pub mod metrics;
mod ui;

pub use dto::*;

pub use images::images_router;
pub use metrics::metrics_router;
pub use ui::ui_router;
