//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use std::time::Duration;

use lazy_static::lazy_static;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // Provider Metrics
    pub static ref PROVIDER_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("animal_images_provider_requests_total", "Total number of image provider fetches"),
        &["provider", "status"]
    ).expect("metric can be created");
    pub static ref PROVIDER_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "animal_images_provider_request_duration_seconds",
            "Image provider fetch duration in seconds"
        ).buckets(vec![0.001, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["provider"]
    ).expect("metric can be created");
    pub static ref DOG_REJECTED_URLS_TOTAL: IntCounter = IntCounter::new(
        "animal_images_dog_rejected_urls_total",
        "Total number of non-image URLs skipped by the dog provider"
    ).expect("metric can be created");

    // Record Metrics
    pub static ref RECORDS_CREATED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("animal_images_records_created_total", "Total number of image records persisted"),
        &["animal_type"]
    ).expect("metric can be created");

    // Database Metrics
    pub static ref DB_QUERIES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("animal_images_db_queries_total", "Total number of database queries"),
        &["operation"]
    ).expect("metric can be created");

    // Error Metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("animal_images_errors_total", "Total number of errors"),
        &["error_type"]
    ).expect("metric can be created");
}

/// Initialize metrics registry.
pub fn init_metrics() {
    REGISTRY
        .register(Box::new(PROVIDER_REQUESTS_TOTAL.clone()))
        .expect("PROVIDER_REQUESTS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(PROVIDER_REQUEST_DURATION_SECONDS.clone()))
        .expect("PROVIDER_REQUEST_DURATION_SECONDS can be registered");
    REGISTRY
        .register(Box::new(DOG_REJECTED_URLS_TOTAL.clone()))
        .expect("DOG_REJECTED_URLS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(RECORDS_CREATED_TOTAL.clone()))
        .expect("RECORDS_CREATED_TOTAL can be registered");
    REGISTRY
        .register(Box::new(DB_QUERIES_TOTAL.clone()))
        .expect("DB_QUERIES_TOTAL can be registered");
    REGISTRY
        .register(Box::new(ERRORS_TOTAL.clone()))
        .expect("ERRORS_TOTAL can be registered");

    tracing::info!("Metrics registry initialized");
}

/// Record the outcome and latency of one provider fetch.
pub fn observe_provider_fetch(provider: &str, status: &str, elapsed: Duration) {
    PROVIDER_REQUESTS_TOTAL
        .with_label_values(&[provider, status])
        .inc();
    PROVIDER_REQUEST_DURATION_SECONDS
        .with_label_values(&[provider])
        .observe(elapsed.as_secs_f64());
}
