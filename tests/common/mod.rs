//! Common test utilities for E2E tests

#![allow(dead_code)]

pub mod schema_validator;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use animal_images::{AppState, config};
use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use tempfile::TempDir;
use tokio::net::TcpListener;

static METRICS: Once = Once::new();

/// Queued dog response that makes the mock upstream answer HTTP 500
pub const DOG_SERVER_ERROR: &str = "<server error>";

/// Scripted stand-in for The Cat API and random.dog
#[derive(Clone, Default)]
pub struct MockUpstream {
    pub addr: String,
    state: UpstreamState,
}

#[derive(Clone, Default)]
struct UpstreamState {
    cat_calls: Arc<AtomicUsize>,
    cat_unavailable: Arc<AtomicBool>,
    dog_calls: Arc<AtomicUsize>,
    dog_queue: Arc<Mutex<VecDeque<String>>>,
}

impl MockUpstream {
    /// Start the mock upstream on a random local port
    pub async fn start() -> Self {
        let state = UpstreamState::default();

        let app = Router::new()
            .route("/v1/images/search", get(cat_search))
            .route("/woof.json", get(dog_woof))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn cat_url(&self) -> String {
        format!("{}/v1/images/search", self.addr)
    }

    pub fn dog_url(&self) -> String {
        format!("{}/woof.json", self.addr)
    }

    /// Queue dog URLs to be served in order; once drained, a fresh
    /// `.jpg` is served on every call
    pub fn queue_dog_urls<I, S>(&self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue = self.state.dog_queue.lock().unwrap();
        queue.extend(urls.into_iter().map(Into::into));
    }

    pub fn set_cat_unavailable(&self, unavailable: bool) {
        self.state.cat_unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn cat_calls(&self) -> usize {
        self.state.cat_calls.load(Ordering::SeqCst)
    }

    pub fn dog_calls(&self) -> usize {
        self.state.dog_calls.load(Ordering::SeqCst)
    }
}

async fn cat_search(State(state): State<UpstreamState>) -> impl IntoResponse {
    let call = state.cat_calls.fetch_add(1, Ordering::SeqCst);

    if state.cat_unavailable.load(Ordering::SeqCst) {
        return (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response();
    }

    Json(serde_json::json!([
        {
            "id": format!("cat{call}"),
            "url": format!("https://cdn2.thecatapi.com/images/cat{call}.jpg"),
            "width": 800,
            "height": 600
        }
    ]))
    .into_response()
}

async fn dog_woof(State(state): State<UpstreamState>) -> impl IntoResponse {
    let call = state.dog_calls.fetch_add(1, Ordering::SeqCst);
    let next = state.dog_queue.lock().unwrap().pop_front();

    match next {
        Some(url) if url == DOG_SERVER_ERROR => {
            (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
        }
        Some(url) => Json(serde_json::json!({ "fileSizeBytes": 2048, "url": url })).into_response(),
        None => Json(serde_json::json!({
            "fileSizeBytes": 2048,
            "url": format!("https://random.dog/dog{call}.jpg")
        }))
        .into_response(),
    }
}

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub upstream: MockUpstream,
    pub _temp_dir: TempDir,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Create a new test server instance
    pub async fn new() -> Self {
        // The registry is process-wide; register it once per test binary
        METRICS.call_once(animal_images::metrics::init_metrics);

        let upstream = MockUpstream::start().await;

        // Create temporary directory for test database
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        // Create test configuration
        let config = config::AppConfig {
            server: config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Let OS assign port
            },
            database: config::DatabaseConfig { path: db_path },
            providers: config::ProvidersConfig {
                cat_url: upstream.cat_url(),
                dog_url: upstream.dog_url(),
                bear_base_url: "https://placebear.com".to_string(),
                request_timeout_secs: 2,
                user_agent: "animal-images-test".to_string(),
            },
            logging: config::LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        };

        // Initialize app state
        let state = AppState::new(&config).await.unwrap();

        // Create HTTP client
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        let app = animal_images::build_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr: addr_str,
            state,
            upstream,
            _temp_dir: temp_dir,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// POST /fetch with a JSON body
    pub async fn fetch(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/fetch"))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    /// GET /last/:animal_type
    pub async fn last(&self, animal_type: &str) -> reqwest::Response {
        self.client
            .get(self.url(&format!("/last/{animal_type}")))
            .send()
            .await
            .unwrap()
    }

    /// POST /ui with form fields
    pub async fn submit_form(&self, fields: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url("/ui"))
            .form(fields)
            .send()
            .await
            .unwrap()
    }

    /// Number of stored records for an animal type
    pub async fn stored(&self, animal_type: animal_images::data::AnimalType) -> i64 {
        self.state.db.count_images(animal_type).await.unwrap()
    }
}
