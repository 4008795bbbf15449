//! Schema validation tests for the JSON API
//!
//! Records and error bodies must keep the shape clients rely on:
//! `{id, animal_type, image_url, created_at}` and `{error}`.

mod common;

use common::TestServer;
use common::schema_validator::{assert_matches_schema, load_test_schema};
use serde_json::{Value, json};

#[tokio::test]
async fn test_fetch_response_schema() {
    let server = TestServer::new().await;
    let schema = load_test_schema("animal_image");

    for animal in ["cat", "dog", "bear"] {
        let response = server.fetch(json!({ "animal_type": animal, "amount": 2 })).await;
        assert_eq!(response.status(), 200, "fetch {animal} failed");

        let records: Vec<Value> = response.json().await.unwrap();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_matches_schema(record, &schema);
            assert_eq!(record["animal_type"], animal);
        }
    }
}

#[tokio::test]
async fn test_last_response_schema() {
    let server = TestServer::new().await;
    server.fetch(json!({ "animal_type": "bear" })).await;

    let response = server.last("bear").await;
    assert_eq!(response.status(), 200);

    let record: Value = response.json().await.unwrap();
    assert_matches_schema(&record, &load_test_schema("animal_image"));
}

#[tokio::test]
async fn test_error_response_schema() {
    let server = TestServer::new().await;
    let schema = load_test_schema("error");

    let not_found: Value = server.last("cat").await.json().await.unwrap();
    assert_matches_schema(&not_found, &schema);

    let invalid_amount: Value = server
        .fetch(json!({ "animal_type": "cat", "amount": 0 }))
        .await
        .json()
        .await
        .unwrap();
    assert_matches_schema(&invalid_amount, &schema);
}
