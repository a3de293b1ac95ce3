//! HTTP Endpoint Tests
//!
//! Drives the full router (health, CRUD, search, error bodies) through
//! `tower::ServiceExt::oneshot` without binding a socket.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use popsicle_api::http_server::{HttpServer, HttpServerConfig};
use popsicle_api::popsicle::{InMemoryPopsicleRepository, PopsicleRepository};

// =============================================================================
// Helper Functions
// =============================================================================

fn seeded_app() -> Router {
    let repo: Arc<dyn PopsicleRepository> =
        Arc::new(InMemoryPopsicleRepository::with_sample_data().unwrap());
    HttpServer::new(HttpServerConfig::default(), repo).router()
}

fn empty_app() -> Router {
    let repo: Arc<dyn PopsicleRepository> = Arc::new(InMemoryPopsicleRepository::new());
    HttpServer::new(HttpServerConfig::default(), repo).router()
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, headers, value)
}

fn valid_body() -> Value {
    json!({
        "name": "Mango Tango",
        "flavor": "Mango",
        "price": 2.49,
        "description": "Tropical",
        "quantity": 12
    })
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, _, body) = send(&empty_app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// Read
// =============================================================================

#[tokio::test]
async fn test_list_returns_seeded_records_in_id_order() {
    let (status, _, body) = send(&seeded_app(), Method::GET, "/api/popsicle", None).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(body[0]["name"], "Classic Vanilla");
    assert_eq!(body[0]["price"], json!(2.99));
}

#[tokio::test]
async fn test_get_missing_is_404_with_error_body() {
    let (status, _, body) = send(&seeded_app(), Method::GET, "/api/popsicle/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Popsicle with ID 999 does not exist");
    assert!(body["timestamp"].is_string());
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_get_non_numeric_id_is_400() {
    let (status, _, body) = send(&seeded_app(), Method::GET, "/api/popsicle/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The popsicle request is invalid");
}

#[tokio::test]
async fn test_non_positive_id_is_404() {
    let app = seeded_app();

    let (status, _, body) = send(&app, Method::GET, "/api/popsicle/-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Popsicle with ID -1 does not exist");

    let (status, _, _) = send(&app, Method::GET, "/api/popsicle/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::PUT, "/api/popsicle/-1", Some(valid_body())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(
        &app,
        Method::PATCH,
        "/api/popsicle/-1",
        Some(json!({ "quantity": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::DELETE, "/api/popsicle/-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _, all) = send(&app, Method::GET, "/api/popsicle", None).await;
    assert_eq!(all.as_array().unwrap().len(), 4);
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_returns_201_with_location() {
    let app = empty_app();
    let (status, headers, created) =
        send(&app, Method::POST, "/api/popsicle", Some(valid_body())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(headers[header::LOCATION], "/api/popsicle/1");
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let (status, _, fetched) = send(&app, Method::GET, "/api/popsicle/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_invalid_lists_field_errors() {
    let body = json!({
        "name": "",
        "flavor": "Mango",
        "price": 0,
        "quantity": -4
    });
    let (status, _, error) = send(&empty_app(), Method::POST, "/api/popsicle", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = error["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "price", "quantity"]);
}

#[tokio::test]
async fn test_create_missing_field_is_400() {
    let body = json!({ "name": "No Flavor", "price": 1.0, "quantity": 1 });
    let (status, _, _) = send(&empty_app(), Method::POST, "/api/popsicle", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_malformed_json_is_400() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/popsicle")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = empty_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_without_content_type_is_400() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/popsicle")
        .body(Body::from(valid_body().to_string()))
        .unwrap();

    let response = empty_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Replace
// =============================================================================

#[tokio::test]
async fn test_put_replaces_all_fields() {
    let app = seeded_app();
    let (_, _, before) = send(&app, Method::GET, "/api/popsicle/2", None).await;

    let (status, _, after) = send(&app, Method::PUT, "/api/popsicle/2", Some(valid_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["id"], 2);
    assert_eq!(after["name"], "Mango Tango");
    assert_eq!(after["description"], "Tropical");
    assert_eq!(after["createdAt"], before["createdAt"]);
}

#[tokio::test]
async fn test_put_missing_is_404() {
    let (status, _, _) =
        send(&seeded_app(), Method::PUT, "/api/popsicle/42", Some(valid_body())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_invalid_is_400() {
    let mut body = valid_body();
    body["price"] = json!(1000);
    let (status, _, _) = send(&seeded_app(), Method::PUT, "/api/popsicle/1", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Partial Update
// =============================================================================

#[tokio::test]
async fn test_patch_changes_only_given_fields() {
    let app = empty_app();
    let original = json!({
        "name": "Original Name",
        "flavor": "Original Flavor",
        "price": 1.99,
        "quantity": 5
    });
    let (_, _, created) = send(&app, Method::POST, "/api/popsicle", Some(original)).await;

    let patch = json!({ "name": "Updated Name", "price": 3.99 });
    let (status, _, updated) = send(&app, Method::PATCH, "/api/popsicle/1", Some(patch)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Updated Name");
    assert_eq!(updated["flavor"], "Original Flavor");
    assert_eq!(updated["price"], json!(3.99));
    assert_eq!(updated["quantity"], 5);
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_patch_null_description_clears_it() {
    let app = seeded_app();
    let (status, _, updated) = send(
        &app,
        Method::PATCH,
        "/api/popsicle/1",
        Some(json!({ "description": null })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(updated["description"].is_null());
    assert_eq!(updated["name"], "Classic Vanilla");
}

#[tokio::test]
async fn test_patch_missing_is_404_and_invalid_is_400() {
    let app = seeded_app();

    let (status, _, _) = send(
        &app,
        Method::PATCH,
        "/api/popsicle/99",
        Some(json!({ "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(
        &app,
        Method::PATCH,
        "/api/popsicle/1",
        Some(json!({ "flavor": "x".repeat(51) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["message"], "Flavor cannot exceed 50 characters");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_then_404() {
    let app = seeded_app();

    let (status, _, body) = send(&app, Method::DELETE, "/api/popsicle/3", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _, _) = send(&app, Method::GET, "/api/popsicle/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::DELETE, "/api/popsicle/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_without_filters_returns_all() {
    let (status, _, body) = send(&seeded_app(), Method::GET, "/api/popsicle/search", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_search_with_every_parameter_blank_returns_all() {
    let (status, _, body) = send(
        &seeded_app(),
        Method::GET,
        "/api/popsicle/search?name=&flavor=&minPrice=&maxPrice=&minQuantity=&maxQuantity=",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_search_blank_bound_is_ignored() {
    let (status, _, body) = send(
        &seeded_app(),
        Method::GET,
        "/api/popsicle/search?name=vanilla&minQuantity=",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], 1);
}

#[tokio::test]
async fn test_search_by_name_is_case_insensitive() {
    let (status, _, body) = send(
        &seeded_app(),
        Method::GET,
        "/api/popsicle/search?name=VANILLA",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Classic Vanilla");
}

#[tokio::test]
async fn test_search_ranges_are_inclusive() {
    let (status, _, body) = send(
        &seeded_app(),
        Method::GET,
        "/api/popsicle/search?minPrice=2.99&maxPrice=3.99&minQuantity=25&maxQuantity=50",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_search_no_match_is_empty_list() {
    let (status, _, body) = send(
        &seeded_app(),
        Method::GET,
        "/api/popsicle/search?flavor=pistachio",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_search_bad_number_is_400() {
    let (status, _, body) = send(
        &seeded_app(),
        Method::GET,
        "/api/popsicle/search?minQuantity=lots",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].is_string());
}
