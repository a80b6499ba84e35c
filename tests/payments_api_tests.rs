//! End-to-end tests for the payments API over the in-memory store.
//!
//! These exercise the full flow from HTTP request to response: body binding,
//! validation, store semantics (including soft delete) and status-code
//! mapping.

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use payments_api::server::build_router;
use payments_api::storage::InMemoryPaymentStore;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

fn test_server() -> TestServer {
    let store = Arc::new(InMemoryPaymentStore::new());
    TestServer::new(build_router(store)).expect("failed to create test server")
}

fn valid_payment() -> Value {
    json!({
        "beneficiary": {"account_number": "1234", "bank_id": "4321", "name": "John"},
        "debtor": {"account_number": "5678", "bank_id": "8765", "name": "Dave"},
        "amount": 314.15,
        "currency": "EUR",
        "date": "2019-04-30T22:30:00Z",
        "description": "Order #1"
    })
}

async fn create_payment(server: &TestServer, body: &Value) -> Value {
    let response = server.post("/payments").json(body).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()
}

// ===========================================================================
// Status endpoint
// ===========================================================================

#[tokio::test]
async fn root_reports_database_status_and_time() {
    let server = test_server();

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["database_status"], "ONLINE");
    let time = body["time"].as_str().expect("time should be a string");
    DateTime::parse_from_rfc3339(time).expect("time should be RFC3339");
}

// ===========================================================================
// Create
// ===========================================================================

#[tokio::test]
async fn create_returns_201_with_assigned_id_and_timestamps() {
    let server = test_server();

    let created = create_payment(&server, &valid_payment()).await;

    let id = created["id"].as_str().expect("id should be set");
    assert!(!id.is_empty());
    assert_eq!(created["amount"], json!(314.15));
    assert_eq!(created["currency"], "EUR");
    assert_eq!(created["description"], "Order #1");
    assert_eq!(created["beneficiary"]["name"], "John");
    assert_eq!(created["debtor"]["name"], "Dave");
    assert_eq!(created["created_at"], created["updated_at"]);
    assert!(created.get("deleted_at").is_none());
}

#[tokio::test]
async fn create_rejects_each_invalid_field_with_the_exact_message() {
    let server = test_server();

    let cases: Vec<(Box<dyn Fn(&mut Value)>, &str)> = vec![
        (
            Box::new(|p| p["beneficiary"]["account_number"] = json!("")),
            "beneficiary: the entity's account number must not be empty",
        ),
        (
            Box::new(|p| p["beneficiary"]["bank_id"] = json!("")),
            "beneficiary: the entity's bank id must not be empty",
        ),
        (
            Box::new(|p| p["beneficiary"]["name"] = json!("")),
            "beneficiary: the entity's name must not be empty",
        ),
        (
            Box::new(|p| p["debtor"]["account_number"] = json!("")),
            "debtor: the entity's account number must not be empty",
        ),
        (
            Box::new(|p| p["debtor"]["bank_id"] = json!("")),
            "debtor: the entity's bank id must not be empty",
        ),
        (
            Box::new(|p| p["debtor"]["name"] = json!("")),
            "debtor: the entity's name must not be empty",
        ),
        (
            Box::new(|p| p["amount"] = json!(0)),
            "the amount must be positive",
        ),
        (
            Box::new(|p| p["amount"] = json!(-10.0)),
            "the amount must be positive",
        ),
        (
            Box::new(|p| p["currency"] = json!("")),
            "the currency must not be empty",
        ),
        (
            Box::new(|p| {
                p.as_object_mut().unwrap().remove("date");
            }),
            "the date must not be empty",
        ),
        (
            Box::new(|p| p["description"] = json!("")),
            "the description must not be empty",
        ),
    ];

    for (mutate, expected) in cases {
        let mut payload = valid_payment();
        mutate(&mut payload);

        let response = server.post("/payments").json(&payload).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], expected);
    }
}

#[tokio::test]
async fn create_with_all_fields_missing_reports_the_first_rule() {
    let server = test_server();

    let response = server.post("/payments").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "beneficiary: the entity's account number must not be empty"
    );
}

#[tokio::test]
async fn create_with_malformed_body_returns_400_before_validation() {
    let server = test_server();

    let response = server
        .post("/payments")
        .text("{not json")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let message = response.json::<Value>()["message"]
        .as_str()
        .expect("message should be set")
        .to_string();
    assert!(!message.is_empty());
}

// ===========================================================================
// Get
// ===========================================================================

#[tokio::test]
async fn create_then_get_round_trips() {
    let server = test_server();

    let created = create_payment(&server, &valid_payment()).await;
    let id = created["id"].as_str().unwrap();

    let response = server.get(&format!("/payments/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let fetched = response.json::<Value>();
    assert_eq!(fetched, created);
    assert!(fetched.get("deleted_at").is_none());
}

#[tokio::test]
async fn get_unknown_id_returns_404() {
    let server = test_server();

    let response = server.get(&format!("/payments/{}", Uuid::new_v4())).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "payment not found");
}

#[tokio::test]
async fn get_malformed_id_returns_500() {
    let server = test_server();

    let response = server.get("/payments/abc").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["message"],
        "\"abc\" is not a valid payment id"
    );
}

// ===========================================================================
// List
// ===========================================================================

#[tokio::test]
async fn list_is_empty_initially() {
    let server = test_server();

    let response = server.get("/payments").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn list_returns_all_and_only_live_payments() {
    let server = test_server();

    let mut ids = Vec::new();
    for i in 0..4 {
        let mut payload = valid_payment();
        payload["description"] = json!(format!("Order #{i}"));
        let created = create_payment(&server, &payload).await;
        ids.push(created["id"].as_str().unwrap().to_string());
    }

    for id in &ids[..2] {
        let response = server.delete(&format!("/payments/{id}")).await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    }

    let response = server.get("/payments").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let listed = response.json::<Vec<Value>>();
    assert_eq!(listed.len(), 2);
    let listed_ids: Vec<&str> = listed.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert!(!listed_ids.contains(&ids[0].as_str()));
    assert!(!listed_ids.contains(&ids[1].as_str()));
    assert!(listed_ids.contains(&ids[2].as_str()));
    assert!(listed_ids.contains(&ids[3].as_str()));
}

// ===========================================================================
// Update
// ===========================================================================

#[tokio::test]
async fn update_replaces_fields_and_preserves_identity() {
    let server = test_server();

    let created = create_payment(&server, &valid_payment()).await;
    let id = created["id"].as_str().unwrap();

    // The body's id differs from the path id; the path id must win.
    let mut replacement = valid_payment();
    replacement["id"] = json!(Uuid::new_v4().to_string());
    replacement["description"] = json!("Order #2");
    replacement["amount"] = json!(100.0);

    let response = server.put(&format!("/payments/{id}")).json(&replacement).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let updated = response.json::<Value>();
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_eq!(updated["description"], "Order #2");
    assert_eq!(updated["amount"], json!(100.0));

    let before: DateTime<Utc> = serde_json::from_value(created["updated_at"].clone()).unwrap();
    let after: DateTime<Utc> = serde_json::from_value(updated["updated_at"].clone()).unwrap();
    assert!(after > before);

    // The stored record reflects the update.
    let fetched = server.get(&format!("/payments/{id}")).await.json::<Value>();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_validates_the_body() {
    let server = test_server();

    let created = create_payment(&server, &valid_payment()).await;
    let id = created["id"].as_str().unwrap();

    let mut payload = valid_payment();
    payload["amount"] = json!(0);

    let response = server.put(&format!("/payments/{id}")).json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "the amount must be positive"
    );
}

#[tokio::test]
async fn update_unknown_id_returns_404() {
    let server = test_server();

    let response = server
        .put(&format!("/payments/{}", Uuid::new_v4()))
        .json(&valid_payment())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "payment not found");
}

#[tokio::test]
async fn update_malformed_id_returns_500() {
    let server = test_server();

    let response = server.put("/payments/abc").json(&valid_payment()).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["message"],
        "\"abc\" is not a valid payment id"
    );
}

// ===========================================================================
// Delete
// ===========================================================================

#[tokio::test]
async fn delete_makes_the_payment_invisible() {
    let server = test_server();

    let created = create_payment(&server, &valid_payment()).await;
    let id = created["id"].as_str().unwrap();

    let response = server.delete(&format!("/payments/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    // Gone from get and list.
    let response = server.get(&format!("/payments/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let listed = server.get("/payments").await.json::<Vec<Value>>();
    assert!(listed.iter().all(|p| p["id"].as_str() != Some(id)));

    // A second delete finds nothing.
    let response = server.delete(&format!("/payments/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "payment not found");

    // Updating a deleted payment also reports not found.
    let response = server
        .put(&format!("/payments/{id}"))
        .json(&valid_payment())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_id_returns_404() {
    let server = test_server();

    let response = server
        .delete(&format!("/payments/{}", Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "payment not found");
}

#[tokio::test]
async fn delete_malformed_id_returns_500() {
    let server = test_server();

    let response = server.delete("/payments/abc").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["message"],
        "\"abc\" is not a valid payment id"
    );
}
