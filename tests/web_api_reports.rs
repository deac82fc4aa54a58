//! Integration tests for reports, media records, locations, and contacts.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use common::{access_token_for, bearer, create_test_server, file_report};
use serde_json::{json, Value};

// ============================================================================
// Reports
// ============================================================================

#[tokio::test]
async fn test_create_report_with_location() {
    let server = create_test_server().await;
    let token = access_token_for(&server, "user@example.com", "1234567890", "user").await;

    let response = server
        .post("/reports")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "incident": "flood",
            "details": "River burst its banks",
            "latitude": -1.2921,
            "longitude": 36.8219,
            "address": "Riverside Drive"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["user_id"], 1);

    // The location row was written in the same transaction
    let response = server
        .get("/locations")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    let body: Value = response.json();
    let locations = body["data"].as_array().unwrap();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0]["address"], "Riverside Drive");
}

#[tokio::test]
async fn test_create_report_validation() {
    let server = create_test_server().await;
    let token = access_token_for(&server, "user@example.com", "1234567890", "user").await;

    let response = server
        .post("/reports")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "incident": "",
            "details": "something",
            "latitude": 0.0,
            "longitude": 0.0
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/reports")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "incident": "fire",
            "details": "something",
            "latitude": 95.0,
            "longitude": 0.0
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_ownership() {
    let server = create_test_server().await;
    let owner = access_token_for(&server, "owner@example.com", "1234567890", "user").await;
    let other = access_token_for(&server, "other@example.com", "0987654321", "user").await;
    let admin = access_token_for(&server, "admin@example.com", "1112223333", "admin").await;
    let report_id = file_report(&server, &owner).await;

    server
        .get(&format!("/reports/{report_id}"))
        .add_header(AUTHORIZATION, bearer(&owner))
        .await
        .assert_status_ok();

    server
        .get(&format!("/reports/{report_id}"))
        .add_header(AUTHORIZATION, bearer(&other))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    server
        .get(&format!("/reports/{report_id}"))
        .add_header(AUTHORIZATION, bearer(&admin))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_and_delete_report() {
    let server = create_test_server().await;
    let token = access_token_for(&server, "user@example.com", "1234567890", "user").await;
    let report_id = file_report(&server, &token).await;

    let response = server
        .patch(&format!("/reports/{report_id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "details": "Updated description" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["details"], "Updated description");
    assert_eq!(body["data"]["incident"], "theft");

    server
        .delete(&format!("/reports/{report_id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status_ok();

    server
        .get(&format!("/reports/{report_id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_reports_is_admin_only() {
    let server = create_test_server().await;
    let user = access_token_for(&server, "user@example.com", "1234567890", "user").await;
    let admin = access_token_for(&server, "admin@example.com", "0987654321", "admin").await;
    file_report(&server, &user).await;

    server
        .get("/reports")
        .add_header(AUTHORIZATION, bearer(&user))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let response = server
        .get("/reports")
        .add_header(AUTHORIZATION, bearer(&admin))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

// ============================================================================
// Media records
// ============================================================================

#[tokio::test]
async fn test_media_lifecycle() {
    let server = create_test_server().await;
    let token = access_token_for(&server, "user@example.com", "1234567890", "user").await;
    let report_id = file_report(&server, &token).await;

    let response = server
        .post(&format!("/reports/{report_id}/media"))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "file_url": "https://cdn.example.com/evidence.jpg",
            "media_type": "image/jpeg"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let response = server
        .get(&format!("/reports/{report_id}/media"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    server
        .delete(&format!("/reports/{report_id}/media"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status_ok();

    let response = server
        .get(&format!("/reports/{report_id}/media"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    let body: Value = response.json();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_media_requires_ownership() {
    let server = create_test_server().await;
    let owner = access_token_for(&server, "owner@example.com", "1234567890", "user").await;
    let other = access_token_for(&server, "other@example.com", "0987654321", "user").await;
    let report_id = file_report(&server, &owner).await;

    let response = server
        .post(&format!("/reports/{report_id}/media"))
        .add_header(AUTHORIZATION, bearer(&other))
        .json(&json!({
            "file_url": "https://cdn.example.com/evidence.jpg",
            "media_type": "image/jpeg"
        }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

// ============================================================================
// Emergency contacts
// ============================================================================

#[tokio::test]
async fn test_contact_lifecycle() {
    let server = create_test_server().await;
    let token = access_token_for(&server, "user@example.com", "1234567890", "user").await;

    let response = server
        .post("/emergency-contacts")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "name": "John Doe",
            "relationship": "brother",
            "phone_number": "0987654321"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let contact_id = body["data"]["id"].as_i64().unwrap();

    let response = server
        .patch(&format!("/emergency-contacts/{contact_id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "phone_number": "1112223333" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["phone_number"], "1112223333");

    server
        .delete(&format!("/emergency-contacts/{contact_id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server
        .get("/emergency-contacts")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    let body: Value = response.json();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_contacts_are_scoped_to_owner() {
    let server = create_test_server().await;
    let owner = access_token_for(&server, "owner@example.com", "1234567890", "user").await;
    let other = access_token_for(&server, "other@example.com", "0987654321", "user").await;

    server
        .post("/emergency-contacts")
        .add_header(AUTHORIZATION, bearer(&owner))
        .json(&json!({
            "name": "John Doe",
            "relationship": "brother",
            "phone_number": "0987654321"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    // Listing only shows the caller's own contacts
    let response = server
        .get("/emergency-contacts")
        .add_header(AUTHORIZATION, bearer(&other))
        .await;
    let body: Value = response.json();
    assert!(body["data"].as_array().unwrap().is_empty());

    // Direct access to another user's contact is forbidden
    server
        .get("/emergency-contacts/1")
        .add_header(AUTHORIZATION, bearer(&other))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

// ============================================================================
// Locations
// ============================================================================

#[tokio::test]
async fn test_location_crud() {
    let server = create_test_server().await;
    let token = access_token_for(&server, "user@example.com", "1234567890", "user").await;
    let report_id = file_report(&server, &token).await;

    let response = server
        .post("/locations")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "report_id": report_id,
            "latitude": -1.3,
            "longitude": 36.8,
            "address": "Second sighting"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let location_id = body["data"]["id"].as_i64().unwrap();

    let response = server
        .patch(&format!("/locations/{location_id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "address": "Corrected address" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["address"], "Corrected address");

    server
        .delete(&format!("/locations/{location_id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status_ok();

    server
        .get(&format!("/locations/{location_id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_location_requires_existing_report() {
    let server = create_test_server().await;
    let token = access_token_for(&server, "user@example.com", "1234567890", "user").await;

    let response = server
        .post("/locations")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "report_id": 999,
            "latitude": 0.0,
            "longitude": 0.0
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
