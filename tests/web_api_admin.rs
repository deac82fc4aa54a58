//! Integration tests for admin triage and role enforcement.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use common::{access_token_for, bearer, create_test_server, file_report};
use serde_json::{json, Value};

// ============================================================================
// Role enforcement
// ============================================================================

#[tokio::test]
async fn test_admin_routes_reject_regular_users_with_403() {
    let server = create_test_server().await;
    let user_token = access_token_for(&server, "user@example.com", "1234567890", "user").await;

    // Authenticated but under-privileged is forbidden, not unauthorized
    let response = server
        .get("/admin/reports")
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["message"], "Admin access required");
}

#[tokio::test]
async fn test_admin_routes_reject_missing_token_with_401() {
    let server = create_test_server().await;

    let response = server.get("/admin/reports").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_revoked_token_is_401_on_admin_routes() {
    let server = create_test_server().await;
    let admin_token = access_token_for(&server, "admin@example.com", "0987654321", "admin").await;

    server
        .post("/logout")
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await
        .assert_status_ok();

    // Revocation beats the role check: 401, not 403
    let response = server
        .get("/admin/reports")
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Token has been revoked");
}

#[tokio::test]
async fn test_list_users_requires_admin() {
    let server = create_test_server().await;
    let user_token = access_token_for(&server, "user@example.com", "1234567890", "user").await;
    let admin_token = access_token_for(&server, "admin@example.com", "0987654321", "admin").await;

    server
        .get("/users")
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let response = server
        .get("/users")
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_user_cannot_read_other_account() {
    let server = create_test_server().await;
    let user_token = access_token_for(&server, "user@example.com", "1234567890", "user").await;
    access_token_for(&server, "other@example.com", "0987654321", "user").await;

    let response = server
        .get("/users/2")
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Own account is fine
    server
        .get("/users/1")
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await
        .assert_status_ok();
}

// ============================================================================
// Admin triage
// ============================================================================

#[tokio::test]
async fn test_admin_list_reports_paginated() {
    let server = create_test_server().await;
    let user_token = access_token_for(&server, "user@example.com", "1234567890", "user").await;
    let admin_token = access_token_for(&server, "admin@example.com", "0987654321", "admin").await;

    for _ in 0..3 {
        file_report(&server, &user_token).await;
    }

    let response = server
        .get("/admin/reports")
        .add_query_param("page", "1")
        .add_query_param("per_page", "2")
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["per_page"], 2);
    assert_eq!(body["data"]["reports"].as_array().unwrap().len(), 2);

    let response = server
        .get("/admin/reports")
        .add_query_param("page", "2")
        .add_query_param("per_page", "2")
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"]["reports"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_status_transition() {
    let server = create_test_server().await;
    let user_token = access_token_for(&server, "user@example.com", "1234567890", "user").await;
    let admin_token = access_token_for(&server, "admin@example.com", "0987654321", "admin").await;
    let report_id = file_report(&server, &user_token).await;

    // Freshly filed reports are pending
    let response = server
        .get(&format!("/admin/reports/{report_id}"))
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "pending");

    let response = server
        .patch(&format!("/admin/reports/{report_id}"))
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .json(&json!({ "status": "under investigation" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "under investigation");

    // Latest transition wins
    server
        .patch(&format!("/admin/reports/{report_id}"))
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .json(&json!({ "status": "resolved" }))
        .await
        .assert_status_ok();

    let response = server
        .get(&format!("/admin/reports/{report_id}"))
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "resolved");
}

#[tokio::test]
async fn test_admin_status_rejects_unknown_value() {
    let server = create_test_server().await;
    let user_token = access_token_for(&server, "user@example.com", "1234567890", "user").await;
    let admin_token = access_token_for(&server, "admin@example.com", "0987654321", "admin").await;
    let report_id = file_report(&server, &user_token).await;

    let response = server
        .patch(&format!("/admin/reports/{report_id}"))
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .json(&json!({ "status": "escalated" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid status");
}

#[tokio::test]
async fn test_admin_status_missing_report() {
    let server = create_test_server().await;
    let admin_token = access_token_for(&server, "admin@example.com", "0987654321", "admin").await;

    let response = server
        .patch("/admin/reports/999")
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .json(&json!({ "status": "resolved" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_delete_report() {
    let server = create_test_server().await;
    let user_token = access_token_for(&server, "user@example.com", "1234567890", "user").await;
    let admin_token = access_token_for(&server, "admin@example.com", "0987654321", "admin").await;
    let report_id = file_report(&server, &user_token).await;

    server
        .delete(&format!("/admin/reports/{report_id}"))
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await
        .assert_status_ok();

    server
        .delete(&format!("/admin/reports/{report_id}"))
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_audit_trail_is_append_only() {
    let server = create_test_server().await;
    let user_token = access_token_for(&server, "user@example.com", "1234567890", "user").await;
    let admin_token = access_token_for(&server, "admin@example.com", "0987654321", "admin").await;
    let report_id = file_report(&server, &user_token).await;

    for status in ["under investigation", "rejected", "resolved"] {
        server
            .post(&format!("/reports/{report_id}/status"))
            .add_header(AUTHORIZATION, bearer(&admin_token))
            .json(&json!({ "status": status }))
            .await
            .assert_status_ok();
    }

    let response = server
        .get(&format!("/reports/{report_id}/status"))
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let trail = body["data"].as_array().unwrap();
    assert_eq!(trail.len(), 3);
    assert_eq!(trail[0]["status"], "under investigation");
    assert_eq!(trail[2]["status"], "resolved");
}
