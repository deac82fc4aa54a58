//! Shared helpers for web API integration tests.
#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{json, Value};
use siren::auth::TokenIssuer;
use siren::web::handlers::AppState;
use siren::web::middleware::AuthState;
use siren::web::router::{create_health_router, create_router};
use siren::Database;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";
pub const ACCESS_EXPIRY_SECS: u64 = 900;

/// Create a test server backed by an in-memory database.
pub async fn create_test_server() -> TestServer {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let issuer = TokenIssuer::new(TEST_SECRET, ACCESS_EXPIRY_SECS, 7).unwrap();

    let auth_state = Arc::new(AuthState::new(issuer.clone(), db.pool().clone()));
    let app_state = Arc::new(AppState::new(db, issuer));

    let router = create_router(app_state, auth_state, &[]).merge(create_health_router());
    TestServer::new(router).expect("Failed to create test server")
}

/// Register a user and return the response body.
pub async fn register_user(server: &TestServer, email: &str, phone: &str, role: &str) -> Value {
    let response = server
        .post("/users")
        .json(&json!({
            "first_name": "Test",
            "last_name": "User",
            "email": email,
            "phone_number": phone,
            "password": "Password1",
            "role": role
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Register a user and return just the access token.
pub async fn access_token_for(server: &TestServer, email: &str, phone: &str, role: &str) -> String {
    let body = register_user(server, email, phone, role).await;
    body["data"]["access_token"].as_str().unwrap().to_string()
}

/// Bearer header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// File a report as the given user and return its ID.
pub async fn file_report(server: &TestServer, token: &str) -> i64 {
    let response = server
        .post("/reports")
        .add_header(axum::http::header::AUTHORIZATION, bearer(token))
        .json(&json!({
            "incident": "theft",
            "details": "Bicycle stolen from the rack",
            "latitude": -1.2921,
            "longitude": 36.8219,
            "address": "Moi Avenue"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["id"].as_i64().unwrap()
}
