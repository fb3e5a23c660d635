// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fitflow::config::Config;
use fitflow::db::{Db, FirestoreDb};
use fitflow::routes::create_router;
use fitflow::services::{Credentials, Mailer, Outbox};
use fitflow::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection against the emulator.
#[allow(dead_code)]
pub async fn test_db() -> Db {
    Db::Firestore(
        FirestoreDb::new("test-project")
            .await
            .expect("Failed to connect to Firestore emulator"),
    )
}

/// Test app handles.
#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub outbox: Outbox,
}

/// Create a test app backed by the in-memory store and outbox mailer.
#[allow(dead_code)]
pub fn create_test_app() -> TestApp {
    let outbox = Outbox::default();
    create_test_app_with_mailer(Mailer::Outbox(outbox.clone()), outbox)
}

/// Create a test app with a specific mailer. `outbox` is only filled when
/// `mailer` is that outbox.
#[allow(dead_code)]
pub fn create_test_app_with_mailer(mailer: Mailer, outbox: Outbox) -> TestApp {
    let config = Config::test_default();

    let state = Arc::new(AppState {
        credentials: Credentials::new(config.pbkdf2_iterations),
        config,
        db: Db::in_memory(),
        mailer,
    });

    TestApp {
        router: create_router(state.clone()),
        state,
        outbox,
    }
}

/// Create a session JWT signed with the test key.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str) -> String {
    fitflow::middleware::auth::create_jwt(user_id, &Config::test_default().jwt_signing_key)
        .unwrap()
}

impl TestApp {
    /// Send a request and decode the JSON response (Null for empty bodies).
    #[allow(dead_code)]
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    #[allow(dead_code)]
    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    #[allow(dead_code)]
    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    /// Register a user and return `(token, user_id)`.
    #[allow(dead_code)]
    pub async fn register(&self, username: &str) -> (String, String) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/registration",
                None,
                Some(json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": "password-123",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");

        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }
}
