// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password reset flow over HTTP.

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, Method, Request, StatusCode},
};
use fitflow::services::mailer::HttpMailer;
use fitflow::services::{Mailer, Outbox};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn request_code(app: &common::TestApp, email: &str) -> (StatusCode, Value) {
    app.send(
        Method::POST,
        "/api/password/request-code",
        None,
        Some(json!({ "email": email })),
    )
    .await
}

async fn verify_change(
    app: &common::TestApp,
    email: &str,
    code: &str,
    new_password: &str,
) -> (StatusCode, Value) {
    app.send(
        Method::POST,
        "/api/password/verify-change",
        None,
        Some(json!({ "email": email, "code": code, "new_password": new_password })),
    )
    .await
}

async fn login(app: &common::TestApp, username: &str, password: &str) -> StatusCode {
    app.send(
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await
    .0
}

fn mailed_code(app: &common::TestApp, email: &str) -> String {
    let message = app.outbox.last_to(email).expect("no reset email sent");
    message
        .text
        .split(|c: char| !c.is_ascii_digit())
        .find(|part| part.len() == 6)
        .expect("no code in email")
        .to_string()
}

fn different_code(code: &str) -> &'static str {
    if code == "000000" {
        "111111"
    } else {
        "000000"
    }
}

#[tokio::test]
async fn test_request_code_response_does_not_disclose_registration() {
    let app = common::create_test_app();
    app.register("alice").await;

    let known = request_code(&app, "alice@example.com").await;
    let unknown = request_code(&app, "nobody@example.com").await;

    assert_eq!(known, unknown);
    assert_eq!(known.0, StatusCode::OK);
    assert_eq!(
        known.1,
        json!({"message": "Se o email existir, o código foi enviado."})
    );

    assert_eq!(app.outbox.messages().len(), 1);
    assert!(app.outbox.last_to("nobody@example.com").is_none());
}

#[tokio::test]
async fn test_reset_changes_password_once() {
    let app = common::create_test_app();
    app.register("alice").await;

    request_code(&app, "alice@example.com").await;
    let code = mailed_code(&app, "alice@example.com");

    let (status, body) = verify_change(&app, "alice@example.com", &code, "brand-new-pw").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Senha alterada com sucesso!"}));

    assert_eq!(login(&app, "alice", "brand-new-pw").await, StatusCode::OK);
    assert_eq!(
        login(&app, "alice", "password-123").await,
        StatusCode::UNAUTHORIZED
    );

    let (status, body) = verify_change(&app, "alice@example.com", &code, "another-pw-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Código inválido ou expirado."}));
}

#[tokio::test]
async fn test_second_request_invalidates_first_code() {
    let app = common::create_test_app();
    app.register("alice").await;

    request_code(&app, "alice@example.com").await;
    let first = mailed_code(&app, "alice@example.com");
    let second = loop {
        request_code(&app, "alice@example.com").await;
        let code = mailed_code(&app, "alice@example.com");
        if code != first {
            break code;
        }
    };

    let (status, body) = verify_change(&app, "alice@example.com", &first, "brand-new-pw").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Código inválido ou expirado.");

    let (status, _) = verify_change(&app, "alice@example.com", &second, "brand-new-pw").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_code_rejected() {
    let app = common::create_test_app();
    app.register("alice").await;

    request_code(&app, "alice@example.com").await;
    let code = mailed_code(&app, "alice@example.com");

    let (status, body) = verify_change(
        &app,
        "alice@example.com",
        different_code(&code),
        "brand-new-pw",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Código inválido ou expirado.");
    assert_eq!(login(&app, "alice", "password-123").await, StatusCode::OK);
}

#[tokio::test]
async fn test_verify_unknown_email() {
    let app = common::create_test_app();

    let (status, body) = verify_change(&app, "nobody@example.com", "123456", "brand-new-pw").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Usuário não encontrado."}));
}

#[tokio::test]
async fn test_short_new_password_rejected() {
    let app = common::create_test_app();
    app.register("alice").await;
    request_code(&app, "alice@example.com").await;
    let code = mailed_code(&app, "alice@example.com");

    let (status, body) = verify_change(&app, "alice@example.com", &code, "short").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    // The code survives a rejected attempt.
    let (status, _) = verify_change(&app, "alice@example.com", &code, "long-enough").await;
    assert_eq!(status, StatusCode::OK);
}

async fn request_code_raw(app: &common::TestApp, email: &str) -> (StatusCode, Bytes) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/password/request-code")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "email": email }).to_string()))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, to_bytes(response.into_body(), usize::MAX).await.unwrap())
}

#[tokio::test]
async fn test_request_code_hides_mail_failure() {
    // Nothing listens on port 9 locally.
    let mailer = HttpMailer::new("http://127.0.0.1:9/send".to_string(), None).unwrap();
    let app = common::create_test_app_with_mailer(Mailer::Http(mailer), Outbox::default());
    app.register("alice").await;

    let known = request_code_raw(&app, "alice@example.com").await;
    let unknown = request_code_raw(&app, "nobody@example.com").await;

    assert_eq!(known.0, StatusCode::OK);
    assert_eq!(known, unknown);
    let body: Value = serde_json::from_slice(&known.1).unwrap();
    assert_eq!(
        body,
        json!({"message": "Se o email existir, o código foi enviado."})
    );
}
