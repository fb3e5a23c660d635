// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password reset routes. Public: the caller has no session.

use crate::error::Result;
use crate::extract::ValidJson;
use crate::services::password_reset::{PasswordReset, PASSWORD_CHANGED, REQUEST_ACK};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/password/request-code", post(request_code))
        .route("/api/password/verify-change", post(verify_change))
}

#[derive(Deserialize, Validate)]
pub struct RequestCodeBody {
    #[validate(email)]
    pub email: String,
}

#[derive(Deserialize, Validate)]
pub struct VerifyChangeBody {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 16))]
    pub code: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MessageResponse {
    pub message: String,
}

fn service(state: &AppState) -> PasswordReset<'_> {
    PasswordReset::new(
        &state.db,
        &state.mailer,
        &state.credentials,
        &state.config.mail_from,
    )
}

/// Mail a reset code. Answers identically for unknown addresses.
async fn request_code(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<RequestCodeBody>,
) -> Result<Json<MessageResponse>> {
    service(&state).request_code(&body.email).await?;

    Ok(Json(MessageResponse {
        message: REQUEST_ACK.to_string(),
    }))
}

async fn verify_change(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<VerifyChangeBody>,
) -> Result<Json<MessageResponse>> {
    service(&state)
        .verify_and_change(&body.email, &body.code, &body.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: PASSWORD_CHANGED.to_string(),
    }))
}
