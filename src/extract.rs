// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request body extractors that fail with [`AppError`] instead of axum's
//! plain-text rejections.

use crate::error::AppError;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

async fn json_body<T, S>(req: Request, state: &S) -> Result<T, AppError>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    let Json(value) = Json::<T>::from_request(req, state)
        .await
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(value)
}

/// JSON body that has passed its `validator` rules.
///
/// Malformed JSON is a `bad_request`; a rule violation is a
/// `validation_error`.
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value: T = json_body(req, state).await?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

/// JSON object body for partial updates. Validation happens after merging.
pub struct JsonPatch(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonPatch
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(JsonPatch(json_body(req, state).await?))
    }
}
