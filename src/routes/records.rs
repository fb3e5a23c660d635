// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CRUD routes for every owned record type.
//!
//! One set of generic handlers serves goals and all four log kinds; each
//! goes through an [`OwnerScope`] for the authenticated caller.

use crate::error::Result;
use crate::extract::{JsonPatch, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::models::{ExerciseLog, Goal, MealLog, Record, SleepLog, WaterLog};
use crate::services::records::OwnerScope;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;

/// Record routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(crud_routes::<Goal>())
        .merge(crud_routes::<WaterLog>())
        .merge(crud_routes::<ExerciseLog>())
        .merge(crud_routes::<SleepLog>())
        .merge(crud_routes::<MealLog>())
}

/// `/api/{collection}` and `/api/{collection}/{id}` for one record type.
fn crud_routes<R: Record>() -> Router<Arc<AppState>> {
    let collection_path = format!("/api/{}", R::COLLECTION);
    let item_path = format!("{}/{{id}}", collection_path);

    Router::new()
        .route(&collection_path, get(list::<R>).post(create::<R>))
        .route(
            &item_path,
            get(retrieve::<R>)
                .put(update::<R>)
                .patch(partial_update::<R>)
                .delete(remove::<R>),
        )
}

async fn list<R: Record>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<R>>> {
    let scope = OwnerScope::new(&state.db, &user.user_id);
    Ok(Json(scope.list().await?))
}

async fn create<R: Record>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidJson(input): ValidJson<R::Input>,
) -> Result<(StatusCode, Json<R>)> {
    let scope = OwnerScope::new(&state.db, &user.user_id);
    let record: R = scope.create(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn retrieve<R: Record>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<R>> {
    let scope = OwnerScope::new(&state.db, &user.user_id);
    Ok(Json(scope.retrieve(&id).await?))
}

async fn update<R: Record>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<R::Input>,
) -> Result<Json<R>> {
    let scope = OwnerScope::new(&state.db, &user.user_id);
    Ok(Json(scope.update(&id, input).await?))
}

async fn partial_update<R: Record>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonPatch(patch): JsonPatch,
) -> Result<Json<R>> {
    let scope = OwnerScope::new(&state.db, &user.user_id);
    Ok(Json(scope.partial_update(&id, patch).await?))
}

async fn remove<R: Record>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let scope = OwnerScope::new(&state.db, &user.user_id);
    scope.delete::<R>(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
