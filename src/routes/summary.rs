// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard and progress routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::services::records::OwnerScope;
use crate::services::summary::{self, DashboardSnapshot, WeeklyProgress};
use crate::time_utils::local_today;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use std::sync::Arc;

/// Summary routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/progress", get(get_progress))
}

/// Today's totals, latest sleep and goals.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DashboardSnapshot>> {
    let scope = OwnerScope::new(&state.db, &user.user_id);
    Ok(Json(summary::load_dashboard(&scope, local_today()).await?))
}

/// Last seven days of water and exercise, plus recent activities.
async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<WeeklyProgress>> {
    let scope = OwnerScope::new(&state.db, &user.user_id);
    Ok(Json(summary::load_progress(&scope, local_today()).await?))
}
