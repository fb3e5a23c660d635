// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account routes: registration, login, logout, profile and deletion.

use crate::db::Filter;
use crate::error::{AppError, Result};
use crate::extract::ValidJson;
use crate::middleware::auth::{create_jwt, AuthUser, SESSION_COOKIE, SESSION_TTL_SECS};
use crate::models::{User, UserProfile};
use crate::random;
use crate::services::password_reset::{find_user_by_email, normalize_email};
use crate::services::records::delete_user_data;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Routes that work without a session.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/registration", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// Routes for the signed-in user (auth applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/user", get(get_me).delete(delete_account))
}

#[derive(Deserialize, Validate)]
pub struct RegistrationBody {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginBody {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Session token plus the signed-in user's profile.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(state.config.frontend_url.starts_with("https://"))
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(SESSION_TTL_SECS as i64))
        .build()
}

/// Removal must carry the same attributes the cookie was set with.
fn clear_session(state: &AppState, jar: CookieJar) -> CookieJar {
    jar.remove(session_cookie(state, String::new()))
}

fn start_session(state: &AppState, jar: CookieJar, user: &User) -> Result<(CookieJar, AuthResponse)> {
    let token = create_jwt(&user.id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let jar = jar.add(session_cookie(state, token.clone()));
    Ok((
        jar,
        AuthResponse {
            token,
            user: UserProfile::from(user),
        },
    ))
}

async fn find_by_username(state: &AppState, username: &str) -> Result<Option<User>> {
    let users: Vec<User> = state
        .db
        .find(&[Filter::eq("username", username.trim())])
        .await?;
    Ok(users.into_iter().next())
}

async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidJson(body): ValidJson<RegistrationBody>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let username = body.username.trim().to_string();
    let email = normalize_email(&body.email);

    let (by_username, by_email) = futures_util::try_join!(
        find_by_username(&state, &username),
        find_user_by_email(&state.db, &email),
    )?;
    if by_username.is_some() {
        return Err(AppError::Conflict("username already taken".to_string()));
    }
    if by_email.is_some() {
        return Err(AppError::Conflict("email already registered".to_string()));
    }

    let user = User {
        id: random::new_id()?,
        username,
        email,
        password_hash: state.credentials.hash(&body.password).await?,
        date_joined: chrono::Utc::now(),
    };
    state.db.put(&user).await?;

    tracing::info!(user_id = %user.id, "User registered");

    let (jar, response) = start_session(&state, jar, &user)?;
    Ok((StatusCode::CREATED, jar, Json(response)))
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidJson(body): ValidJson<LoginBody>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let user = find_by_username(&state, &body.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !state
        .credentials
        .verify(&body.password, &user.password_hash)
        .await?
    {
        tracing::info!(user_id = %user.id, "Login rejected");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, "User logged in");

    let (jar, response) = start_session(&state, jar, &user)?;
    Ok((jar, Json(response)))
}

/// Clear the session cookie. Bearer tokens simply expire.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (StatusCode, CookieJar) {
    (StatusCode::NO_CONTENT, clear_session(&state, jar))
}

async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile: User = state
        .db
        .get(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(UserProfile::from(&profile)))
}

/// Delete the caller's account and everything they own.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar)> {
    tracing::info!(user_id = %user.user_id, "User-initiated account deletion");

    delete_user_data(&state.db, &user.user_id).await?;

    Ok((StatusCode::NO_CONTENT, clear_session(&state, jar)))
}
