// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User accounts and password-reset codes.

use crate::db::{collections, Document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stored user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// PHC-style PBKDF2 hash, see [`crate::services::credentials`].
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

impl Document for User {
    const COLLECTION: &'static str = collections::USERS;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub date_joined: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            date_joined: user.date_joined,
        }
    }
}

/// Outstanding password-reset code. At most one per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetCode {
    pub id: String,
    pub user: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl Document for ResetCode {
    const COLLECTION: &'static str = collections::RESET_CODES;

    fn id(&self) -> &str {
        &self.id
    }
}
