// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password reset by emailed six-digit code.
//!
//! Each user has at most one outstanding code, stored under the user's id;
//! requesting a new one deletes the old first. Codes do not expire; a
//! successful change consumes the code.

use crate::db::{Db, Filter};
use crate::error::{AppError, Result};
use crate::models::{ResetCode, User, OWNER_FIELD};
use crate::random;
use crate::services::credentials::Credentials;
use crate::services::mailer::{Mailer, OutgoingEmail};
use chrono::Utc;
use subtle::ConstantTimeEq;

/// Reply to every code request, whether or not the email is registered.
pub const REQUEST_ACK: &str = "Se o email existir, o código foi enviado.";

/// Reply to a successful password change.
pub const PASSWORD_CHANGED: &str = "Senha alterada com sucesso!";

const SUBJECT: &str = "Seu código de verificação";

/// Trim and lowercase an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Look up a user by (normalized) email.
pub async fn find_user_by_email(db: &Db, email: &str) -> Result<Option<User>> {
    let users: Vec<User> = db
        .find(&[Filter::eq("email", normalize_email(email))])
        .await?;
    Ok(users.into_iter().next())
}

pub struct PasswordReset<'a> {
    db: &'a Db,
    mailer: &'a Mailer,
    credentials: &'a Credentials,
    mail_from: &'a str,
}

impl<'a> PasswordReset<'a> {
    pub fn new(
        db: &'a Db,
        mailer: &'a Mailer,
        credentials: &'a Credentials,
        mail_from: &'a str,
    ) -> Self {
        Self {
            db,
            mailer,
            credentials,
            mail_from,
        }
    }

    /// Issue a fresh code and mail it, if `email` belongs to a user.
    ///
    /// Unknown addresses and delivery failures are not reported to the
    /// caller; both show up only in the logs.
    pub async fn request_code(&self, email: &str) -> Result<()> {
        let Some(user) = find_user_by_email(self.db, email).await? else {
            tracing::info!("Reset code requested for unknown email");
            return Ok(());
        };

        self.db
            .delete_where::<ResetCode>(&[Filter::eq(OWNER_FIELD, user.id.as_str())])
            .await?;

        let reset = ResetCode {
            id: user.id.clone(),
            user: user.id.clone(),
            code: random::six_digit_code()?,
            created_at: Utc::now(),
        };
        self.db.put(&reset).await?;

        let message = OutgoingEmail {
            from: self.mail_from.to_string(),
            to: user.email.clone(),
            subject: SUBJECT.to_string(),
            text: format!("Seu código para redefinir a senha é: {}", reset.code),
        };
        if let Err(e) = self.mailer.send(&message).await {
            tracing::error!(user_id = %user.id, error = %e, "Failed to send reset code");
        } else {
            tracing::info!(user_id = %user.id, "Reset code issued");
        }

        Ok(())
    }

    /// Check `code` for the user with `email` and, if it matches, set the
    /// new password and consume the code.
    pub async fn verify_and_change(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<()> {
        let mut user = find_user_by_email(self.db, email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let stored: Option<ResetCode> = self.db.get(&user.id).await?;
        let matches = stored
            .as_ref()
            .filter(|reset| reset.user == user.id)
            .is_some_and(|reset| bool::from(reset.code.as_bytes().ct_eq(code.as_bytes())));
        if !matches {
            tracing::info!(user_id = %user.id, "Reset code rejected");
            return Err(AppError::InvalidResetCode);
        }

        user.password_hash = self.credentials.hash(new_password).await?;
        self.db.put(&user).await?;
        self.db.delete::<ResetCode>(&user.id).await?;

        tracing::info!(user_id = %user.id, "Password changed via reset code");
        Ok(())
    }
}
