// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod credentials;
pub mod mailer;
pub mod password_reset;
pub mod records;
pub mod summary;

pub use credentials::Credentials;
pub use mailer::{Mailer, OutgoingEmail, Outbox};
pub use password_reset::PasswordReset;
pub use records::{delete_user_data, OwnerScope};
pub use summary::{DashboardSnapshot, WeeklyProgress};
