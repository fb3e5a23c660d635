// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod goal;
pub mod logs;
pub mod user;

pub use goal::{Goal, GoalInput};
pub use logs::{
    ActivityKind, ExerciseLog, ExerciseLogInput, Intensity, MealKind, MealLog, MealLogInput,
    SleepLog, SleepLogInput, WaterLog, WaterLogInput,
};
pub use user::{ResetCode, User, UserProfile};

use crate::db::Document;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::cmp::Ordering;
use validator::Validate;

/// Serialised name of the owning-user field on every owned document.
pub const OWNER_FIELD: &str = "user";

/// Serialised name of the server-local creation day on timestamped logs.
pub const DAY_FIELD: &str = "dia";

/// A user-owned record exposed through the CRUD API.
///
/// `Input` is the client-writable part of the record: the request body for
/// create and full update, and the base that partial updates merge into.
/// Ids, owner and timestamps are never taken from the client.
pub trait Record: Document {
    type Input: Serialize + DeserializeOwned + Validate + Send + 'static;

    /// Owning user id.
    fn owner(&self) -> &str;

    /// Id for a new record of `owner`; `None` means a fresh random id.
    fn fixed_id(_owner: &str) -> Option<String> {
        None
    }

    /// Build a new record from validated input.
    fn create(id: String, owner: &str, input: Self::Input, now: DateTime<Utc>) -> Self;

    /// Current writable fields.
    fn input(&self) -> Self::Input;

    /// Replace the writable fields.
    fn apply(&mut self, input: Self::Input);

    /// List order: newest first.
    fn newest_first(a: &Self, b: &Self) -> Ordering;
}
