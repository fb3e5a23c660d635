// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Owner-scoped access to user records.
//!
//! Handlers never touch [`Db`] directly for owned data: they build an
//! [`OwnerScope`] from the authenticated caller, and every query and mutation
//! through it is intersected with `user == caller`. A record owned by someone
//! else is indistinguishable from a missing one.

use crate::db::{Db, Filter};
use crate::error::{AppError, Result};
use crate::models::{
    ExerciseLog, Goal, MealLog, Record, ResetCode, SleepLog, User, WaterLog, DAY_FIELD,
    OWNER_FIELD,
};
use crate::random;
use chrono::{NaiveDate, Utc};
use serde_json::{Map, Value};
use validator::Validate;

/// Records stamped with the server-local day they were created on.
pub trait DailyRecord: Record {
    fn day(&self) -> NaiveDate;
}

impl DailyRecord for WaterLog {
    fn day(&self) -> NaiveDate {
        self.day
    }
}

impl DailyRecord for ExerciseLog {
    fn day(&self) -> NaiveDate {
        self.day
    }
}

impl DailyRecord for MealLog {
    fn day(&self) -> NaiveDate {
        self.day
    }
}

/// Storage access pinned to one owner.
#[derive(Clone, Copy)]
pub struct OwnerScope<'a> {
    db: &'a Db,
    owner: &'a str,
}

impl<'a> OwnerScope<'a> {
    pub fn new(db: &'a Db, owner: &'a str) -> Self {
        Self { db, owner }
    }

    pub fn owner(&self) -> &str {
        self.owner
    }

    fn owner_filter(&self) -> Filter {
        Filter::eq(OWNER_FIELD, self.owner)
    }

    fn not_found<R: Record>(id: &str) -> AppError {
        AppError::NotFound(format!("{} {} not found", R::COLLECTION, id))
    }

    /// All of the owner's records, newest first.
    pub async fn list<R: Record>(&self) -> Result<Vec<R>> {
        let mut records: Vec<R> = self.db.find(&[self.owner_filter()]).await?;
        records.sort_by(R::newest_first);
        Ok(records)
    }

    /// The owner's records created on `since` or later, newest first.
    pub async fn list_since<R: DailyRecord>(&self, since: NaiveDate) -> Result<Vec<R>> {
        let filters = [
            self.owner_filter(),
            Filter::at_least(DAY_FIELD, since.to_string()),
        ];
        let mut records: Vec<R> = self.db.find(&filters).await?;
        records.sort_by(R::newest_first);
        Ok(records)
    }

    /// The record with `id`, if it exists and belongs to the owner.
    pub async fn find<R: Record>(&self, id: &str) -> Result<Option<R>> {
        let record: Option<R> = self.db.get(id).await?;
        Ok(record.filter(|r| r.owner() == self.owner))
    }

    pub async fn retrieve<R: Record>(&self, id: &str) -> Result<R> {
        self.find(id).await?.ok_or_else(|| Self::not_found::<R>(id))
    }

    /// Create a record owned by the caller. The owner is never taken from input.
    pub async fn create<R: Record>(&self, input: R::Input) -> Result<R> {
        input.validate()?;

        let id = match R::fixed_id(self.owner) {
            Some(id) => id,
            None => random::new_id()?,
        };
        let record = R::create(id, self.owner, input, Utc::now());
        self.db.put(&record).await?;

        tracing::debug!(
            user_id = %self.owner,
            collection = R::COLLECTION,
            record_id = %record.id(),
            "Record created"
        );

        Ok(record)
    }

    /// Replace every writable field.
    pub async fn update<R: Record>(&self, id: &str, input: R::Input) -> Result<R> {
        input.validate()?;

        let mut record: R = self.retrieve(id).await?;
        record.apply(input);
        self.db.put(&record).await?;
        Ok(record)
    }

    /// Merge the supplied writable fields into the stored record.
    ///
    /// Keys that are not writable fields (`id`, `user`, timestamps, unknown
    /// names) are ignored.
    pub async fn partial_update<R: Record>(&self, id: &str, patch: Map<String, Value>) -> Result<R> {
        let mut record: R = self.retrieve(id).await?;

        let merged = merge_writable(record.input(), patch)?;
        let input: R::Input = serde_json::from_value(merged)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        input.validate()?;

        record.apply(input);
        self.db.put(&record).await?;
        Ok(record)
    }

    pub async fn delete<R: Record>(&self, id: &str) -> Result<()> {
        let record: R = self.retrieve(id).await?;
        self.db.delete::<R>(record.id()).await?;

        tracing::debug!(
            user_id = %self.owner,
            collection = R::COLLECTION,
            record_id = %id,
            "Record deleted"
        );

        Ok(())
    }
}

fn merge_writable<I: serde::Serialize>(current: I, patch: Map<String, Value>) -> Result<Value> {
    let mut base = serde_json::to_value(current)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode input: {}", e)))?;

    if let Value::Object(fields) = &mut base {
        for (key, value) in patch {
            if let Some(slot) = fields.get_mut(&key) {
                *slot = value;
            }
        }
    }

    Ok(base)
}

/// Delete a user and everything they own.
///
/// Returns the number of documents deleted.
pub async fn delete_user_data(db: &Db, user_id: &str) -> Result<usize> {
    let owned = [Filter::eq(OWNER_FIELD, user_id)];

    let (water, exercise, sleep, meals, codes) = futures_util::try_join!(
        db.delete_where::<WaterLog>(&owned),
        db.delete_where::<ExerciseLog>(&owned),
        db.delete_where::<SleepLog>(&owned),
        db.delete_where::<MealLog>(&owned),
        db.delete_where::<ResetCode>(&owned),
    )?;
    let mut deleted_count = water + exercise + sleep + meals + codes;

    if db.get::<Goal>(user_id).await?.is_some() {
        db.delete::<Goal>(user_id).await?;
        deleted_count += 1;
    }

    db.delete::<User>(user_id).await?;
    deleted_count += 1;

    tracing::info!(user_id, deleted_count, "User data deletion complete");

    Ok(deleted_count)
}
