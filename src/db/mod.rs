// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record store: typed JSON documents in named collections.
//!
//! Two backends speak the same document model:
//! - [`FirestoreDb`] for production (and the Firestore emulator)
//! - [`MemoryDb`] for local development and offline tests
//!
//! Callers go through [`Db`], which dispatches to whichever backend was
//! configured at startup. Nothing here knows about owners; per-user scoping
//! lives in [`crate::services::records`].

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const GOALS: &str = "metas";
    pub const WATER: &str = "agua";
    pub const EXERCISE: &str = "exercicios";
    pub const SLEEP: &str = "sono";
    pub const MEALS: &str = "refeicoes";
    pub const RESET_CODES: &str = "password_reset_codes";
}

/// A serialisable document stored under its own id in one collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection this document type lives in.
    const COLLECTION: &'static str;

    /// Document id (unique within the collection).
    fn id(&self) -> &str;
}

/// Field filter for [`Db::find`]. Values compare as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `field == value`
    Eq(&'static str, String),
    /// `field >= value` (lexicographic; used with `YYYY-MM-DD` dates)
    AtLeast(&'static str, String),
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Filter::Eq(field, value.into())
    }

    pub fn at_least(field: &'static str, value: impl Into<String>) -> Self {
        Filter::AtLeast(field, value.into())
    }
}

/// Handle to the configured record store.
#[derive(Clone)]
pub enum Db {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl Db {
    /// Connect the backend selected in `config`.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.store_backend {
            StoreBackend::Firestore => Ok(Db::Firestore(
                FirestoreDb::new(&config.gcp_project_id).await?,
            )),
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory record store; data will not survive a restart");
                Ok(Db::in_memory())
            }
        }
    }

    /// Fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Db::Memory(MemoryDb::default())
    }

    /// Fetch a document by id.
    pub async fn get<D: Document>(&self, id: &str) -> Result<Option<D>, AppError> {
        match self {
            Db::Firestore(db) => db.get(id).await,
            Db::Memory(db) => db.get(id),
        }
    }

    /// Create or replace a document under its id.
    pub async fn put<D: Document>(&self, doc: &D) -> Result<(), AppError> {
        match self {
            Db::Firestore(db) => db.put(doc).await,
            Db::Memory(db) => db.put(doc),
        }
    }

    /// Delete a document by id. Deleting a missing id is not an error.
    pub async fn delete<D: Document>(&self, id: &str) -> Result<(), AppError> {
        match self {
            Db::Firestore(db) => db.delete::<D>(id).await,
            Db::Memory(db) => {
                db.delete::<D>(id);
                Ok(())
            }
        }
    }

    /// All documents matching every filter, in no particular order.
    pub async fn find<D: Document>(&self, filters: &[Filter]) -> Result<Vec<D>, AppError> {
        match self {
            Db::Firestore(db) => db.find(filters).await,
            Db::Memory(db) => db.find(filters),
        }
    }

    /// Delete all documents matching every filter. Returns how many went.
    pub async fn delete_where<D: Document>(&self, filters: &[Filter]) -> Result<usize, AppError> {
        match self {
            Db::Firestore(db) => db.delete_where::<D>(filters).await,
            Db::Memory(db) => Ok(db.delete_where::<D>(filters)),
        }
    }
}
