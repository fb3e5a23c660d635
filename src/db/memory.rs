// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory document store.
//!
//! Documents are kept as `serde_json::Value` so filters see exactly the
//! field names and encodings that Firestore would.

use crate::db::{Document, Filter};
use crate::error::AppError;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

type DocKey = (&'static str, String);

/// Process-local store shared by all clones.
#[derive(Clone, Default)]
pub struct MemoryDb {
    documents: Arc<DashMap<DocKey, Value>>,
}

impl MemoryDb {
    pub fn get<D: Document>(&self, id: &str) -> Result<Option<D>, AppError> {
        let value = self
            .documents
            .get(&(D::COLLECTION, id.to_string()))
            .map(|entry| entry.value().clone());

        value.map(decode::<D>).transpose()
    }

    pub fn put<D: Document>(&self, doc: &D) -> Result<(), AppError> {
        let value = serde_json::to_value(doc).map_err(|e| {
            AppError::Database(format!("Failed to encode {} document: {}", D::COLLECTION, e))
        })?;
        self.documents
            .insert((D::COLLECTION, doc.id().to_string()), value);
        Ok(())
    }

    pub fn delete<D: Document>(&self, id: &str) {
        self.documents.remove(&(D::COLLECTION, id.to_string()));
    }

    pub fn find<D: Document>(&self, filters: &[Filter]) -> Result<Vec<D>, AppError> {
        // Clone out first so no shard lock is held while decoding.
        let values: Vec<Value> = self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == D::COLLECTION && matches_all(entry.value(), filters))
            .map(|entry| entry.value().clone())
            .collect();

        values.into_iter().map(decode::<D>).collect()
    }

    pub fn delete_where<D: Document>(&self, filters: &[Filter]) -> usize {
        let keys: Vec<DocKey> = self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == D::COLLECTION && matches_all(entry.value(), filters))
            .map(|entry| entry.key().clone())
            .collect();

        keys.iter()
            .filter(|key| self.documents.remove(*key).is_some())
            .count()
    }
}

fn decode<D: Document>(value: Value) -> Result<D, AppError> {
    serde_json::from_value(value).map_err(|e| {
        AppError::Database(format!("Corrupt {} document: {}", D::COLLECTION, e))
    })
}

/// String form of a top-level field, `None` when absent or null.
fn field_text(doc: &Value, field: &str) -> Option<String> {
    match doc.get(field)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn matches_all(doc: &Value, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| match filter {
        Filter::Eq(field, expected) => field_text(doc, field).as_deref() == Some(expected.as_str()),
        Filter::AtLeast(field, bound) => {
            field_text(doc, field).is_some_and(|actual| actual.as_str() >= bound.as_str())
        }
    })
}
