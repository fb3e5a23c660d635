// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with generic document operations.
//!
//! Every record type maps to one top-level collection and is stored under
//! its own id, so the whole store is expressed with five operations:
//! get, put, delete, find and delete-where.

use crate::db::{Document, Filter};
use crate::error::AppError;

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    /// Get a document by id.
    pub async fn get<D: Document>(&self, id: &str) -> Result<Option<D>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(D::COLLECTION)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or overwrite a document.
    pub async fn put<D: Document>(&self, doc: &D) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(D::COLLECTION)
            .document_id(doc.id())
            .object(doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a document by id.
    pub async fn delete<D: Document>(&self, id: &str) -> Result<(), AppError> {
        self.client
            .fluent()
            .delete()
            .from(D::COLLECTION)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Query a collection with conjunctive field filters.
    pub async fn find<D: Document>(&self, filters: &[Filter]) -> Result<Vec<D>, AppError> {
        let filters = filters.to_vec();

        self.client
            .fluent()
            .select()
            .from(D::COLLECTION)
            .filter(move |q| {
                let conditions: Vec<_> = filters
                    .iter()
                    .map(|filter| match filter {
                        Filter::Eq(field, value) => q.field(*field).eq(value.clone()),
                        Filter::AtLeast(field, value) => {
                            q.field(*field).greater_than_or_equal(value.clone())
                        }
                    })
                    .collect();
                q.for_all(conditions)
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete every matching document, in transactions of at most
    /// [`BATCH_SIZE`] writes.
    pub async fn delete_where<D: Document>(&self, filters: &[Filter]) -> Result<usize, AppError> {
        let docs: Vec<D> = self.find(filters).await?;

        for chunk in docs.chunks(BATCH_SIZE) {
            let mut transaction = self
                .client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for doc in chunk {
                self.client
                    .fluent()
                    .delete()
                    .from(D::COLLECTION)
                    .document_id(doc.id())
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            D::COLLECTION,
                            e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        tracing::debug!(
            collection = D::COLLECTION,
            count = docs.len(),
            "Batch deletion complete"
        );

        Ok(docs.len())
    }
}
