// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore adapter for the generic document contract.
//!
//! Documents travel as `serde_json::Value`; the typed layer above decodes
//! them. Ids and creation timestamps are assigned before the write, so a
//! stored document always carries its own `id` field.

use crate::db::store::{Filter, Order, OrderDirection};
use crate::error::AppError;
use serde_json::Value;

/// Firestore-backed document store.
#[derive(Clone)]
pub struct FirestoreBackend {
    client: firestore::FirestoreDb,
}

impl FirestoreBackend {
    /// Connect to Firestore.
    ///
    /// For local development with the emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn connect(project_id: &str) -> Result<Self, AppError> {
        // The emulator path uses an unauthenticated connection to avoid
        // local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::connect_emulator(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Emulator client with a dummy token source.
    async fn connect_emulator(project_id: &str) -> Result<Self, AppError> {
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

    pub async fn insert(&self, collection: &str, id: &str, doc: &Value) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .insert()
            .into(collection)
            .document_id(id)
            .object(doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    pub async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn query(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<Order>,
        limit: Option<u32>,
    ) -> Result<Vec<Value>, AppError> {
        let filters = filters.to_vec();
        let builder = self
            .client
            .fluent()
            .select()
            .from(collection)
            .filter(move |q| {
                q.for_all(
                    filters
                        .iter()
                        .map(|f| q.field(f.field).eq(f.value.clone())),
                )
            });

        let builder = match order {
            Some((field, direction)) => builder.order_by([(field, to_query_direction(direction))]),
            None => builder,
        };
        let builder = match limit {
            Some(n) => builder.limit(n),
            None => builder,
        };

        builder
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn update(&self, collection: &str, id: &str, fields: &Value) -> Result<(), AppError> {
        let field_paths: Vec<String> = fields
            .as_object()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();

        let _: () = self
            .client
            .fluent()
            .update()
            .fields(field_paths)
            .in_col(collection)
            .document_id(id)
            .object(fields)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

fn to_query_direction(direction: OrderDirection) -> firestore::FirestoreQueryDirection {
    match direction {
        OrderDirection::Ascending => firestore::FirestoreQueryDirection::Ascending,
        OrderDirection::Descending => firestore::FirestoreQueryDirection::Descending,
    }
}
