// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic document-store contract with pluggable backends.
//!
//! The workflow layer needs exactly four operations: insert with a
//! store-assigned id and creation timestamp, get-by-id, equality queries
//! with optional ordering and limit, and partial (merge) updates. Keeping
//! the contract this narrow is what lets the in-memory backend stand in
//! for Firestore in tests and local development.

use crate::db::firestore::FirestoreBackend;
use crate::db::memory::MemoryStore;
use crate::error::AppError;
use crate::time_utils;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Equality filter on a top-level document field.
#[derive(Debug, Clone)]
pub struct Filter {
    pub field: &'static str,
    pub value: Value,
}

impl Filter {
    /// Build an equality filter. Values that fail to serialize compare
    /// as null.
    pub fn eq(field: &'static str, value: impl Serialize) -> Self {
        Self {
            field,
            value: serde_json::to_value(value).unwrap_or(Value::Null),
        }
    }
}

/// Sort direction for `query`.
#[derive(Debug, Clone, Copy)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

/// Ordering for `query`: field plus direction.
pub type Order = (&'static str, OrderDirection);

/// Document store with a Firestore, in-memory, or offline backend.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreBackend),
    Memory(MemoryStore),
    /// Every operation fails with an "offline" database error.
    Offline,
}

impl DocumentStore {
    /// Connect to Firestore.
    pub async fn firestore(project_id: &str) -> Result<Self, AppError> {
        Ok(Self {
            backend: Backend::Firestore(FirestoreBackend::connect(project_id).await?),
        })
    }

    /// Fully functional in-memory store for tests and local development.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(MemoryStore::default()),
        }
    }

    /// Disconnected store: all operations return an offline error.
    /// Used to exercise degraded-mode behavior.
    pub fn offline() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    /// Insert a document. The store assigns `id` and `created_at` and
    /// returns the stored form.
    pub async fn insert<T, R>(&self, collection: &str, doc: &T) -> Result<R, AppError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let mut value = serde_json::to_value(doc).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("serialize {} document: {}", collection, e))
        })?;
        let map = value.as_object_mut().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "{} document is not a JSON object",
                collection
            ))
        })?;

        let id = uuid::Uuid::new_v4().to_string();
        map.insert("id".to_string(), Value::String(id.clone()));
        map.insert(
            "created_at".to_string(),
            Value::String(time_utils::now_rfc3339()),
        );

        match &self.backend {
            Backend::Firestore(fs) => fs.insert(collection, &id, &value).await?,
            Backend::Memory(mem) => mem.insert(collection, &id, value.clone()),
            Backend::Offline => return Err(offline_error()),
        }

        decode(collection, value)
    }

    /// Fetch a document by id.
    pub async fn get_by_id<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let value = match &self.backend {
            Backend::Firestore(fs) => fs.get_by_id(collection, id).await?,
            Backend::Memory(mem) => mem.get_by_id(collection, id),
            Backend::Offline => return Err(offline_error()),
        };
        value.map(|v| decode(collection, v)).transpose()
    }

    /// Equality query with optional ordering and limit.
    pub async fn query<T>(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<Order>,
        limit: Option<u32>,
    ) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let values = match &self.backend {
            Backend::Firestore(fs) => fs.query(collection, filters, order, limit).await?,
            Backend::Memory(mem) => mem.query(collection, filters, order, limit),
            Backend::Offline => return Err(offline_error()),
        };
        values.into_iter().map(|v| decode(collection, v)).collect()
    }

    /// Merge the given fields into an existing document.
    pub async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(fs) => fs.update(collection, id, &fields).await,
            Backend::Memory(mem) => mem.update(collection, id, &fields),
            Backend::Offline => Err(offline_error()),
        }
    }
}

fn offline_error() -> AppError {
    AppError::Database(AppError::OFFLINE_ERROR.to_string())
}

fn decode<T: DeserializeOwned>(collection: &str, value: Value) -> Result<T, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Database(format!("decode {} document: {}", collection, e)))
}
