// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory document store for tests and local development.
//!
//! A functional fake of the Firestore backend: collections of JSON
//! documents with equality queries, single-field ordering, and merge
//! updates. Multi-writer safety comes from one coarse lock; contention is
//! irrelevant at the scale this backend is used at.

use crate::db::store::{Filter, Order, OrderDirection};
use crate::error::AppError;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

#[derive(Default, Clone)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, BTreeMap<String, Value>>>>,
}

impl MemoryStore {
    pub fn insert(&self, collection: &str, id: &str, doc: Value) {
        let mut guard = self.collections.write().expect("memory store lock poisoned");
        guard
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), doc);
    }

    pub fn get_by_id(&self, collection: &str, id: &str) -> Option<Value> {
        let guard = self.collections.read().expect("memory store lock poisoned");
        guard.get(collection).and_then(|docs| docs.get(id)).cloned()
    }

    pub fn query(
        &self,
        collection: &str,
        filters: &[Filter],
        order: Option<Order>,
        limit: Option<u32>,
    ) -> Vec<Value> {
        let guard = self.collections.read().expect("memory store lock poisoned");
        let mut matches: Vec<Value> = guard
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| filters.iter().all(|f| doc.get(f.field) == Some(&f.value)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some((field, direction)) = order {
            matches.sort_by(|a, b| {
                let ord = compare_fields(a.get(field), b.get(field));
                match direction {
                    OrderDirection::Ascending => ord,
                    OrderDirection::Descending => ord.reverse(),
                }
            });
        }

        if let Some(n) = limit {
            matches.truncate(n as usize);
        }

        matches
    }

    pub fn update(&self, collection: &str, id: &str, fields: &Value) -> Result<(), AppError> {
        let mut guard = self.collections.write().expect("memory store lock poisoned");
        let doc = guard
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| AppError::NotFound(format!("{}/{}", collection, id)))?;

        if let (Some(target), Some(patch)) = (doc.as_object_mut(), fields.as_object()) {
            for (key, value) in patch {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }
}

/// Missing fields sort before present ones under ascending order.
fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_values(a, b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}
