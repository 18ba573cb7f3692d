// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Expo push notification sender.
//!
//! Best-effort by contract: callers log and swallow failures so a push
//! outage never fails the primary workflow. Push tokens are registered by
//! the device on the user profile and cached per instance.

use crate::db::Db;
use crate::error::{AppError, Result};
use dashmap::DashMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Expo push HTTP endpoint.
const EXPO_PUSH_URL: &str = "https://exp.host/--/api/v2/push/send";

/// A push message as sent to Expo.
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    pub to: String,
    pub title: String,
    pub body: String,
    pub data: Value,
}

/// Push sender with a per-instance token cache.
#[derive(Clone)]
pub struct PushService {
    db: Db,
    token_cache: Arc<DashMap<String, String>>,
    backend: PushBackend,
}

#[derive(Clone)]
enum PushBackend {
    Expo {
        client: reqwest::Client,
        endpoint: String,
    },
    /// Records messages instead of sending them (tests, local dev).
    Noop {
        sent: Arc<Mutex<Vec<PushMessage>>>,
    },
}

impl PushService {
    pub fn new(db: Db) -> Self {
        Self {
            db,
            token_cache: Arc::new(DashMap::new()),
            backend: PushBackend::Expo {
                client: reqwest::Client::new(),
                endpoint: EXPO_PUSH_URL.to_string(),
            },
        }
    }

    /// Recording sender for tests and local development.
    pub fn noop(db: Db) -> Self {
        Self {
            db,
            token_cache: Arc::new(DashMap::new()),
            backend: PushBackend::Noop {
                sent: Arc::new(Mutex::new(Vec::new())),
            },
        }
    }

    /// Messages recorded by the noop backend.
    pub fn sent_messages(&self) -> Vec<PushMessage> {
        match &self.backend {
            PushBackend::Noop { sent } => sent.lock().expect("push log lock poisoned").clone(),
            _ => Vec::new(),
        }
    }

    /// Send a push to a user, resolving their Expo token from the profile.
    /// A user without a registered token is not an error.
    pub async fn send_to_user(
        &self,
        uid: &str,
        title: &str,
        body: &str,
        data: Value,
    ) -> Result<()> {
        let Some(token) = self.push_token(uid).await? else {
            tracing::debug!(uid, "No push token registered, skipping push");
            return Ok(());
        };

        let message = PushMessage {
            to: token,
            title: title.to_string(),
            body: body.to_string(),
            data,
        };

        match &self.backend {
            PushBackend::Expo { client, endpoint } => {
                let response = client
                    .post(endpoint)
                    .json(&message)
                    .send()
                    .await
                    .map_err(|e| {
                        AppError::Internal(anyhow::anyhow!("Expo push request failed: {}", e))
                    })?;

                if !response.status().is_success() {
                    return Err(AppError::Internal(anyhow::anyhow!(
                        "Expo push returned {}",
                        response.status()
                    )));
                }

                tracing::debug!(uid, title, "Push sent");
                Ok(())
            }
            PushBackend::Noop { sent } => {
                sent.lock().expect("push log lock poisoned").push(message);
                Ok(())
            }
        }
    }

    async fn push_token(&self, uid: &str) -> Result<Option<String>> {
        if let Some(token) = self.token_cache.get(uid) {
            return Ok(Some(token.clone()));
        }

        let token = self.db.get_profile(uid).await?.and_then(|p| p.push_token);
        if let Some(ref token) = token {
            self.token_cache.insert(uid.to_string(), token.clone());
        }
        Ok(token)
    }
}
