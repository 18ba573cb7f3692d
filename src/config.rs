// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Document store backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    /// Non-persistent store for local development and tests.
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project ID (Firestore + Cloud Tasks)
    pub gcp_project_id: String,
    /// GCP region hosting the Cloud Tasks queue
    pub gcp_region: String,
    /// Frontend URL for CORS (Expo dev server in local development)
    pub frontend_url: String,
    /// Public URL of this service, used for Cloud Tasks callbacks
    pub service_url: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Shared token checked on /tasks/* callbacks
    pub tasks_verify_token: String,
    /// Which document store backend to use
    pub store_backend: StoreBackend,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Secrets come from env vars in all environments; Cloud Run injects
    /// them via secret bindings.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store_backend = match env::var("STORE_BACKEND").as_deref() {
            Ok("memory") => StoreBackend::Memory,
            _ => StoreBackend::Firestore,
        };

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            gcp_region: env::var("GCP_REGION").unwrap_or_else(|_| "us-west1".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:19006".to_string()),
            service_url: env::var("SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            tasks_verify_token: env::var("TASKS_VERIFY_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("TASKS_VERIFY_TOKEN"))?,
            store_backend,
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            gcp_region: "us-west1".to_string(),
            frontend_url: "http://localhost:19006".to_string(),
            service_url: "http://localhost:8080".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            tasks_verify_token: "test_verify_token".to_string(),
            store_backend: StoreBackend::Memory,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
