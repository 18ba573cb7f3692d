// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Matchpoint API Server
//!
//! Proximity matching for pickup activities: nearby activities and
//! players, join requests, rosters, and scheduled-activity reminders.

use matchpoint::{
    config::{Config, StoreBackend},
    db::Db,
    services::{
        ActivityService, JoinRequestService, NearbyService, PushService, RosterService,
        ScheduledActivityService, TasksService,
    },
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Matchpoint API");

    // Initialize the document store
    let db = match config.store_backend {
        StoreBackend::Firestore => Db::firestore(&config.gcp_project_id)
            .await
            .expect("Failed to connect to Firestore"),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store (data is not persisted)");
            Db::in_memory()
        }
    };

    // Push sender and reminder queue
    let push = PushService::new(db.clone());
    let tasks = TasksService::new(
        &config.gcp_project_id,
        &config.gcp_region,
        &config.tasks_verify_token,
    );
    tracing::info!(project = %config.gcp_project_id, "Cloud Tasks service initialized");

    // Workflow services
    let activities = ActivityService::new(db.clone());
    let roster = RosterService::new(db.clone());
    let scheduled =
        ScheduledActivityService::new(db.clone(), tasks, config.service_url.clone());
    let requests = JoinRequestService::new(db.clone(), roster.clone(), scheduled, push.clone());
    let nearby = NearbyService::new(db.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        activities,
        roster,
        requests,
        nearby,
        push,
    });

    // Build router
    let app = matchpoint::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("matchpoint=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
