// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Matchpoint: proximity matching for pickup activities
//!
//! This crate provides the backend API for the activity-finder app:
//! nearby activities and players, join requests, participant rosters,
//! and scheduled-activity reminders.

pub mod config;
pub mod db;
pub mod error;
pub mod geo;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Db;
use services::{ActivityService, JoinRequestService, NearbyService, PushService, RosterService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub activities: ActivityService,
    pub roster: RosterService,
    pub requests: JoinRequestService,
    pub nearby: NearbyService,
    pub push: PushService,
}
