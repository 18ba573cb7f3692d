// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod join_request;
pub mod nearby;
pub mod push;
pub mod roster;
pub mod scheduled;
pub mod tasks;

pub use activity::ActivityService;
pub use join_request::JoinRequestService;
pub use nearby::{NearbyPlayer, NearbyService};
pub use push::{PushMessage, PushService};
pub use roster::{AddOutcome, RosterService};
pub use scheduled::ScheduledActivityService;
pub use tasks::{ReminderPayload, TasksService};
