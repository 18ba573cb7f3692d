// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Join-request state machine models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a join request. `Pending` is the only non-terminal state;
/// once accepted or declined a request never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Declined => "declined",
        };
        f.write_str(s)
    }
}

/// A join request in the `join_requests` collection. Doubles as the
/// recipient's notification feed entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    #[serde(default)]
    pub id: String,
    /// The activity creator being asked
    pub recipient_uid: String,
    /// The prospective participant
    pub sender_uid: String,
    pub activity_id: String,
    pub status: RequestStatus,
    /// Sender display snapshot taken at request time
    pub sender_name: String,
    pub sender_image: Option<String>,
    /// Activity type, for rendering the notification
    pub activity_name: String,
    #[serde(default)]
    pub created_at: String,
    /// Set when the recipient resolves the request
    pub updated_at: Option<String>,
}

/// API input for creating a join request.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJoinRequest {
    pub recipient_uid: String,
    pub activity_id: String,
}
