// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cloud Tasks service for deferred reminder delivery.
//!
//! A reminder is queued with a schedule_time one hour before the activity
//! start; Cloud Tasks calls back into POST /tasks/send-reminder, which
//! delivers the push and flips `notification_sent`.

use crate::error::{AppError, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// How many hours before the activity start the reminder fires.
const REMINDER_LEAD_HOURS: i64 = 1;

const REMINDER_QUEUE_NAME: &str = "activity-reminders";

/// Payload sent to the reminder callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderPayload {
    pub scheduled_activity_id: String,
    pub user_id: String,
    pub title: String,
    pub body: String,
}

/// Cloud Tasks client wrapper.
#[derive(Clone)]
pub struct TasksService {
    backend: TasksBackend,
}

#[derive(Clone)]
enum TasksBackend {
    CloudTasks {
        project_id: String,
        location: String,
        queue_name: String,
        verify_token: String,
    },
    /// Records reminders instead of queuing them (tests, local dev).
    Noop {
        queued: Arc<Mutex<Vec<(ReminderPayload, DateTime<Utc>)>>>,
    },
}

impl TasksService {
    pub fn new(project_id: &str, region: &str, verify_token: &str) -> Self {
        Self {
            backend: TasksBackend::CloudTasks {
                project_id: project_id.to_string(),
                location: region.to_string(),
                queue_name: REMINDER_QUEUE_NAME.to_string(),
                verify_token: verify_token.to_string(),
            },
        }
    }

    /// Recording backend for tests and local development.
    pub fn noop() -> Self {
        Self {
            backend: TasksBackend::Noop {
                queued: Arc::new(Mutex::new(Vec::new())),
            },
        }
    }

    /// Reminders recorded by the noop backend.
    pub fn queued_reminders(&self) -> Vec<(ReminderPayload, DateTime<Utc>)> {
        match &self.backend {
            TasksBackend::Noop { queued } => {
                queued.lock().expect("reminder log lock poisoned").clone()
            }
            _ => Vec::new(),
        }
    }

    /// Queue a reminder task scheduled at `schedule_time`.
    /// Returns the created task name.
    pub async fn queue_reminder(
        &self,
        service_url: &str,
        payload: ReminderPayload,
        schedule_time: DateTime<Utc>,
    ) -> Result<String> {
        match &self.backend {
            TasksBackend::Noop { queued } => {
                let name = format!("noop-reminder-{}", payload.scheduled_activity_id);
                queued
                    .lock()
                    .expect("reminder log lock poisoned")
                    .push((payload, schedule_time));
                Ok(name)
            }
            TasksBackend::CloudTasks {
                project_id,
                location,
                queue_name,
                verify_token,
            } => {
                use google_cloud_tasks_v2::client::CloudTasks;
                use google_cloud_tasks_v2::model::{HttpRequest, Task};

                let client = CloudTasks::builder().build().await.map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("Cloud Tasks client error: {}", e))
                })?;

                let queue_path = format!(
                    "projects/{}/locations/{}/queues/{}",
                    project_id, location, queue_name
                );

                let body = serde_json::to_vec(&payload)
                    .map_err(|e| AppError::Internal(anyhow::anyhow!("JSON error: {}", e)))?;

                let http_request = HttpRequest::default()
                    .set_url(format!("{}/tasks/send-reminder", service_url))
                    .set_http_method("POST")
                    .set_body(axum::body::Bytes::from(body))
                    .set_headers(std::collections::HashMap::from([
                        ("Content-Type".to_string(), "application/json".to_string()),
                        ("X-Tasks-Token".to_string(), verify_token.clone()),
                    ]));

                let task = Task::default()
                    .set_http_request(http_request)
                    .set_schedule_time(google_cloud_wkt::Timestamp::clamp(
                        schedule_time.timestamp(),
                        0,
                    ));

                let response = client
                    .create_task()
                    .set_parent(queue_path)
                    .set_task(task)
                    .send()
                    .await
                    .map_err(|e| {
                        AppError::Internal(anyhow::anyhow!("Cloud Tasks create error: {}", e))
                    })?;

                Ok(response.name)
            }
        }
    }
}

/// Reminder instant for an activity: start minus the lead time.
/// None when the date or time strings do not parse.
pub fn reminder_time_for(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .ok()?;
    // Activity times are stored as naive local strings; treated as UTC.
    let start = date.and_time(time).and_utc();
    Some(start - Duration::hours(REMINDER_LEAD_HOURS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_is_one_hour_before_start() {
        let remind_at = reminder_time_for("2030-06-01", "18:30").unwrap();
        assert_eq!(remind_at.to_rfc3339(), "2030-06-01T17:30:00+00:00");
    }

    #[test]
    fn test_reminder_accepts_seconds() {
        let remind_at = reminder_time_for("2030-06-01", "18:30:15").unwrap();
        assert_eq!(remind_at.to_rfc3339(), "2030-06-01T17:30:15+00:00");
    }

    #[test]
    fn test_reminder_rejects_garbage() {
        assert!(reminder_time_for("soonish", "18:30").is_none());
        assert!(reminder_time_for("2030-06-01", "evening").is_none());
        assert!(reminder_time_for("", "").is_none());
    }

    #[tokio::test]
    async fn test_noop_backend_records_reminders() {
        let tasks = TasksService::noop();
        let payload = ReminderPayload {
            scheduled_activity_id: "sa1".to_string(),
            user_id: "u1".to_string(),
            title: "Upcoming tennis".to_string(),
            body: "starts soon".to_string(),
        };
        let when = reminder_time_for("2030-06-01", "18:00").unwrap();

        let name = tasks
            .queue_reminder("http://localhost", payload, when)
            .await
            .unwrap();

        assert_eq!(name, "noop-reminder-sa1");
        let queued = tasks.queued_reminders();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].0.user_id, "u1");
        assert_eq!(queued[0].1, when);
    }
}
