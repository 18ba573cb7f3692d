// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scheduled-activity fan-out.
//!
//! When an activity's roster reaches `required_members`, every member of
//! the union of participants and creator gets a confirmed-attendance
//! record pointing at the other members, plus a reminder queued for one
//! hour before the start.

use crate::db::Db;
use crate::error::Result;
use crate::models::{Activity, ActivityParticipant, ScheduledActivity};
use crate::services::tasks::{reminder_time_for, ReminderPayload, TasksService};

/// One member of the fan-out union set.
#[derive(Debug, Clone)]
struct Member {
    user_id: String,
    name: String,
    image: Option<String>,
}

#[derive(Clone)]
pub struct ScheduledActivityService {
    db: Db,
    tasks: TasksService,
    service_url: String,
}

impl ScheduledActivityService {
    pub fn new(db: Db, tasks: TasksService, service_url: String) -> Self {
        Self {
            db,
            tasks,
            service_url,
        }
    }

    /// Materialize one scheduled record per member, creator included.
    ///
    /// Re-checks fullness and skips members that already have a record, so
    /// re-running after a partial failure is safe and a duplicate trigger
    /// is a no-op.
    pub async fn fan_out(
        &self,
        activity: &Activity,
        creator_name: &str,
        creator_image: Option<String>,
        participants: &[ActivityParticipant],
    ) -> Result<()> {
        let required = activity.required_members.max(1) as usize;
        if participants.len() < required {
            tracing::debug!(
                activity_id = %activity.id,
                joined = participants.len(),
                required,
                "Roster not full, skipping fan-out"
            );
            return Ok(());
        }

        let mut members: Vec<Member> = Vec::with_capacity(participants.len() + 1);
        members.push(Member {
            user_id: activity.creator_uid.clone(),
            name: creator_name.to_string(),
            image: creator_image,
        });
        for p in participants {
            if members.iter().any(|m| m.user_id == p.user_id) {
                continue;
            }
            members.push(Member {
                user_id: p.user_id.clone(),
                name: p.user_name.clone(),
                image: p.user_profile_image.clone(),
            });
        }

        for member in &members {
            if self.db.scheduled_exists(&activity.id, &member.user_id).await? {
                tracing::debug!(
                    activity_id = %activity.id,
                    user_id = %member.user_id,
                    "Scheduled activity already exists, skipping"
                );
                continue;
            }

            let others: Vec<&Member> = members
                .iter()
                .filter(|m| m.user_id != member.user_id)
                .collect();
            // partner_name carries the whole group; id/image keep only the
            // first other member (the stored shape is 1:1).
            let partner_name = others
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let (partner_user_id, partner_image) = others
                .first()
                .map(|m| (m.user_id.clone(), m.image.clone()))
                .unwrap_or_default();

            let scheduled = ScheduledActivity {
                id: String::new(),
                activity_id: activity.id.clone(),
                user_id: member.user_id.clone(),
                activity: activity.activity.clone(),
                level: activity.level.clone(),
                location: activity.location.clone(),
                location_lat: activity.location_lat,
                location_long: activity.location_long,
                date: activity.date.clone(),
                time: activity.time.clone(),
                notes: activity.notes.clone(),
                partner_user_id,
                partner_image,
                partner_name,
                notification_sent: false,
                notification_id: None,
                created_at: String::new(),
            };
            let stored = self.db.insert_scheduled(&scheduled).await?;

            self.arrange_reminder(activity, &stored).await;
        }

        tracing::info!(
            activity_id = %activity.id,
            members = members.len(),
            "Scheduled-activity fan-out complete"
        );
        Ok(())
    }

    /// Best-effort reminder: queued for one hour before start, skipped when
    /// that instant has passed or the date/time fails to parse. Failures
    /// never fail the fan-out.
    async fn arrange_reminder(&self, activity: &Activity, scheduled: &ScheduledActivity) {
        let Some(remind_at) = reminder_time_for(&activity.date, &activity.time) else {
            tracing::warn!(
                activity_id = %activity.id,
                date = %activity.date,
                time = %activity.time,
                "Unparseable activity date/time, skipping reminder"
            );
            return;
        };

        if remind_at <= chrono::Utc::now() {
            tracing::debug!(activity_id = %activity.id, "Reminder time already passed, skipping");
            return;
        }

        let payload = ReminderPayload {
            scheduled_activity_id: scheduled.id.clone(),
            user_id: scheduled.user_id.clone(),
            title: format!("Upcoming {}", activity.activity),
            body: format!(
                "Your {} at {} starts at {}",
                activity.activity, activity.location, activity.time
            ),
        };

        match self
            .tasks
            .queue_reminder(&self.service_url, payload, remind_at)
            .await
        {
            Ok(task_name) => {
                if let Err(e) = self.db.set_reminder_queued(&scheduled.id, &task_name).await {
                    tracing::warn!(
                        scheduled_id = %scheduled.id,
                        error = %e,
                        "Failed to record reminder task id"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    scheduled_id = %scheduled.id,
                    error = %e,
                    "Failed to queue reminder"
                );
            }
        }
    }
}
