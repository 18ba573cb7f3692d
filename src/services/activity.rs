// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity repository: creation and proximity queries.

use crate::db::Db;
use crate::error::Result;
use crate::geo;
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, NewActivity};

/// Bounded fetch window for the radius query.
///
/// Filtering happens client-side after a recency-bounded fetch rather than
/// via a geo index, so activities older than the window are not considered
/// even when nearby. Acceptable while activity volume stays low.
const RECENT_FETCH_LIMIT: u32 = 50;

#[derive(Clone)]
pub struct ActivityService {
    db: Db,
}

impl ActivityService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Create an activity owned by the authenticated caller.
    ///
    /// No date or coordinate-range validation happens here; the client owns
    /// those. `video_uri` is stored as an explicit null when absent.
    pub async fn create(&self, creator: &AuthUser, input: NewActivity) -> Result<Activity> {
        let activity = Activity {
            id: String::new(),
            creator_uid: creator.uid.clone(),
            creator_lat: input.creator_lat,
            creator_long: input.creator_long,
            location: input.location,
            location_lat: input.location_lat,
            location_long: input.location_long,
            activity: input.activity,
            level: input.level,
            date: input.date,
            time: input.time,
            notes: input.notes,
            video_uri: input.video_uri,
            required_members: input.required_members,
            created_at: String::new(),
        };

        let stored = self.db.insert_activity(&activity).await?;
        tracing::info!(
            activity_id = %stored.id,
            creator = %stored.creator_uid,
            activity = %stored.activity,
            "Activity created"
        );
        Ok(stored)
    }

    /// Recent activities whose venue lies within `radius_km` of a point,
    /// newest first. `exclude_uid` drops that creator's own activities.
    pub async fn list_within_radius(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
        exclude_uid: Option<&str>,
    ) -> Result<Vec<Activity>> {
        let recent = self.db.recent_activities(RECENT_FETCH_LIMIT).await?;

        let mut nearby: Vec<Activity> = recent
            .into_iter()
            .filter(|a| exclude_uid.map_or(true, |uid| a.creator_uid != uid))
            .filter(|a| geo::distance_km(lat, lon, a.location_lat, a.location_long) <= radius_km)
            .collect();

        // The fetch is already newest-first; re-sort to keep the contract
        // independent of backend ordering quirks.
        nearby.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(nearby)
    }

    /// A user's own activities, newest first.
    pub async fn list_for_user(&self, uid: &str) -> Result<Vec<Activity>> {
        self.db.activities_for_user(uid).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Activity>> {
        self.db.get_activity(id).await
    }
}
