// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nearby-player search.
//!
//! Full scan of profiles plus activities: a player's position prefers the
//! profile's own coordinates and falls back to the creator position of
//! their most recent activity. O(users + activities) per call, which is
//! fine at current volumes; a geohash index is the upgrade path.

use crate::db::Db;
use crate::error::Result;
use crate::geo;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A profile within range, with the computed distance attached.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyPlayer {
    pub uid: String,
    pub name: String,
    pub profile_image: Option<String>,
    pub activities: Vec<String>,
    pub expertise_level: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Rounded to one decimal for display
    pub distance_km: f64,
}

#[derive(Clone)]
pub struct NearbyService {
    db: Db,
}

impl NearbyService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Players within `radius_km` of a point, nearest first. Profiles that
    /// never completed onboarding or carry no usable position are skipped.
    pub async fn nearby_players(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
        exclude_uid: Option<&str>,
    ) -> Result<Vec<NearbyPlayer>> {
        let profiles = self.db.all_profiles().await?;
        let activities = self.db.all_activities().await?;

        // Most recent activity position per creator; the scan is
        // newest-first so the first hit wins.
        let mut fallback: HashMap<&str, (f64, f64)> = HashMap::new();
        for activity in &activities {
            fallback
                .entry(activity.creator_uid.as_str())
                .or_insert((activity.creator_lat, activity.creator_long));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut players = Vec::new();
        for profile in &profiles {
            if !profile.onboarding_completed {
                continue;
            }
            if exclude_uid.is_some_and(|uid| profile.uid == uid) {
                continue;
            }
            if !seen.insert(profile.uid.as_str()) {
                continue;
            }

            let Some((p_lat, p_lon)) = profile
                .position()
                .or_else(|| fallback.get(profile.uid.as_str()).copied())
            else {
                continue;
            };

            let distance = geo::distance_km(lat, lon, p_lat, p_lon);
            if distance > radius_km {
                continue;
            }

            players.push(NearbyPlayer {
                uid: profile.uid.clone(),
                name: profile.name.clone(),
                profile_image: profile.profile_image.clone(),
                activities: profile.activities.clone(),
                expertise_level: profile.expertise_level.clone(),
                latitude: p_lat,
                longitude: p_lon,
                distance_km: geo::round_km_1dp(distance),
            });
        }

        players.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(players)
    }
}
