// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Great-circle distance helpers for proximity matching.

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two WGS84 coordinates, in kilometers.
///
/// Haversine formula. Accurate to ~0.3%, which is plenty for "within a
/// few kilometers" matching.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to one decimal place for display.
pub fn round_km_1dp(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
