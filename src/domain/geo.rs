use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Mean Earth radius used by the haversine distance, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A disc on the Earth's surface: center point plus radius in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetArea {
    pub center: GeoPoint,
    pub radius_km: f64,
}

impl TargetArea {
    pub const fn new(latitude: f64, longitude: f64, radius_km: f64) -> Self {
        Self {
            center: GeoPoint::new(latitude, longitude),
            radius_km,
        }
    }

    pub fn contains(&self, subject: GeoPoint) -> bool {
        is_within_radius(subject, self)
    }

    /// Returns the same disc with its radius raised to `requested_radius_km` when that is
    /// larger. The wider of the two radii always wins.
    pub fn widened_to(&self, requested_radius_km: f64) -> Self {
        Self {
            center: self.center,
            radius_km: self.radius_km.max(requested_radius_km),
        }
    }
}

/// Stored address of a record together with its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl Location {
    pub const fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Anything carrying a coordinate that proximity filters can test.
pub trait Locatable {
    fn geo_point(&self) -> GeoPoint;
}

impl Locatable for GeoPoint {
    fn geo_point(&self) -> GeoPoint {
        *self
    }
}

impl Locatable for Location {
    fn geo_point(&self) -> GeoPoint {
        self.point()
    }
}

/// Great-circle distance between two points in kilometers (haversine, spherical Earth).
///
/// Inputs are not range checked. Longitude wrap-around at ±180° needs no special case
/// because the formula only sees the sine of half the delta. NaN or infinite inputs
/// produce NaN.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = ((d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * central_angle
}

/// Inclusive containment: a subject exactly `radius_km` away is inside.
pub fn is_within_radius(subject: GeoPoint, area: &TargetArea) -> bool {
    distance_km(subject, area.center) <= area.radius_km
}

/// Keeps the items whose coordinate lies inside `area`, preserving order.
pub fn retain_within<T: Locatable>(items: Vec<T>, area: &TargetArea) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| area.contains(item.geo_point()))
        .collect()
}
