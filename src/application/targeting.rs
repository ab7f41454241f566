use uuid::Uuid;

use crate::domain::{retain_within, Alert, GeoPoint, TargetArea, Volunteer};

/// User ids of the volunteers standing inside `area`, in input order.
pub fn volunteers_in_area(volunteers: Vec<Volunteer>, area: &TargetArea) -> Vec<Uuid> {
    retain_within(volunteers, area)
        .into_iter()
        .map(|volunteer| volunteer.user_id)
        .collect()
}

/// Whether an active alert concerns someone at `point` searching within `requested_radius_km`.
///
/// Alerts without a target area are global. Otherwise the larger of the alert's own radius
/// and the requested radius decides.
pub fn alert_applies_near(alert: &Alert, point: GeoPoint, requested_radius_km: f64) -> bool {
    match alert.target_area() {
        None => true,
        Some(area) => area.widened_to(requested_radius_km).contains(point),
    }
}

/// Available volunteers holding at least one of `skills`. Empty `skills` matches nobody.
pub fn volunteers_with_any_skill(volunteers: Vec<Volunteer>, skills: &[String]) -> Vec<Volunteer> {
    volunteers
        .into_iter()
        .filter(|volunteer| volunteer.has_any_skill(skills))
        .collect()
}
