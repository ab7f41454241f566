use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::defaults::DEFAULT_QUERY_RADIUS_KM;
use crate::domain::{Location, TargetArea};
pub use crate::error::{ErrorResponse, ValidationIssue};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct LocationDto {
    pub latitude: f64,
    pub longitude: f64,
    #[validate(length(min = 1, max = 500, message = "address must be 1-500 characters"))]
    pub address: String,
}

impl From<LocationDto> for Location {
    fn from(dto: LocationDto) -> Self {
        Self {
            latitude: dto.latitude,
            longitude: dto.longitude,
            address: dto.address,
        }
    }
}

impl From<Location> for LocationDto {
    fn from(location: Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            address: location.address,
        }
    }
}

/// Optional point-plus-radius query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocationQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
}

impl LocationQuery {
    /// The requested area, or `None` unless both coordinates are present. A missing radius
    /// falls back to [`DEFAULT_QUERY_RADIUS_KM`].
    pub fn target_area(&self) -> AppResult<Option<TargetArea>> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Ok(None);
        };
        let radius_km = validated_radius(self.radius_km)?;
        Ok(Some(TargetArea::new(latitude, longitude, radius_km)))
    }
}

/// A query radius, defaulted when absent. Rejects zero, negative and NaN.
pub fn validated_radius(radius_km: Option<f64>) -> AppResult<f64> {
    match radius_km {
        None => Ok(DEFAULT_QUERY_RADIUS_KM),
        Some(radius) if radius > 0.0 => Ok(radius),
        Some(_) => Err(AppError::validation_error("radius_km must be positive")),
    }
}

/// Splits a comma-separated query value, dropping blanks.
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_area_without_both_coordinates() {
        let only_latitude = LocationQuery {
            latitude: Some(1.0),
            ..LocationQuery::default()
        };
        assert_eq!(only_latitude.target_area().unwrap(), None);
        assert_eq!(LocationQuery::default().target_area().unwrap(), None);
    }

    #[test]
    fn missing_radius_uses_default() {
        let query = LocationQuery {
            latitude: Some(10.0),
            longitude: Some(20.0),
            radius_km: None,
        };
        assert_eq!(
            query.target_area().unwrap(),
            Some(TargetArea::new(10.0, 20.0, DEFAULT_QUERY_RADIUS_KM))
        );
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        for radius in [0.0, -3.0, f64::NAN] {
            let query = LocationQuery {
                latitude: Some(0.0),
                longitude: Some(0.0),
                radius_km: Some(radius),
            };
            assert!(matches!(
                query.target_area(),
                Err(AppError::ValidationError { .. })
            ));
        }
    }

    #[test]
    fn split_csv_trims_and_drops_blanks() {
        assert_eq!(split_csv(" first-aid, ,driving,"), vec!["first-aid", "driving"]);
        assert!(split_csv("").is_empty());
    }
}
