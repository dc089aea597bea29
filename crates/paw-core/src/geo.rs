//! Coordinates and the great-circle Distance Engine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Mean Earth radius used by the haversine formula, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range degrees.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if latitude is outside [-90, 90],
    /// longitude is outside [-180, 180], or either is NaN/infinite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Check the range invariants on an already-built coordinate.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` describing the first violated bound.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(CoreError::Validation(
                "coordinate must be finite".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CoreError::Validation(format!(
                "latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CoreError::Validation(format!(
                "longitude {} is outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Great-circle distance to `other`, in kilometers.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance(*self, *other)
    }
}

/// Great-circle distance between `a` and `b` in kilometers (haversine).
///
/// The haversine term is clamped to `[0, 1]` so rounding near antipodal
/// points cannot push `sqrt(1 - h)` into NaN.
#[must_use]
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let phi_a = a.latitude.to_radians();
    let phi_b = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (d_lambda / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * central_angle
}
