//! Coordinates and great-circle distance.
//!
//! Distances use the spherical law of cosines on a sphere where one degree
//! of arc is 60 nautical miles, converted to statute miles.

pub use error::CoordinateError;

const NAUTICAL_MILES_PER_DEGREE: f64 = 60.0;
const STATUTE_MILES_PER_NAUTICAL_MILE: f64 = 1.1515;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Validated constructor.
    ///
    /// ```rust
    /// use rocket_search::GeoPoint;
    ///
    /// assert!(GeoPoint::new(40.7765868, -111.9905245).is_ok());
    /// assert!(GeoPoint::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        let point = Self::new_unchecked(latitude, longitude);
        point.validate()?;
        Ok(point)
    }

    /// Builds a point without range checks, for data that is already trusted.
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(CoordinateError::NonFinite {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// Great-circle distance to `other` in statute miles.
    pub fn distance_to(&self, other: &Self) -> f64 {
        great_circle_miles(self, other)
    }
}

/// Great-circle distance between two points in statute miles.
///
/// Pure and total: out-of-range inputs give a meaningless number rather than
/// an error. The cosine is clamped to `[-1, 1]` before `acos`, and identical
/// points are exactly zero miles apart.
pub fn great_circle_miles(from: &GeoPoint, to: &GeoPoint) -> f64 {
    if from == to {
        return 0.0;
    }
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lon = (from.longitude - to.longitude).to_radians();

    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * delta_lon.cos();
    cos_angle.clamp(-1.0, 1.0).acos().to_degrees()
        * NAUTICAL_MILES_PER_DEGREE
        * STATUTE_MILES_PER_NAUTICAL_MILE
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, Copy, PartialEq)]
    pub enum CoordinateError {
        #[error("Latitude {0} is outside [-90, 90]")]
        LatitudeOutOfRange(f64),
        #[error("Longitude {0} is outside [-180, 180]")]
        LongitudeOutOfRange(f64),
        #[error("Coordinates must be finite, got ({latitude}, {longitude})")]
        NonFinite { latitude: f64, longitude: f64 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLC: GeoPoint = GeoPoint::new_unchecked(40.7765868, -111.9905245);
    const LONDON: GeoPoint = GeoPoint::new_unchecked(51.5282914, -0.3886621);
    const NEAR_SLC: GeoPoint = GeoPoint::new_unchecked(39.7765868, -110.9905245);

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let points = [
            SLC,
            LONDON,
            NEAR_SLC,
            GeoPoint::new_unchecked(0.0, 0.0),
            GeoPoint::new_unchecked(90.0, 180.0),
            GeoPoint::new_unchecked(-89.999999, -179.999999),
            GeoPoint::new_unchecked(12.345678901234, 98.765432109876),
        ];
        for point in points {
            assert_eq!(great_circle_miles(&point, &point), 0.0, "{point:?}");
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [(SLC, LONDON), (NEAR_SLC, SLC), (LONDON, NEAR_SLC)];
        for (a, b) in pairs {
            assert_eq!(a.distance_to(&b), b.distance_to(&a));
        }
    }

    #[test]
    fn test_known_distances() {
        assert_close(NEAR_SLC.distance_to(&SLC), 86.90, 0.01);
        assert_close(NEAR_SLC.distance_to(&LONDON), 4875.64, 0.01);
        // Half the circumference: 180 degrees * 60 * 1.1515
        assert_close(
            great_circle_miles(
                &GeoPoint::new_unchecked(0.0, 0.0),
                &GeoPoint::new_unchecked(0.0, 180.0),
            ),
            12436.2,
            1e-6,
        );
    }

    #[test]
    fn test_antipodal_distance_is_deterministic() {
        let north = GeoPoint::new_unchecked(89.99999999, 0.0);
        let south = GeoPoint::new_unchecked(-89.99999999, 179.99999999);
        let first = great_circle_miles(&north, &south);
        let second = great_circle_miles(&north, &south);
        assert!(first.is_finite());
        assert_eq!(first, second);

        let pole = GeoPoint::new_unchecked(90.0, 0.0);
        let other_pole = GeoPoint::new_unchecked(-90.0, 0.0);
        assert!(great_circle_miles(&pole, &other_pole).is_finite());
    }

    #[test]
    fn test_validation() {
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert_eq!(
            GeoPoint::new(90.5, 0.0),
            Err(CoordinateError::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            GeoPoint::new(0.0, -180.5),
            Err(CoordinateError::LongitudeOutOfRange(-180.5))
        );
        assert!(matches!(
            GeoPoint::new(f64::NAN, 0.0),
            Err(CoordinateError::NonFinite { .. })
        ));
        assert!(GeoPoint::new_unchecked(120.0, 0.0).validate().is_err());
    }
}
