//! Geographic point parsed from the `"lat,lng"` text attached to posts

use serde::{Deserialize, Serialize};
use std::fmt;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Error when parsing a GeoPoint from text
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeoPointParseError {
    #[error("location must be formatted as \"lat,lng\"")]
    InvalidFormat,
    #[error("latitude or longitude out of range")]
    OutOfRange,
}

impl GeoPoint {
    /// Parse `"lat,lng"`
    pub fn parse(s: &str) -> Result<Self, GeoPointParseError> {
        let (lat, lng) = s.split_once(',').ok_or(GeoPointParseError::InvalidFormat)?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| GeoPointParseError::InvalidFormat)?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| GeoPointParseError::InvalidFormat)?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(GeoPointParseError::OutOfRange);
        }

        Ok(Self { lat, lng })
    }

    /// Great-circle distance in kilometres (haversine)
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let p = GeoPoint::parse("51.5074, -0.1278").unwrap();
        assert!((p.lat - 51.5074).abs() < 1e-9);
        assert!((p.lng + 0.1278).abs() < 1e-9);

        assert_eq!(GeoPoint::parse("london"), Err(GeoPointParseError::InvalidFormat));
        assert_eq!(GeoPoint::parse("91,0"), Err(GeoPointParseError::OutOfRange));
    }

    #[test]
    fn test_distance() {
        let london = GeoPoint { lat: 51.5074, lng: -0.1278 };
        let paris = GeoPoint { lat: 48.8566, lng: 2.3522 };
        let d = london.distance_km(&paris);
        assert!((d - 343.5).abs() < 2.0, "got {d}");
        assert!(london.distance_km(&london) < 1e-9);
    }
}
