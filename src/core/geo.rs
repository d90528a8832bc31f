use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographical position in longitude/latitude order.
///
/// Serializes as a `[lng, lat]` pair, the same layout GeoJSON positions use.
/// Values built through [`Coordinate::new`] are always finite and in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    lng: f64,
    lat: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting non-finite or out-of-range values
    pub fn new(lng: f64, lat: f64) -> Result<Self> {
        if !lng.is_finite() || !lat.is_finite() {
            return Err(MapError::InvalidCoordinates(format!(
                "non-finite position ({}, {})",
                lng, lat
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(MapError::InvalidCoordinates(format!(
                "longitude {} outside [-180, 180]",
                lng
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(MapError::InvalidCoordinates(format!(
                "latitude {} outside [-90, 90]",
                lat
            )));
        }
        Ok(Self { lng, lat })
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = MapError;

    fn try_from(value: [f64; 2]) -> Result<Self> {
        Self::new(value[0], value[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lng, coord.lat]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lng, self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(-123.1207, 49.2827).unwrap();
        assert_eq!(coord.lng(), -123.1207);
        assert_eq!(coord.lat(), 49.2827);
    }

    #[test]
    fn test_coordinate_bounds_are_inclusive() {
        assert!(Coordinate::new(180.0, 90.0).is_ok());
        assert!(Coordinate::new(-180.0, -90.0).is_ok());
    }

    #[test]
    fn test_coordinate_rejects_out_of_range() {
        assert!(matches!(
            Coordinate::new(180.5, 0.0),
            Err(MapError::InvalidCoordinates(_))
        ));
        assert!(matches!(
            Coordinate::new(0.0, -91.0),
            Err(MapError::InvalidCoordinates(_))
        ));
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_coordinate_serde_uses_position_pair() {
        let coord = Coordinate::new(-123.1, 49.27).unwrap();
        let json = serde_json::to_string(&coord).unwrap();
        assert_eq!(json, "[-123.1,49.27]");

        let bad: std::result::Result<Coordinate, _> = serde_json::from_str("[200.0, 0.0]");
        assert!(bad.is_err());
    }
}
