use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Easing functions available to the popup fade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseOutCubic,
}

impl EasingFunction {
    /// Apply the easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseInQuad => t * t,
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

impl Default for EasingFunction {
    fn default() -> Self {
        Self::EaseInOutQuad
    }
}

/// Main interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two f64 values
    pub fn linear(start: f64, end: f64, t: f64) -> f64 {
        start + (end - start) * t
    }

    /// Interpolation with easing function
    pub fn ease(start: f64, end: f64, t: f64, easing: EasingFunction) -> f64 {
        Self::linear(start, end, easing.apply(t))
    }
}

/// Piecewise-linear function of zoom defined by a breakpoint table.
///
/// Outside the first/last breakpoint the curve holds the nearest value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct ZoomCurve {
    stops: Vec<(f64, f64)>,
}

impl ZoomCurve {
    /// Builds a curve from `(zoom, value)` stops.
    ///
    /// Requires at least two finite stops with strictly increasing zoom.
    pub fn new(stops: Vec<(f64, f64)>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(MapError::Config(format!(
                "zoom curve needs at least 2 stops, got {}",
                stops.len()
            )));
        }
        if stops
            .iter()
            .any(|(zoom, value)| !zoom.is_finite() || !value.is_finite())
        {
            return Err(MapError::Config("zoom curve stops must be finite".to_string()));
        }
        if stops.windows(2).any(|pair| pair[1].0 <= pair[0].0) {
            return Err(MapError::Config(
                "zoom curve stops must have strictly increasing zoom".to_string(),
            ));
        }
        Ok(Self { stops })
    }

    /// A flat curve holding `value` at every zoom
    pub fn constant(value: f64) -> Self {
        Self {
            stops: vec![(0.0, value), (1.0, value)],
        }
    }

    pub fn from_stops(stops: &[(f64, f64)]) -> Result<Self> {
        Self::new(stops.to_vec())
    }

    pub fn stops(&self) -> &[(f64, f64)] {
        &self.stops
    }

    /// Value of the curve at `zoom`
    pub fn evaluate(&self, zoom: f64) -> f64 {
        let (first_zoom, first_value) = self.stops[0];
        let (last_zoom, last_value) = self.stops[self.stops.len() - 1];

        if zoom.is_nan() || zoom <= first_zoom {
            return first_value;
        }
        if zoom >= last_zoom {
            return last_value;
        }

        for pair in self.stops.windows(2) {
            let (z0, v0) = pair[0];
            let (z1, v1) = pair[1];
            if zoom <= z1 {
                let t = (zoom - z0) / (z1 - z0);
                return Interpolation::linear(v0, v1, t);
            }
        }

        last_value
    }
}

impl TryFrom<Vec<(f64, f64)>> for ZoomCurve {
    type Error = MapError;

    fn try_from(stops: Vec<(f64, f64)>) -> Result<Self> {
        Self::new(stops)
    }
}

impl From<ZoomCurve> for Vec<(f64, f64)> {
    fn from(curve: ZoomCurve) -> Self {
        curve.stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            EasingFunction::Linear,
            EasingFunction::EaseInQuad,
            EasingFunction::EaseOutQuad,
            EasingFunction::EaseInOutQuad,
            EasingFunction::EaseOutCubic,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
            assert_eq!(easing.apply(2.0), easing.apply(1.0));
        }
    }

    #[test]
    fn test_linear_interpolation() {
        assert_eq!(Interpolation::linear(0.9, 1.0, 0.0), 0.9);
        assert_eq!(Interpolation::linear(2.0, 4.0, 0.5), 3.0);
    }

    #[test]
    fn test_curve_interpolates_between_stops() {
        let curve = ZoomCurve::new(vec![(0.0, 2.0), (10.0, 22.0)]).unwrap();
        assert_eq!(curve.evaluate(5.0), 12.0);
        assert_eq!(curve.evaluate(10.0), 22.0);
    }

    #[test]
    fn test_curve_clamps_outside_range() {
        let curve = ZoomCurve::new(vec![(7.0, 1.0), (15.0, 0.4)]).unwrap();
        assert_eq!(curve.evaluate(0.0), 1.0);
        assert_eq!(curve.evaluate(22.0), 0.4);
        assert_eq!(curve.evaluate(f64::NAN), 1.0);
    }

    #[test]
    fn test_curve_with_three_segments() {
        let curve = ZoomCurve::new(vec![(0.0, 2.0), (9.0, 20.0), (15.0, 40.0)]).unwrap();
        assert_eq!(curve.evaluate(4.5), 11.0);
        assert_eq!(curve.evaluate(12.0), 30.0);
    }

    #[test]
    fn test_curve_validation() {
        assert!(ZoomCurve::new(vec![(0.0, 1.0)]).is_err());
        assert!(ZoomCurve::new(vec![(5.0, 1.0), (5.0, 2.0)]).is_err());
        assert!(ZoomCurve::new(vec![(9.0, 1.0), (2.0, 2.0)]).is_err());
        assert!(ZoomCurve::new(vec![(0.0, f64::NAN), (2.0, 2.0)]).is_err());
    }

    #[test]
    fn test_curve_deserializes_from_pairs() {
        let curve: ZoomCurve = serde_json::from_str("[[0, 1], [9, 3]]").unwrap();
        assert_eq!(curve.evaluate(4.5), 2.0);

        let bad: std::result::Result<ZoomCurve, _> = serde_json::from_str("[[0, 1]]");
        assert!(bad.is_err());
    }
}
