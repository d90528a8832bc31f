use crate::core::{
    config::{CameraConfig, HeatmapConfig, MarkerConfig},
    geo::Coordinate,
};
use serde::{Deserialize, Serialize};

/// How the engine should move to new camera params
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CameraAnimation {
    FlyTo { duration_ms: u64 },
    None,
}

/// Camera placement handed to the rendering engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraParams {
    pub center: Coordinate,
    /// Always finite and >= 0
    pub zoom: f64,
    /// Degrees in [0, 90]
    pub pitch: f64,
    /// Degrees in [0, 360)
    pub heading: f64,
    pub animation: CameraAnimation,
}

/// Tracks the camera and derives the zoom-bound visual parameters.
///
/// Params stay `None` until [`CameraState::initialize`] runs with the user
/// location; the map is not drawn before that.
#[derive(Debug, Clone)]
pub struct CameraState {
    config: CameraConfig,
    markers: MarkerConfig,
    heatmap: HeatmapConfig,
    params: Option<CameraParams>,
}

impl CameraState {
    pub fn new(config: CameraConfig, markers: MarkerConfig, heatmap: HeatmapConfig) -> Self {
        Self {
            config,
            markers,
            heatmap,
            params: None,
        }
    }

    /// Places the camera at `center` with the default zoom, looking straight down
    pub fn initialize(&mut self, center: Coordinate) -> CameraParams {
        let params = CameraParams {
            center,
            zoom: self.config.default_zoom,
            pitch: 0.0,
            heading: 0.0,
            animation: CameraAnimation::FlyTo {
                duration_ms: self.config.animation_duration_ms,
            },
        };
        log::info!("camera initialized at {} zoom {}", center, params.zoom);
        self.params = Some(params);
        params
    }

    pub fn params(&self) -> Option<&CameraParams> {
        self.params.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.params.is_some()
    }

    /// Current zoom, if the camera has been placed
    pub fn zoom(&self) -> Option<f64> {
        self.params.map(|p| p.zoom)
    }

    /// Records the zoom the engine settled on. Center, pitch and heading are
    /// not taken from the engine.
    ///
    /// Returns `false` when the observation was dropped: non-finite or
    /// negative zoom, or no camera yet.
    pub fn on_region_settled(&mut self, observed_zoom: f64) -> bool {
        if !observed_zoom.is_finite() || observed_zoom < 0.0 {
            log::debug!("dropping malformed zoom observation {}", observed_zoom);
            return false;
        }
        match self.params.as_mut() {
            Some(params) => {
                params.zoom = observed_zoom;
                true
            }
            None => {
                log::debug!("zoom observation before camera init ignored");
                false
            }
        }
    }

    /// Sets pitch and heading from the perspective mode. The only writer of
    /// either value.
    pub fn set_perspective(&mut self, is_3d: bool) -> Option<CameraParams> {
        let (pitch, heading) = if is_3d {
            (self.config.tilted_pitch, self.config.tilted_heading)
        } else {
            (0.0, 0.0)
        };
        let params = self.params.as_mut()?;
        params.pitch = pitch;
        params.heading = heading;
        Some(*params)
    }

    /// `clamp(zoom / divisor, min, max)`; non-decreasing in zoom
    pub fn derive_marker_scale(&self, zoom: f64) -> f64 {
        let MarkerConfig {
            min_scale,
            max_scale,
            zoom_divisor,
            ..
        } = self.markers;
        if zoom.is_nan() {
            return min_scale;
        }
        (zoom / zoom_divisor).clamp(min_scale, max_scale)
    }

    pub fn derive_heatmap_radius(&self, zoom: f64) -> f64 {
        self.heatmap.radius.evaluate(zoom)
    }

    pub fn derive_heatmap_intensity(&self, zoom: f64) -> f64 {
        self.heatmap.intensity.evaluate(zoom)
    }

    pub fn derive_heatmap_opacity(&self, zoom: f64) -> f64 {
        self.heatmap.opacity.evaluate(zoom)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(
            CameraConfig::default(),
            MarkerConfig::default(),
            HeatmapConfig::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vancouver() -> Coordinate {
        Coordinate::new(-123.12, 49.28).unwrap()
    }

    #[test]
    fn test_initialize_uses_defaults() {
        let mut camera = CameraState::default();
        assert!(camera.params().is_none());

        let params = camera.initialize(vancouver());
        assert_eq!(params.zoom, 14.0);
        assert_eq!(params.pitch, 0.0);
        assert_eq!(params.heading, 0.0);
        assert_eq!(params.center, vancouver());
        assert_eq!(params.animation, CameraAnimation::FlyTo { duration_ms: 1000 });
        assert!(camera.is_initialized());
    }

    #[test]
    fn test_region_settled_updates_zoom_only() {
        let mut camera = CameraState::default();
        camera.initialize(vancouver());
        camera.set_perspective(true);

        assert!(camera.on_region_settled(16.5));
        let params = camera.params().unwrap();
        assert_eq!(params.zoom, 16.5);
        assert_eq!(params.pitch, 60.0);
        assert_eq!(params.center, vancouver());
    }

    #[test]
    fn test_region_settled_drops_malformed_zoom() {
        let mut camera = CameraState::default();
        camera.initialize(vancouver());

        for bad in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(!camera.on_region_settled(bad));
            assert_eq!(camera.zoom(), Some(14.0));
        }
        assert!(camera.on_region_settled(0.0));
        assert_eq!(camera.zoom(), Some(0.0));
    }

    #[test]
    fn test_region_settled_before_init_is_noop() {
        let mut camera = CameraState::default();
        assert!(!camera.on_region_settled(12.0));
        assert!(camera.params().is_none());
    }

    #[test]
    fn test_perspective_round_trip() {
        let mut camera = CameraState::default();
        assert!(camera.set_perspective(true).is_none());

        camera.initialize(vancouver());
        let tilted = camera.set_perspective(true).unwrap();
        assert_eq!((tilted.pitch, tilted.heading), (60.0, 20.0));

        let flat = camera.set_perspective(false).unwrap();
        assert_eq!((flat.pitch, flat.heading), (0.0, 0.0));
    }

    #[test]
    fn test_marker_scale_bounds_and_monotonicity() {
        let camera = CameraState::default();
        let mut previous = f64::MIN;
        for step in 0..=300 {
            let zoom = step as f64 / 10.0;
            let scale = camera.derive_marker_scale(zoom);
            assert!((0.8..=1.8).contains(&scale), "zoom {} -> {}", zoom, scale);
            assert!(scale >= previous);
            assert_eq!(scale, camera.derive_marker_scale(zoom));
            previous = scale;
        }
        assert_eq!(camera.derive_marker_scale(14.0), 1.4);
        assert_eq!(camera.derive_marker_scale(2.0), 0.8);
        assert_eq!(camera.derive_marker_scale(25.0), 1.8);
    }

    #[test]
    fn test_heatmap_curves() {
        let camera = CameraState::default();
        assert_eq!(camera.derive_heatmap_radius(0.0), 2.0);
        assert_eq!(camera.derive_heatmap_radius(9.0), 20.0);
        assert_eq!(camera.derive_heatmap_radius(30.0), 40.0);
        assert_eq!(camera.derive_heatmap_intensity(4.5), 2.0);
        assert_eq!(camera.derive_heatmap_intensity(20.0), 3.0);
        assert_eq!(camera.derive_heatmap_opacity(3.0), 1.0);
        assert_eq!(camera.derive_heatmap_opacity(15.0), 0.4);
    }
}
