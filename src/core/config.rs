//! Configuration for the photo-spot map screen
//!
//! Every knob that shapes the derived view state (camera defaults, marker
//! scaling, heatmap curves, extrusion, basemap styles, popup fade) lives in
//! [`SpotMapConfig`]. Configs come from a preset [`SpotMapProfile`] or from
//! JSON, where omitted fields fall back to the defaults in
//! [`crate::core::constants`].

use crate::{
    animation::interpolation::{EasingFunction, ZoomCurve},
    core::constants,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum SpotMapProfile {
    /// Full-size photo markers, as on a phone screen
    Standard,
    /// Smaller markers and a tighter heatmap for dense catalogs
    Compact,
    Custom(SpotMapConfig),
}

impl SpotMapProfile {
    pub fn resolve(&self) -> SpotMapConfig {
        match self {
            Self::Standard => SpotMapConfig::default(),
            Self::Compact => SpotMapConfig {
                markers: MarkerConfig {
                    min_scale: 0.6,
                    max_scale: 1.3,
                    zoom_divisor: 12.0,
                    icon_size: 40.0,
                    border_width: 2.0,
                },
                heatmap: HeatmapConfig {
                    radius: curve_or_default(&[(0.0, 1.0), (9.0, 12.0), (15.0, 24.0)]),
                    ..HeatmapConfig::default()
                },
                ..SpotMapConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for SpotMapProfile {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotMapConfig {
    pub camera: CameraConfig,
    pub markers: MarkerConfig,
    pub heatmap: HeatmapConfig,
    pub extrusion: ExtrusionConfig,
    pub styles: StyleConfig,
    pub popup: PopupConfig,
    pub controls: MapControls,
}

impl SpotMapConfig {
    /// Parses a config from JSON and validates it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("loading map config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Checks cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.camera.validate()?;
        self.markers.validate()?;
        self.heatmap.validate()?;
        self.extrusion.validate()?;
        self.controls.validate()?;
        self.popup.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub default_zoom: f64,
    pub tilted_pitch: f64,
    pub tilted_heading: f64,
    pub animation_duration_ms: u64,
    pub start_in_3d: bool,
}

impl CameraConfig {
    fn validate(&self) -> Result<()> {
        if !self.default_zoom.is_finite() || self.default_zoom < 0.0 {
            return Err(MapError::Config(format!(
                "default zoom must be finite and >= 0, got {}",
                self.default_zoom
            )));
        }
        if !(0.0..=90.0).contains(&self.tilted_pitch) {
            return Err(MapError::Config(format!(
                "tilted pitch {} outside [0, 90]",
                self.tilted_pitch
            )));
        }
        if !(0.0..360.0).contains(&self.tilted_heading) {
            return Err(MapError::Config(format!(
                "tilted heading {} outside [0, 360)",
                self.tilted_heading
            )));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_zoom: constants::DEFAULT_ZOOM,
            tilted_pitch: constants::TILTED_PITCH,
            tilted_heading: constants::TILTED_HEADING,
            animation_duration_ms: constants::CAMERA_ANIMATION_MS,
            start_in_3d: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_divisor: f64,
    pub icon_size: f64,
    pub border_width: f64,
}

impl MarkerConfig {
    fn validate(&self) -> Result<()> {
        if !self.min_scale.is_finite() || !self.max_scale.is_finite() || self.min_scale <= 0.0 {
            return Err(MapError::Config(
                "marker scale bounds must be finite and positive".to_string(),
            ));
        }
        if self.min_scale > self.max_scale {
            return Err(MapError::Config(format!(
                "marker min scale {} exceeds max scale {}",
                self.min_scale, self.max_scale
            )));
        }
        if !self.zoom_divisor.is_finite() || self.zoom_divisor <= 0.0 {
            return Err(MapError::Config(format!(
                "marker zoom divisor must be positive, got {}",
                self.zoom_divisor
            )));
        }
        Ok(())
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            min_scale: constants::MARKER_MIN_SCALE,
            max_scale: constants::MARKER_MAX_SCALE,
            zoom_divisor: constants::MARKER_SCALE_DIVISOR,
            icon_size: constants::MARKER_ICON_SIZE,
            border_width: constants::MARKER_BORDER_WIDTH,
        }
    }
}

/// Zoom-bound heatmap style curves. Each curve validates itself on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub radius: ZoomCurve,
    pub intensity: ZoomCurve,
    pub opacity: ZoomCurve,
    pub visible: bool,
}

impl HeatmapConfig {
    // Curves interpolate between stops and clamp at the ends, so bounding the
    // stop values bounds every derived value.
    fn validate(&self) -> Result<()> {
        check_stops("heatmap radius", &self.radius, |v| v >= 0.0, ">= 0")?;
        check_stops("heatmap intensity", &self.intensity, |v| v >= 0.0, ">= 0")?;
        check_stops(
            "heatmap opacity",
            &self.opacity,
            |v| (0.0..=1.0).contains(&v),
            "in [0, 1]",
        )?;
        Ok(())
    }
}

fn check_stops(
    name: &str,
    curve: &ZoomCurve,
    accept: impl Fn(f64) -> bool,
    expected: &str,
) -> Result<()> {
    match curve.stops().iter().find(|(_, value)| !accept(*value)) {
        Some((zoom, value)) => Err(MapError::Config(format!(
            "{} at zoom {} is {}, expected {}",
            name, zoom, value, expected
        ))),
        None => Ok(()),
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            radius: curve_or_default(&constants::HEATMAP_RADIUS_STOPS),
            intensity: curve_or_default(&constants::HEATMAP_INTENSITY_STOPS),
            opacity: curve_or_default(&constants::HEATMAP_OPACITY_STOPS),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrusionConfig {
    pub min_zoom: f64,
    pub color: String,
    pub opacity: f64,
    pub source_url: String,
    pub source_layer: String,
}

impl ExtrusionConfig {
    fn validate(&self) -> Result<()> {
        if !self.min_zoom.is_finite() || self.min_zoom < 0.0 {
            return Err(MapError::Config(format!(
                "extrusion min zoom must be finite and >= 0, got {}",
                self.min_zoom
            )));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(MapError::Config(format!(
                "extrusion opacity {} outside [0, 1]",
                self.opacity
            )));
        }
        Ok(())
    }
}

impl Default for ExtrusionConfig {
    fn default() -> Self {
        Self {
            min_zoom: constants::EXTRUSION_MIN_ZOOM,
            color: constants::EXTRUSION_COLOR.to_string(),
            opacity: constants::EXTRUSION_OPACITY,
            source_url: constants::EXTRUSION_SOURCE_URL.to_string(),
            source_layer: constants::EXTRUSION_SOURCE_LAYER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub day: String,
    pub night: String,
    pub start_at_night: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            day: constants::DAY_STYLE.to_string(),
            night: constants::NIGHT_STYLE.to_string(),
            start_at_night: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub fade_duration_ms: u64,
    pub easing: EasingFunction,
    /// Scale the popup grows from while entering
    pub start_scale: f64,
}

impl PopupConfig {
    fn validate(&self) -> Result<()> {
        if !(self.start_scale > 0.0 && self.start_scale <= 1.0) {
            return Err(MapError::Config(format!(
                "popup start scale {} outside (0, 1]",
                self.start_scale
            )));
        }
        Ok(())
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            fade_duration_ms: constants::POPUP_FADE_MS,
            easing: EasingFunction::EaseInOutQuad,
            start_scale: constants::POPUP_START_SCALE,
        }
    }
}

/// Map chrome and gesture switches handed through to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapControls {
    pub compass: bool,
    pub pitch_enabled: bool,
    pub rotate_enabled: bool,
    pub logo: bool,
    /// Draw the user's position once it is known
    pub user_location: bool,
    pub heading_indicator: bool,
}

impl MapControls {
    fn validate(&self) -> Result<()> {
        if self.heading_indicator && !self.user_location {
            return Err(MapError::Config(
                "heading indicator requires the user location marker".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MapControls {
    fn default() -> Self {
        Self {
            compass: true,
            pitch_enabled: true,
            rotate_enabled: true,
            logo: false,
            user_location: true,
            heading_indicator: true,
        }
    }
}

// The built-in stop tables are valid; a broken table degrades to a flat curve
// at its first value instead of panicking.
fn curve_or_default(stops: &[(f64, f64)]) -> ZoomCurve {
    ZoomCurve::from_stops(stops).unwrap_or_else(|e| {
        log::error!("invalid built-in zoom curve: {}", e);
        ZoomCurve::constant(stops.first().map(|(_, v)| *v).unwrap_or(0.0))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SpotMapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.camera.default_zoom, 14.0);
        assert_eq!(config.markers.min_scale, 0.8);
        assert_eq!(config.markers.max_scale, 1.8);
        assert_eq!(config.extrusion.min_zoom, 15.0);
    }

    #[test]
    fn test_profiles_resolve_to_valid_configs() {
        for profile in [SpotMapProfile::Standard, SpotMapProfile::Compact] {
            assert!(profile.resolve().validate().is_ok());
        }
        let custom = SpotMapConfig {
            camera: CameraConfig {
                default_zoom: 12.0,
                ..CameraConfig::default()
            },
            ..SpotMapConfig::default()
        };
        assert_eq!(
            SpotMapProfile::Custom(custom.clone()).resolve(),
            custom
        );
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = SpotMapConfig::from_json_str(
            r#"{ "camera": { "default_zoom": 13.0 }, "styles": { "start_at_night": true } }"#,
        )
        .unwrap();
        assert_eq!(config.camera.default_zoom, 13.0);
        assert_eq!(config.camera.tilted_pitch, 60.0);
        assert!(config.styles.start_at_night);
        assert_eq!(config.styles.day, constants::DAY_STYLE);
    }

    #[test]
    fn test_json_curves_are_validated() {
        let err = SpotMapConfig::from_json_str(r#"{ "heatmap": { "radius": [[0, 2]] } }"#);
        assert!(matches!(err, Err(MapError::Serialization(_))));
    }

    #[test]
    fn test_validation_rejects_inverted_marker_bounds() {
        let mut config = SpotMapConfig::default();
        config.markers.min_scale = 2.0;
        assert!(matches!(config.validate(), Err(MapError::Config(_))));
    }

    #[test]
    fn test_validation_rejects_bad_camera() {
        let mut config = SpotMapConfig::default();
        config.camera.tilted_pitch = 95.0;
        assert!(config.validate().is_err());

        let mut config = SpotMapConfig::default();
        config.camera.tilted_heading = 360.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_heatmap() {
        let err = SpotMapConfig::from_json_str(
            r#"{ "heatmap": { "radius": [[0, -40], [9, -5]] } }"#,
        );
        assert!(matches!(err, Err(MapError::Config(_))));

        let err = SpotMapConfig::from_json_str(
            r#"{ "heatmap": { "opacity": [[0, 7.5], [9, -3]] } }"#,
        );
        assert!(matches!(err, Err(MapError::Config(_))));

        let mut config = SpotMapConfig::default();
        config.heatmap.intensity = ZoomCurve::new(vec![(0.0, 1.0), (9.0, -0.5)]).unwrap();
        assert!(config.validate().is_err());

        let config = SpotMapConfig::from_json_str(
            r#"{ "heatmap": { "radius": [[0, 0], [9, 30]], "opacity": [[0, 0], [9, 1]] } }"#,
        )
        .unwrap();
        assert_eq!(config.heatmap.radius.evaluate(9.0), 30.0);
    }

    #[test]
    fn test_controls_defaults_and_validation() {
        let controls = MapControls::default();
        assert!(controls.compass && controls.pitch_enabled && controls.rotate_enabled);
        assert!(!controls.logo);
        assert!(controls.user_location && controls.heading_indicator);

        let err = SpotMapConfig::from_json_str(
            r#"{ "controls": { "user_location": false, "heading_indicator": true } }"#,
        );
        assert!(matches!(err, Err(MapError::Config(_))));
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let err = SpotMapConfig::from_file("/definitely/not/here.json");
        assert!(matches!(err, Err(MapError::Io(_))));
    }
}
