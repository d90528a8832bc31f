//! Default magic numbers for the photo-spot map screen.
//! Everything here can be overridden through [`crate::core::config::SpotMapConfig`].

/// Zoom the camera starts at once the user location is known.
pub const DEFAULT_ZOOM: f64 = 14.0;

/// Pitch applied in 3D perspective mode (degrees).
pub const TILTED_PITCH: f64 = 60.0;

/// Heading offset applied in 3D perspective mode (degrees).
pub const TILTED_HEADING: f64 = 20.0;

/// Duration of the camera fly-to when the center or perspective changes.
pub const CAMERA_ANIMATION_MS: u64 = 1000;

/// Marker scale is `zoom / MARKER_SCALE_DIVISOR`, clamped to the bounds below.
pub const MARKER_SCALE_DIVISOR: f64 = 10.0;
pub const MARKER_MIN_SCALE: f64 = 0.8;
pub const MARKER_MAX_SCALE: f64 = 1.8;

/// Round photo marker diameter in logical pixels (before scaling).
pub const MARKER_ICON_SIZE: f64 = 55.0;

/// White ring drawn around the photo marker.
pub const MARKER_BORDER_WIDTH: f64 = 2.5;

/// Building extrusion only shows at or above this zoom.
pub const EXTRUSION_MIN_ZOOM: f64 = 15.0;

pub const EXTRUSION_COLOR: &str = "#aaa";
pub const EXTRUSION_OPACITY: f64 = 0.8;
pub const EXTRUSION_SOURCE_URL: &str = "mapbox://mapbox.mapbox-streets-v8";
pub const EXTRUSION_SOURCE_LAYER: &str = "building";

pub const DAY_STYLE: &str = "mapbox://styles/mapbox/streets-v12";
pub const NIGHT_STYLE: &str = "mapbox://styles/mapbox/dark-v11";

/// Popup fade in/out duration.
pub const POPUP_FADE_MS: u64 = 250;

/// Popup scale at the start of the enter transition (grows to 1.0).
pub const POPUP_START_SCALE: f64 = 0.9;

/// Heatmap breakpoints as `(zoom, value)` pairs.
pub const HEATMAP_RADIUS_STOPS: [(f64, f64); 3] = [(0.0, 2.0), (9.0, 20.0), (15.0, 40.0)];
pub const HEATMAP_INTENSITY_STOPS: [(f64, f64); 2] = [(0.0, 1.0), (9.0, 3.0)];
pub const HEATMAP_OPACITY_STOPS: [(f64, f64); 2] = [(7.0, 1.0), (15.0, 0.4)];
