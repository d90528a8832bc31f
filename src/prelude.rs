//! Prelude module for common spotmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use spotmap::prelude::*;`

pub use crate::core::{
    camera::{CameraAnimation, CameraParams, CameraState},
    config::{
        CameraConfig, ExtrusionConfig, HeatmapConfig, MapControls, MarkerConfig, PopupConfig,
        SpotMapConfig, SpotMapProfile, StyleConfig,
    },
    geo::Coordinate,
    map::{LoadState, MapOrchestrator},
    selection::{SelectionController, SelectionState, TransitionPhase, TransitionToken},
    view_mode::{BasemapStyle, ViewMode, ViewModeState},
};

pub use crate::animation::interpolation::{EasingFunction, Interpolation, ZoomCurve};

pub use crate::data::{
    catalog::{ImageRef, PhotoSpot, SpotCatalog},
    geojson::{GeoJson, GeoJsonFeature},
};

pub use crate::input::events::{EngineEvent, EventHandled};

pub use crate::layers::{
    base::{LayerDescriptor, LayerKind, LayerSource},
    extrusion::ExtrusionStyle,
    heatmap::{HeatmapStyle, WeightedPoint},
    marker::MarkerVisual,
};

pub use crate::location::{
    LocationError, LocationFailure, LocationProvider, PermissionStatus, StaticLocationProvider,
};

pub use crate::rendering::{
    descriptor::{MapDescriptor, MapScene, UserLocationMarker},
    engine::{JsonLinesEngine, RecordingEngine, RenderingEngine},
};

pub use crate::ui::popup::{PopupAppearance, PopupContent};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
