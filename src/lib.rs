//! # spotmap
//!
//! View-state reconciliation for a photo-spot map screen.
//!
//! The crate owns the state behind an interactive map that shows geo-located
//! photo spots as markers and a heatmap over a day/night, 2D/3D basemap. It
//! turns user location, camera zoom, selection and toggle state into a
//! render-ready [`MapDescriptor`] and routes engine events back into that
//! state. Tile fetching, GPU work and gestures belong to whichever
//! [`RenderingEngine`] the host plugs in.

pub mod animation;
pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod location;
pub mod prelude;
pub mod rendering;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    camera::{CameraParams, CameraState},
    config::{SpotMapConfig, SpotMapProfile},
    geo::Coordinate,
    map::MapOrchestrator,
    selection::{SelectionController, SelectionState, TransitionPhase, TransitionToken},
    view_mode::{ViewMode, ViewModeState},
};

pub use data::catalog::{ImageRef, PhotoSpot, SpotCatalog};

pub use input::events::{EngineEvent, EventHandled};

pub use layers::marker::MarkerVisual;

pub use location::{LocationError, LocationFailure, LocationProvider, PermissionStatus};

pub use rendering::{
    descriptor::{MapDescriptor, MapScene},
    engine::RenderingEngine,
};

pub use ui::popup::{PopupAppearance, PopupContent};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Spot not found: {0}")]
    NotFound(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),
}

/// Error type alias for convenience
pub type Error = MapError;
