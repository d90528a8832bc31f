use crate::{
    core::{camera::CameraParams, config::MapControls, geo::Coordinate, view_mode::ViewMode},
    layers::{
        base::{LayerDescriptor, LayerKind},
        marker::MarkerVisual,
    },
    location::LocationFailure,
    ui::popup::PopupContent,
};
use serde::{Deserialize, Serialize};

/// Everything the rendering engine needs for one frame of the map screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MapDescriptor {
    /// Location not resolved yet; show the loading placeholder, no map
    AwaitingLocation,
    /// Location could not be obtained; stays until the host retries
    LocationFailed { reason: LocationFailure },
    Ready(MapScene),
}

impl MapDescriptor {
    pub fn scene(&self) -> Option<&MapScene> {
        match self {
            MapDescriptor::Ready(scene) => Some(scene),
            _ => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.scene().is_none()
    }
}

/// A fully resolved map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapScene {
    pub camera: CameraParams,
    pub view_mode: ViewMode,
    pub basemap_style: String,
    /// Bottom-to-top draw order
    pub layers: Vec<LayerDescriptor>,
    pub markers: Vec<MarkerVisual>,
    pub popup: Option<PopupContent>,
    /// Device position resolved at startup; `None` when the marker is off
    pub user_location: Option<UserLocationMarker>,
    pub controls: MapControls,
}

/// The blue dot for the user's own position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserLocationMarker {
    pub coordinate: Coordinate,
    pub heading_indicator: bool,
}

impl MapScene {
    pub fn layer(&self, id: &str) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn extrusion_enabled(&self) -> bool {
        self.layers
            .iter()
            .any(|layer| layer.kind == LayerKind::FillExtrusion)
    }
}
