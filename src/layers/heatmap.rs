use crate::{
    core::camera::CameraState,
    data::catalog::SpotCatalog,
    layers::base::{LayerDescriptor, LayerKind, LayerSource},
};
use serde::{Deserialize, Serialize};

pub use crate::layers::base::WeightedPoint;

pub const HEATMAP_LAYER_ID: &str = "spot-heatmap";

/// Heatmap style parameters resolved for one zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapStyle {
    /// Radius of influence per point, in pixels
    pub radius: f64,
    /// Global multiplier on point weights
    pub intensity: f64,
    pub opacity: f64,
}

impl HeatmapStyle {
    pub fn at_zoom(camera: &CameraState, zoom: f64) -> Self {
        Self {
            radius: camera.derive_heatmap_radius(zoom),
            intensity: camera.derive_heatmap_intensity(zoom),
            opacity: camera.derive_heatmap_opacity(zoom),
        }
    }

    /// Engine paint properties. Per-point weight is read from each feature.
    pub fn paint(&self) -> serde_json::Value {
        serde_json::json!({
            "heatmap-radius": self.radius,
            "heatmap-intensity": self.intensity,
            "heatmap-opacity": self.opacity,
            "heatmap-weight": ["get", "weight"],
        })
    }

    /// Builds the heatmap layer over every spot in the catalog
    pub fn layer(&self, catalog: &SpotCatalog) -> LayerDescriptor {
        let points = catalog
            .iter()
            .map(|spot| WeightedPoint {
                coordinate: spot.coordinate,
                weight: spot.intensity_weight,
            })
            .collect();

        LayerDescriptor {
            id: HEATMAP_LAYER_ID.to_string(),
            kind: LayerKind::Heatmap,
            source: LayerSource::Points { points },
            min_zoom: None,
            paint: self.paint(),
        }
    }
}
