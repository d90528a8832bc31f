use crate::{
    core::{camera::CameraState, config::MarkerConfig},
    data::catalog::{PhotoSpot, SpotCatalog},
};
use serde::{Deserialize, Serialize};

/// A photo marker ready to draw. Derived on every render, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerVisual {
    pub spot: PhotoSpot,
    pub scale: f64,
    /// Normalized anchor inside the icon; (0.5, 0.5) centers it on the spot
    pub anchor: (f64, f64),
    /// Icon diameter before scaling, in logical pixels
    pub size: f64,
    pub border_width: f64,
}

impl MarkerVisual {
    /// One marker per catalog spot, in catalog order, all at the scale for `zoom`
    pub fn for_catalog(
        catalog: &SpotCatalog,
        camera: &CameraState,
        config: &MarkerConfig,
        zoom: f64,
    ) -> Vec<Self> {
        let scale = camera.derive_marker_scale(zoom);
        catalog
            .iter()
            .map(|spot| Self {
                spot: spot.clone(),
                scale,
                anchor: (0.5, 0.5),
                size: config.icon_size,
                border_width: config.border_width,
            })
            .collect()
    }

    /// Size on screen after scaling
    pub fn scaled_size(&self) -> f64 {
        self.size * self.scale
    }
}
