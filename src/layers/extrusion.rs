use crate::{
    core::config::ExtrusionConfig,
    layers::base::{LayerDescriptor, LayerKind, LayerSource},
};

pub const EXTRUSION_LAYER_ID: &str = "3d-buildings";

/// 3D building extrusion. Heights come from the building features themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrusionStyle<'a> {
    config: &'a ExtrusionConfig,
}

impl<'a> ExtrusionStyle<'a> {
    pub fn new(config: &'a ExtrusionConfig) -> Self {
        Self { config }
    }

    /// Extrusion shows only in 3D mode at or above the configured zoom
    pub fn is_active(&self, is_3d: bool, zoom: f64) -> bool {
        is_3d && zoom >= self.config.min_zoom
    }

    pub fn layer(&self) -> LayerDescriptor {
        LayerDescriptor {
            id: EXTRUSION_LAYER_ID.to_string(),
            kind: LayerKind::FillExtrusion,
            source: LayerSource::VectorTiles {
                url: self.config.source_url.clone(),
                source_layer: self.config.source_layer.clone(),
            },
            min_zoom: Some(self.config.min_zoom),
            paint: serde_json::json!({
                "fill-extrusion-color": self.config.color,
                "fill-extrusion-height": ["get", "height"],
                "fill-extrusion-base": ["get", "min_height"],
                "fill-extrusion-opacity": self.config.opacity,
            }),
        }
    }
}
