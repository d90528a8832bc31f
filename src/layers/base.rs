use crate::core::geo::Coordinate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Heatmap,
    FillExtrusion,
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerKind::Heatmap => write!(f, "heatmap"),
            LayerKind::FillExtrusion => write!(f, "fill-extrusion"),
        }
    }
}

/// A point feature carrying a heatmap weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedPoint {
    pub coordinate: Coordinate,
    pub weight: f64,
}

/// Data a layer draws from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerSource {
    /// Inline weighted points
    Points { points: Vec<WeightedPoint> },
    /// A vector tile source hosted by the engine's provider
    VectorTiles { url: String, source_layer: String },
}

/// One style layer as the engine sees it: identity, data and a paint bag of
/// engine style properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub id: String,
    pub kind: LayerKind,
    pub source: LayerSource,
    pub min_zoom: Option<f64>,
    pub paint: serde_json::Value,
}

impl LayerDescriptor {
    pub fn paint_number(&self, key: &str) -> Option<f64> {
        self.paint.get(key).and_then(|v| v.as_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_kind_display() {
        assert_eq!(LayerKind::Heatmap.to_string(), "heatmap");
        assert_eq!(LayerKind::FillExtrusion.to_string(), "fill-extrusion");
    }

    #[test]
    fn test_paint_number_lookup() {
        let layer = LayerDescriptor {
            id: "test".to_string(),
            kind: LayerKind::Heatmap,
            source: LayerSource::Points { points: Vec::new() },
            min_zoom: None,
            paint: serde_json::json!({ "heatmap-radius": 12.5, "heatmap-color": "red" }),
        };
        assert_eq!(layer.paint_number("heatmap-radius"), Some(12.5));
        assert_eq!(layer.paint_number("heatmap-color"), None);
        assert_eq!(layer.paint_number("missing"), None);
    }
}
