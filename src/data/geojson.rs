use serde::{Deserialize, Serialize};

/// GeoJSON geometry. Spot catalogs only use points; anything else parses as
/// [`GeoJsonGeometry::Unsupported`] so the loader can name the bad feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    /// Position is `[lng, lat]` with an optional trailing altitude
    Point {
        coordinates: Vec<f64>,
    },
    #[serde(other)]
    Unsupported,
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GeoJsonFeature {
    /// Feature id, falling back to an `id` property. Numeric ids are stringified.
    pub fn resolved_id(&self) -> Option<String> {
        let raw = self
            .id
            .as_ref()
            .or_else(|| self.property("id"))?;
        match raw {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.as_ref().and_then(|props| props.get(key))
    }

    pub fn string_property(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(|v| v.as_str())
    }
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

impl GeoJson {
    pub fn from_str(geojson_str: &str) -> crate::Result<Self> {
        serde_json::from_str(geojson_str)
            .map_err(|e| crate::Error::Catalog(format!("Invalid GeoJSON: {}", e)))
    }

    pub fn into_features(self) -> Vec<GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features,
        }
    }
}
