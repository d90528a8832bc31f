//! The read-only collection of photo spots shown on the map.

use crate::{
    core::geo::Coordinate,
    data::geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry},
    MapError, Result,
};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Where a spot's photo comes from. Opaque to the core; the host's asset
/// store resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRef {
    /// Asset bundled with the host application
    Asset(String),
    /// Remote image
    Url(String),
}

/// A geo-located photo point of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoSpot {
    pub id: String,
    pub title: String,
    pub coordinate: Coordinate,
    /// Heatmap weight, finite and non-negative
    pub intensity_weight: f64,
    pub image: ImageRef,
}

impl PhotoSpot {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        coordinate: Coordinate,
        intensity_weight: f64,
        image: ImageRef,
    ) -> Result<Self> {
        let spot = Self {
            id: id.into(),
            title: title.into(),
            coordinate,
            intensity_weight,
            image,
        };
        spot.validate()?;
        Ok(spot)
    }

    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(MapError::Catalog("spot id must not be empty".to_string()));
        }
        if !self.intensity_weight.is_finite() || self.intensity_weight < 0.0 {
            return Err(MapError::Catalog(format!(
                "spot {} has invalid intensity weight {}",
                self.id, self.intensity_weight
            )));
        }
        Ok(())
    }

    fn from_feature(feature: &GeoJsonFeature) -> Result<Self> {
        let id = feature
            .resolved_id()
            .ok_or_else(|| MapError::Catalog("GeoJSON feature without id".to_string()))?;

        let coordinate = match &feature.geometry {
            Some(GeoJsonGeometry::Point { coordinates }) => match coordinates.as_slice() {
                [lng, lat, ..] => Coordinate::new(*lng, *lat)?,
                _ => {
                    return Err(MapError::Catalog(format!(
                        "feature {} has a position with fewer than two values",
                        id
                    )))
                }
            },
            _ => {
                return Err(MapError::Catalog(format!(
                    "feature {} is not a Point",
                    id
                )))
            }
        };

        let title = feature.string_property("title").unwrap_or(&id).to_string();
        let weight = match feature.property("weight") {
            Some(value) => value.as_f64().ok_or_else(|| {
                MapError::Catalog(format!("feature {} has a non-numeric weight", id))
            })?,
            None => 1.0,
        };
        let image = if let Some(url) = feature.string_property("image_url") {
            ImageRef::Url(url.to_string())
        } else if let Some(asset) = feature.string_property("image") {
            ImageRef::Asset(asset.to_string())
        } else {
            return Err(MapError::Catalog(format!("feature {} has no image", id)));
        };

        Self::new(id, title, coordinate, weight, image)
    }
}

/// Photo spots keyed by id, in load order. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct SpotCatalog {
    spots: Vec<PhotoSpot>,
    index: FxHashMap<String, usize>,
}

impl SpotCatalog {
    /// Builds a catalog, rejecting invalid spots and duplicate ids
    pub fn new(spots: Vec<PhotoSpot>) -> Result<Self> {
        let mut index = FxHashMap::default();
        for (position, spot) in spots.iter().enumerate() {
            spot.validate()?;
            if index.insert(spot.id.clone(), position).is_some() {
                return Err(MapError::Catalog(format!("duplicate spot id {}", spot.id)));
            }
        }
        log::debug!("spot catalog loaded with {} spots", spots.len());
        Ok(Self { spots, index })
    }

    /// Loads a JSON array of [`PhotoSpot`] records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let spots: Vec<PhotoSpot> = serde_json::from_str(json)?;
        Self::new(spots)
    }

    /// Loads Point features. `title`, `weight` (default 1) and `image_url` or
    /// `image` come from the feature properties.
    pub fn from_geojson_str(json: &str) -> Result<Self> {
        let spots = GeoJson::from_str(json)?
            .into_features()
            .iter()
            .map(PhotoSpot::from_feature)
            .collect::<Result<Vec<_>>>()?;
        Self::new(spots)
    }

    /// The spots that ship with the app
    pub fn bundled() -> Result<Self> {
        Self::new(vec![
            PhotoSpot::new(
                "1",
                "Sunset by the Lake",
                Coordinate::new(-123.116226, 49.246292)?,
                1.0,
                ImageRef::Asset("sunset.jpg".to_string()),
            )?,
            PhotoSpot::new(
                "2",
                "Mountain View",
                Coordinate::new(-123.1207, 49.2827)?,
                1.0,
                ImageRef::Asset("mountain.jpg".to_string()),
            )?,
            PhotoSpot::new(
                "3",
                "City Lights",
                Coordinate::new(-123.1, 49.27)?,
                1.0,
                ImageRef::Asset("city.jpg".to_string()),
            )?,
        ])
    }

    pub fn get(&self, id: &str) -> Option<&PhotoSpot> {
        self.index.get(id).map(|&position| &self.spots[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhotoSpot> {
        self.spots.iter()
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }
}
