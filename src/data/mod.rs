pub mod catalog;
pub mod geojson;

pub use catalog::{ImageRef, PhotoSpot, SpotCatalog};
