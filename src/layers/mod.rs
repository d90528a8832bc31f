pub mod base;
pub mod extrusion;
pub mod heatmap;
pub mod marker;

pub use base::{LayerDescriptor, LayerKind, LayerSource, WeightedPoint};
