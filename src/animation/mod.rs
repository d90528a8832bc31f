pub mod interpolation;

pub use interpolation::{EasingFunction, Interpolation, ZoomCurve};
