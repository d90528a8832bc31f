pub mod popup;

pub use popup::{PopupAppearance, PopupContent};
