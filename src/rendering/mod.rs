pub mod descriptor;
pub mod engine;

pub use descriptor::{MapDescriptor, MapScene};
pub use engine::{RecordingEngine, RenderingEngine};
