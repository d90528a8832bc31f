use serde::{Deserialize, Serialize};

/// Events the rendering engine reports back to the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The camera came to rest after a gesture or animation
    RegionSettled { observed_zoom: f64 },
    /// A photo marker was tapped
    MarkerPressed { spot_id: String },
    /// The map was tapped away from any marker
    BackgroundPressed,
}

impl EngineEvent {
    /// Checks if this event targets the popup selection
    pub fn is_selection_event(&self) -> bool {
        matches!(
            self,
            EngineEvent::MarkerPressed { .. } | EngineEvent::BackgroundPressed
        )
    }
}

/// Whether an event changed any state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}
