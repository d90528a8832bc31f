use crate::core::config::StyleConfig;
use serde::{Deserialize, Serialize};

/// The two independent display toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewMode {
    pub is_3d: bool,
    pub is_night: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasemapStyle {
    Day,
    Night,
}

impl BasemapStyle {
    /// Style identifier the engine loads for this theme
    pub fn style_id<'a>(&self, styles: &'a StyleConfig) -> &'a str {
        match self {
            BasemapStyle::Day => &styles.day,
            BasemapStyle::Night => &styles.night,
        }
    }
}

/// Owns the toggles. Only explicit user actions change them; camera movement
/// never does.
#[derive(Debug, Clone, Default)]
pub struct ViewModeState {
    mode: ViewMode,
}

impl ViewModeState {
    pub fn new(mode: ViewMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Flips 2D/3D. Callers keep the camera perspective in step.
    pub fn toggle_3d(&mut self) -> ViewMode {
        self.mode.is_3d = !self.mode.is_3d;
        self.mode
    }

    pub fn toggle_day_night(&mut self) -> ViewMode {
        self.mode.is_night = !self.mode.is_night;
        self.mode
    }

    pub fn basemap_style(&self) -> BasemapStyle {
        if self.mode.is_night {
            BasemapStyle::Night
        } else {
            BasemapStyle::Day
        }
    }
}
