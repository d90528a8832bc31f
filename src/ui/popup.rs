use crate::{
    animation::interpolation::{EasingFunction, Interpolation},
    core::{
        config::PopupConfig,
        selection::{TransitionPhase, TransitionToken},
    },
    data::catalog::PhotoSpot,
};
use serde::{Deserialize, Serialize};

/// Popup card for the selected spot. Present whenever a spot is selected,
/// including while it fades in or out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupContent {
    pub spot: PhotoSpot,
    pub phase: TransitionPhase,
    /// Hand this back with the fade's completion signal
    pub token: TransitionToken,
    /// Opacity the running fade heads toward (1 entering, 0 exiting)
    pub target_opacity: f64,
    pub fade_duration_ms: u64,
    pub easing: EasingFunction,
}

impl PopupContent {
    pub fn new(
        spot: PhotoSpot,
        phase: TransitionPhase,
        token: TransitionToken,
        config: &PopupConfig,
    ) -> Self {
        let target_opacity = match phase {
            TransitionPhase::Entering | TransitionPhase::Visible => 1.0,
            TransitionPhase::Exiting | TransitionPhase::Hidden => 0.0,
        };
        Self {
            spot,
            phase,
            token,
            target_opacity,
            fade_duration_ms: config.fade_duration_ms,
            easing: config.easing,
        }
    }

    /// Whether the host still needs to report a completion for this popup
    pub fn is_animating(&self) -> bool {
        matches!(
            self.phase,
            TransitionPhase::Entering | TransitionPhase::Exiting
        )
    }
}

/// Fade state of the popup at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopupAppearance {
    pub opacity: f64,
    pub scale: f64,
}

impl PopupAppearance {
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        scale: 0.0,
    };

    /// Opacity eases 0 -> 1 while entering and back while exiting; scale
    /// follows opacity from `start_scale` up to 1.
    pub fn at(phase: TransitionPhase, progress: f64, config: &PopupConfig) -> Self {
        let opacity = match phase {
            TransitionPhase::Hidden => return Self::HIDDEN,
            TransitionPhase::Visible => 1.0,
            TransitionPhase::Entering => Interpolation::ease(0.0, 1.0, progress, config.easing),
            TransitionPhase::Exiting => Interpolation::ease(1.0, 0.0, progress, config.easing),
        };
        Self {
            opacity,
            scale: Interpolation::linear(config.start_scale, 1.0, opacity),
        }
    }
}
