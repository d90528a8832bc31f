//! Selected-spot state machine driving the popup.
//!
//! ```text
//! Hidden --select--> Entering --complete_enter--> Visible
//!    ^                  |  ^                         |
//!    |              deselect \------- select --------+
//!    |                  v                            |
//!    +--complete_exit-- Exiting <----- deselect -----+
//! ```
//!
//! `select` from any phase restarts at `Entering` for the new spot. Every
//! transition start bumps a generation counter; completion signals carry the
//! [`TransitionToken`] they were started with and are ignored once stale.

use crate::{
    core::config::PopupConfig,
    data::catalog::SpotCatalog,
    ui::popup::PopupAppearance,
    MapError, Result,
};
use instant::Instant;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    Hidden,
    Entering,
    Visible,
    Exiting,
}

/// Identifies one started transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionToken(pub u64);

/// Snapshot of the selection. `selected_spot_id` is set iff the phase is not
/// `Hidden`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    selected_spot_id: Option<String>,
    phase: TransitionPhase,
    generation: u64,
}

impl SelectionState {
    fn hidden(generation: u64) -> Self {
        Self {
            selected_spot_id: None,
            phase: TransitionPhase::Hidden,
            generation,
        }
    }

    pub fn selected_spot_id(&self) -> Option<&str> {
        self.selected_spot_id.as_deref()
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Token of the transition that produced this state
    pub fn token(&self) -> TransitionToken {
        TransitionToken(self.generation)
    }
}

#[derive(Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
    phase_started: Instant,
}

impl SelectionController {
    pub fn new() -> Self {
        Self {
            state: SelectionState::hidden(0),
            phase_started: Instant::now(),
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Starts the enter transition for `spot_id`, pre-empting whatever was
    /// running. Unknown ids are rejected and leave the state untouched.
    pub fn select(&mut self, spot_id: &str, catalog: &SpotCatalog) -> Result<SelectionState> {
        if !catalog.contains(spot_id) {
            log::warn!("select rejected: spot {} is not in the catalog", spot_id);
            return Err(MapError::NotFound(spot_id.to_string()));
        }

        let previous = self.state.phase;
        self.start_phase(TransitionPhase::Entering, Some(spot_id.to_string()));
        log::debug!(
            "selected spot {} ({:?} -> Entering, generation {})",
            spot_id,
            previous,
            self.state.generation
        );
        Ok(self.state.clone())
    }

    /// Entering -> Visible. Ignored unless `token` is the current generation.
    pub fn complete_enter(&mut self, token: TransitionToken) -> SelectionState {
        if self.is_current(token, TransitionPhase::Entering) {
            self.settle_phase(TransitionPhase::Visible);
        } else {
            log::debug!("ignoring stale enter completion {:?}", token);
        }
        self.state.clone()
    }

    /// Visible/Entering -> Exiting; no-op when already Hidden or Exiting
    pub fn deselect(&mut self) -> SelectionState {
        match self.state.phase {
            TransitionPhase::Entering | TransitionPhase::Visible => {
                let spot_id = self.state.selected_spot_id.take();
                self.start_phase(TransitionPhase::Exiting, spot_id);
            }
            TransitionPhase::Hidden | TransitionPhase::Exiting => {}
        }
        self.state.clone()
    }

    /// Exiting -> Hidden, clearing the spot. Ignored unless `token` is current.
    pub fn complete_exit(&mut self, token: TransitionToken) -> SelectionState {
        if self.is_current(token, TransitionPhase::Exiting) {
            self.state.selected_spot_id = None;
            self.settle_phase(TransitionPhase::Hidden);
        } else {
            log::debug!("ignoring stale exit completion {:?}", token);
        }
        self.state.clone()
    }

    /// Fraction of `duration_ms` elapsed since the current phase began, in [0, 1]
    pub fn transition_progress(&self, now: Instant, duration_ms: u64) -> f64 {
        if duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.phase_started);
        (elapsed.as_secs_f64() * 1000.0 / duration_ms as f64).clamp(0.0, 1.0)
    }

    /// Popup opacity and scale at `now` for the current phase
    pub fn appearance(&self, now: Instant, config: &PopupConfig) -> PopupAppearance {
        let progress = self.transition_progress(now, config.fade_duration_ms);
        PopupAppearance::at(self.state.phase, progress, config)
    }

    fn is_current(&self, token: TransitionToken, phase: TransitionPhase) -> bool {
        self.state.phase == phase && token.0 == self.state.generation
    }

    fn start_phase(&mut self, phase: TransitionPhase, spot_id: Option<String>) {
        self.state.generation += 1;
        self.state.phase = phase;
        self.state.selected_spot_id = spot_id;
        self.phase_started = Instant::now();
    }

    // Completion keeps the generation: the token is still the one that
    // started this transition.
    fn settle_phase(&mut self, phase: TransitionPhase) {
        self.state.phase = phase;
        self.phase_started = Instant::now();
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}
