use crate::{
    core::{
        camera::{CameraParams, CameraState},
        config::{SpotMapConfig, SpotMapProfile},
        geo::Coordinate,
        selection::{SelectionController, SelectionState, TransitionPhase, TransitionToken},
        view_mode::{ViewMode, ViewModeState},
    },
    data::catalog::SpotCatalog,
    input::events::{EngineEvent, EventHandled},
    layers::{extrusion::ExtrusionStyle, heatmap::HeatmapStyle, marker::MarkerVisual},
    location::{LocationFailure, LocationProvider, PermissionStatus},
    rendering::{
        descriptor::{MapDescriptor, MapScene, UserLocationMarker},
        engine::RenderingEngine,
    },
    ui::popup::{PopupAppearance, PopupContent},
    MapError, Result,
};
use instant::Instant;

/// Where startup stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    AwaitingLocation,
    LocationFailed(LocationFailure),
    Ready,
}

/// Single composition point of the map screen.
///
/// Owns the camera, the view-mode toggles and the selection, turns them into
/// a [`MapDescriptor`] on demand and routes engine events back into them.
/// Everything runs on the caller's event thread; the only await is the
/// startup location fetch in [`MapOrchestrator::initialize`].
pub struct MapOrchestrator {
    config: SpotMapConfig,
    catalog: SpotCatalog,
    camera: CameraState,
    view_mode: ViewModeState,
    selection: SelectionController,
    load_state: LoadState,
    user_location: Option<Coordinate>,
}

impl MapOrchestrator {
    pub fn new(catalog: SpotCatalog, config: SpotMapConfig) -> Result<Self> {
        config.validate()?;

        let camera = CameraState::new(
            config.camera.clone(),
            config.markers.clone(),
            config.heatmap.clone(),
        );
        let view_mode = ViewModeState::new(ViewMode {
            is_3d: config.camera.start_in_3d,
            is_night: config.styles.start_at_night,
        });

        Ok(Self {
            config,
            catalog,
            camera,
            view_mode,
            selection: SelectionController::new(),
            load_state: LoadState::AwaitingLocation,
            user_location: None,
        })
    }

    pub fn with_profile(catalog: SpotCatalog, profile: SpotMapProfile) -> Result<Self> {
        Self::new(catalog, profile.resolve())
    }

    /// Fetches the user location once and places the camera there.
    ///
    /// On failure the orchestrator stays on the placeholder and reports
    /// `PermissionDenied` or `LocationUnavailable`; calling this again is the
    /// host's retry. Once ready, further calls return the current camera.
    pub async fn initialize(&mut self, provider: &dyn LocationProvider) -> Result<CameraParams> {
        if let Some(params) = self.camera.params() {
            log::debug!("initialize called on a ready map; keeping camera");
            return Ok(*params);
        }

        self.load_state = LoadState::AwaitingLocation;
        match Self::resolve_location(provider).await {
            Ok(center) => {
                self.user_location = Some(center);
                let mut params = self.camera.initialize(center);
                if self.view_mode.mode().is_3d {
                    if let Some(tilted) = self.camera.set_perspective(true) {
                        params = tilted;
                    }
                }
                self.load_state = LoadState::Ready;
                Ok(params)
            }
            Err(e) => {
                let failure =
                    LocationFailure::of(&e).unwrap_or(LocationFailure::LocationUnavailable);
                log::warn!("map initialization failed: {}", e);
                self.load_state = LoadState::LocationFailed(failure);
                Err(e)
            }
        }
    }

    async fn resolve_location(provider: &dyn LocationProvider) -> Result<Coordinate> {
        if provider.request_permission().await == PermissionStatus::Denied {
            return Err(MapError::PermissionDenied);
        }
        provider
            .current_coordinate()
            .await
            .map_err(|e| MapError::LocationUnavailable(e.to_string()))
    }

    /// Composes the current state into a descriptor for the engine
    pub fn render(&self) -> MapDescriptor {
        let camera = match (self.load_state, self.camera.params()) {
            (LoadState::Ready, Some(params)) => *params,
            (LoadState::LocationFailed(reason), _) => {
                return MapDescriptor::LocationFailed { reason }
            }
            _ => return MapDescriptor::AwaitingLocation,
        };

        let mode = self.view_mode.mode();
        let zoom = camera.zoom;

        let mut layers = Vec::with_capacity(2);
        if self.config.heatmap.visible {
            layers.push(HeatmapStyle::at_zoom(&self.camera, zoom).layer(&self.catalog));
        }
        let extrusion = ExtrusionStyle::new(&self.config.extrusion);
        if extrusion.is_active(mode.is_3d, zoom) {
            layers.push(extrusion.layer());
        }

        MapDescriptor::Ready(MapScene {
            camera,
            view_mode: mode,
            basemap_style: self
                .view_mode
                .basemap_style()
                .style_id(&self.config.styles)
                .to_string(),
            layers,
            markers: MarkerVisual::for_catalog(
                &self.catalog,
                &self.camera,
                &self.config.markers,
                zoom,
            ),
            popup: self.popup_content(),
            user_location: self.user_location_marker(),
            controls: self.config.controls.clone(),
        })
    }

    fn user_location_marker(&self) -> Option<UserLocationMarker> {
        let controls = &self.config.controls;
        if !controls.user_location {
            return None;
        }
        self.user_location.map(|coordinate| UserLocationMarker {
            coordinate,
            heading_indicator: controls.heading_indicator,
        })
    }

    fn popup_content(&self) -> Option<PopupContent> {
        let state = self.selection.state();
        let spot_id = state.selected_spot_id()?;
        match self.catalog.get(spot_id) {
            Some(spot) => Some(PopupContent::new(
                spot.clone(),
                state.phase(),
                state.token(),
                &self.config.popup,
            )),
            None => {
                // select() validated the id against an immutable catalog
                log::error!("selection refers to unknown spot {}", spot_id);
                debug_assert!(false, "selected spot {} missing from catalog", spot_id);
                None
            }
        }
    }

    /// Renders and hands the descriptor to `engine`
    pub fn present(&self, engine: &mut dyn RenderingEngine) -> Result<()> {
        engine.apply(&self.render())
    }

    /// Routes an engine callback to the component that owns it.
    ///
    /// Duplicate events are harmless: a repeated background press lands on
    /// the no-op path of `deselect`.
    pub fn on_engine_event(&mut self, event: EngineEvent) -> Result<EventHandled> {
        if event.is_selection_event() {
            log::debug!("engine event {:?}", event);
        }
        match event {
            EngineEvent::RegionSettled { observed_zoom } => {
                if self.camera.on_region_settled(observed_zoom) {
                    Ok(EventHandled::Handled)
                } else {
                    Ok(EventHandled::NotHandled)
                }
            }
            EngineEvent::MarkerPressed { spot_id } => {
                self.selection.select(&spot_id, &self.catalog)?;
                Ok(EventHandled::Handled)
            }
            EngineEvent::BackgroundPressed => {
                let before = self.selection.state().phase();
                let after = self.selection.deselect().phase();
                Ok(if before == after {
                    EventHandled::NotHandled
                } else {
                    EventHandled::Handled
                })
            }
        }
    }

    /// Flips 2D/3D and re-derives pitch and heading from the new mode
    pub fn toggle_3d(&mut self) -> ViewMode {
        let mode = self.view_mode.toggle_3d();
        self.camera.set_perspective(mode.is_3d);
        log::debug!("3d mode {}", if mode.is_3d { "on" } else { "off" });
        mode
    }

    pub fn toggle_day_night(&mut self) -> ViewMode {
        self.view_mode.toggle_day_night()
    }

    /// The popup's close button
    pub fn close_popup(&mut self) -> SelectionState {
        self.selection.deselect()
    }

    /// Completion signal from the host's popup animation. Stale tokens are
    /// ignored.
    pub fn on_transition_complete(&mut self, token: TransitionToken) -> SelectionState {
        match self.selection.state().phase() {
            TransitionPhase::Entering => self.selection.complete_enter(token),
            TransitionPhase::Exiting => self.selection.complete_exit(token),
            TransitionPhase::Hidden | TransitionPhase::Visible => self.selection.state().clone(),
        }
    }

    /// Popup fade state at `now`, for hosts that drive the animation frame by
    /// frame
    pub fn popup_appearance(&self, now: Instant) -> PopupAppearance {
        self.selection.appearance(now, &self.config.popup)
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode.mode()
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn catalog(&self) -> &SpotCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SpotMapConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::config::MapControls,
        layers::{extrusion::EXTRUSION_LAYER_ID, heatmap::HEATMAP_LAYER_ID},
        location::StaticLocationProvider,
        rendering::engine::RecordingEngine,
    };
    use futures::executor::block_on;

    fn ready_map() -> MapOrchestrator {
        let mut map =
            MapOrchestrator::new(SpotCatalog::bundled().unwrap(), SpotMapConfig::default())
                .unwrap();
        let provider = StaticLocationProvider::at(Coordinate::new(-123.12, 49.28).unwrap());
        block_on(map.initialize(&provider)).unwrap();
        map
    }

    #[test]
    fn test_placeholder_before_location() {
        let map =
            MapOrchestrator::new(SpotCatalog::bundled().unwrap(), SpotMapConfig::default())
                .unwrap();
        assert_eq!(map.load_state(), LoadState::AwaitingLocation);
        assert_eq!(map.render(), MapDescriptor::AwaitingLocation);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SpotMapConfig::default();
        config.markers.zoom_divisor = 0.0;
        assert!(MapOrchestrator::new(SpotCatalog::default(), config).is_err());
    }

    #[test]
    fn test_ready_scene_layers() {
        let map = ready_map();
        let scene = map.render().scene().cloned().unwrap();
        assert_eq!(scene.camera.zoom, 14.0);
        assert_eq!(scene.markers.len(), 3);
        assert!(scene.layer(HEATMAP_LAYER_ID).is_some());
        assert!(!scene.extrusion_enabled());
        assert!(scene.popup.is_none());
        assert_eq!(scene.basemap_style, map.config().styles.day);

        let user = scene.user_location.unwrap();
        assert_eq!(user.coordinate, Coordinate::new(-123.12, 49.28).unwrap());
        assert!(user.heading_indicator);
        assert_eq!(scene.controls, MapControls::default());
        assert!(scene.controls.compass);
        assert!(!scene.controls.logo);
    }

    #[test]
    fn test_user_location_marker_can_be_hidden() {
        let mut config = SpotMapConfig::default();
        config.controls.user_location = false;
        config.controls.heading_indicator = false;
        let mut map = MapOrchestrator::new(SpotCatalog::bundled().unwrap(), config).unwrap();
        let provider = StaticLocationProvider::at(Coordinate::new(-123.12, 49.28).unwrap());
        block_on(map.initialize(&provider)).unwrap();

        let scene = map.render().scene().cloned().unwrap();
        assert!(scene.user_location.is_none());
        assert!(!scene.controls.user_location);
    }

    #[test]
    fn test_toggle_3d_before_location_tilts_initial_camera() {
        let mut map =
            MapOrchestrator::new(SpotCatalog::bundled().unwrap(), SpotMapConfig::default())
                .unwrap();
        let mode = map.toggle_3d();
        assert!(mode.is_3d);
        assert!(map.camera().params().is_none());
        assert_eq!(map.render(), MapDescriptor::AwaitingLocation);

        let provider = StaticLocationProvider::at(Coordinate::new(-123.12, 49.28).unwrap());
        let params = block_on(map.initialize(&provider)).unwrap();
        assert_eq!((params.pitch, params.heading), (60.0, 20.0));

        let scene = map.render().scene().cloned().unwrap();
        assert_eq!(scene.camera.pitch, 60.0);
        assert!(scene.view_mode.is_3d);
    }

    #[test]
    fn test_extrusion_needs_3d_and_zoom() {
        let mut map = ready_map();
        map.on_engine_event(EngineEvent::RegionSettled { observed_zoom: 16.0 })
            .unwrap();
        assert!(!map.render().scene().unwrap().extrusion_enabled());

        map.toggle_3d();
        let scene = map.render().scene().cloned().unwrap();
        assert!(scene.extrusion_enabled());
        assert!(scene.layer(EXTRUSION_LAYER_ID).is_some());
        assert_eq!(scene.camera.pitch, 60.0);

        map.on_engine_event(EngineEvent::RegionSettled { observed_zoom: 12.0 })
            .unwrap();
        assert!(!map.render().scene().unwrap().extrusion_enabled());
    }

    #[test]
    fn test_toggle_3d_round_trip_restores_camera() {
        let mut map = ready_map();
        let before = *map.camera().params().unwrap();
        let original_mode = map.view_mode();

        map.toggle_3d();
        map.toggle_3d();

        let after = *map.camera().params().unwrap();
        assert_eq!(map.view_mode(), original_mode);
        assert_eq!((after.pitch, after.heading), (before.pitch, before.heading));
    }

    #[test]
    fn test_start_in_3d_tilts_initial_camera() {
        let mut config = SpotMapConfig::default();
        config.camera.start_in_3d = true;
        let mut map = MapOrchestrator::new(SpotCatalog::bundled().unwrap(), config).unwrap();
        let provider = StaticLocationProvider::at(Coordinate::new(-123.12, 49.28).unwrap());
        let params = block_on(map.initialize(&provider)).unwrap();
        assert_eq!(params.pitch, 60.0);
        assert_eq!(params.heading, 20.0);
    }

    #[test]
    fn test_day_night_switches_style_only() {
        let mut map = ready_map();
        let before = map.render().scene().cloned().unwrap();
        map.toggle_day_night();
        let after = map.render().scene().cloned().unwrap();
        assert_eq!(after.basemap_style, map.config().styles.night);
        assert_eq!(after.camera, before.camera);
        assert_eq!(after.layers, before.layers);
    }

    #[test]
    fn test_duplicate_background_presses() {
        let mut map = ready_map();
        assert_eq!(
            map.on_engine_event(EngineEvent::BackgroundPressed).unwrap(),
            EventHandled::NotHandled
        );

        map.on_engine_event(EngineEvent::MarkerPressed {
            spot_id: "1".to_string(),
        })
        .unwrap();
        assert_eq!(
            map.on_engine_event(EngineEvent::BackgroundPressed).unwrap(),
            EventHandled::Handled
        );
        assert_eq!(
            map.on_engine_event(EngineEvent::BackgroundPressed).unwrap(),
            EventHandled::NotHandled
        );
        assert_eq!(map.selection().phase(), TransitionPhase::Exiting);
    }

    #[test]
    fn test_transition_completion_routing() {
        let mut map = ready_map();
        map.on_engine_event(EngineEvent::MarkerPressed {
            spot_id: "2".to_string(),
        })
        .unwrap();
        let token = map.render().scene().unwrap().popup.as_ref().unwrap().token;

        assert_eq!(
            map.on_transition_complete(token).phase(),
            TransitionPhase::Visible
        );

        let exiting = map.close_popup();
        assert_eq!(exiting.phase(), TransitionPhase::Exiting);
        let popup = map.render().scene().unwrap().popup.clone().unwrap();
        assert_eq!(popup.target_opacity, 0.0);

        let hidden = map.on_transition_complete(exiting.token());
        assert_eq!(hidden.phase(), TransitionPhase::Hidden);
        assert!(map.render().scene().unwrap().popup.is_none());
    }

    #[test]
    fn test_popup_appearance_hidden_without_selection() {
        let map = ready_map();
        assert_eq!(map.popup_appearance(Instant::now()), PopupAppearance::HIDDEN);
    }

    #[test]
    fn test_present_hands_descriptor_to_engine() {
        let map = ready_map();
        let mut engine = RecordingEngine::new();
        map.present(&mut engine).unwrap();
        assert_eq!(engine.frames().len(), 1);
        assert!(!engine.last_frame().unwrap().is_placeholder());
    }
}
