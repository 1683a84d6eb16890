//! The star-map panel: owns the camera, the working set of systems and the
//! decorative starfield, and runs the project/sort/paint pipeline on demand.

use std::sync::mpsc::{self, Receiver, Sender};

use glam::DVec2;
use log::debug;

use crate::camera::camera::{CameraCommand, CameraState};
use crate::config::{ConfigError, MapConfig};
use crate::data::SystemSnapshot;
use crate::input::controller::{InputController, InputEvent, InteractionMode};
use crate::nav::navigator::Navigator;
use crate::render::frame::{FrameRenderer, FrameStats, Marks};
use crate::render::surface::Surface;
use crate::scene::scene::Scene;
use crate::scene::starfield::{generate_starfield, BackgroundStar};
use crate::StarSystem;

/// Drawing surface size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }

    /// True until the host has laid the surface out.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn center(&self) -> Option<DVec2> {
        if self.is_empty() {
            None
        } else {
            Some(DVec2::new(self.width / 2.0, self.height / 2.0))
        }
    }
}

/// Single-threaded owner of all renderer state. Background loaders hand new
/// snapshots over through [`StarMap::snapshot_sender`]; only the render
/// thread ever writes the working set.
pub struct StarMap {
    config: MapConfig,
    camera: CameraState,
    input: InputController,
    navigator: Navigator,
    systems: Vec<StarSystem>,
    current_system: Option<String>,
    starfield: Vec<BackgroundStar>,
    viewport: Viewport,
    dirty: bool,
    snapshot_tx: Sender<SystemSnapshot>,
    snapshot_rx: Receiver<SystemSnapshot>,
}

impl StarMap {
    pub fn new(config: MapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: MapConfig) -> Self {
        let starfield = generate_starfield(&config.starfield);
        let (snapshot_tx, snapshot_rx) = mpsc::channel();
        StarMap {
            camera: CameraState::from_config(&config.camera),
            input: InputController::new(&config.camera),
            navigator: Navigator::new(),
            systems: Vec::new(),
            current_system: None,
            starfield,
            viewport: Viewport::default(),
            dirty: true,
            snapshot_tx,
            snapshot_rx,
            config,
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    pub fn starfield(&self) -> &[BackgroundStar] {
        &self.starfield
    }

    pub fn current_system(&self) -> Option<&str> {
        self.current_system.as_deref()
    }

    pub fn highlighted_system(&self) -> Option<&str> {
        self.navigator.highlighted()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn input_mode(&self) -> InteractionMode {
        self.input.mode()
    }

    /// Whether something changed since the last paint.
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Replaces the whole working set.
    pub fn set_systems(&mut self, systems: Vec<StarSystem>, current_system: Option<String>) {
        debug!(
            "snapshot: {} systems, current {:?}",
            systems.len(),
            current_system
        );
        self.systems = systems;
        self.current_system = current_system;
        self.invalidate();
    }

    pub fn apply_snapshot(&mut self, snapshot: SystemSnapshot) {
        self.set_systems(snapshot.systems, snapshot.current_system);
    }

    /// A handle background loaders can move to another thread and post
    /// snapshots through.
    pub fn snapshot_sender(&self) -> Sender<SystemSnapshot> {
        self.snapshot_tx.clone()
    }

    /// Drains posted snapshots and applies the newest. Returns true when one
    /// was applied.
    pub fn poll_snapshots(&mut self) -> bool {
        match self.snapshot_rx.try_iter().last() {
            Some(snapshot) => {
                self.apply_snapshot(snapshot);
                true
            }
            None => false,
        }
    }

    /// The first non-empty size seats the pan at the viewport centre, so the
    /// world origin starts in the middle. Later resizes shift the pan with
    /// the centre and keep whatever was centred in place.
    pub fn resize(&mut self, width: f64, height: f64) {
        let viewport = Viewport::new(width, height);
        if viewport == self.viewport {
            return;
        }
        debug!("resize {}x{}", width, height);
        match (self.viewport.center(), viewport.center()) {
            (Some(old), Some(new)) => self.camera.set_pan(self.camera.pan() + (new - old)),
            (None, Some(new)) => self.camera.set_pan(new),
            _ => {}
        }
        self.viewport = viewport;
        self.invalidate();
    }

    /// Feeds a raw device event through the input state machine.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let changed = self.input.handle(event, &mut self.camera);
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Applies a camera mutation directly, bypassing the input state machine.
    pub fn apply(&mut self, command: CameraCommand) -> bool {
        let changed = self.camera.apply(command);
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Restores the configured camera with the world origin at the viewport
    /// centre.
    pub fn reset_view(&mut self) {
        self.camera = CameraState::from_config(&self.config.camera);
        if let Some(center) = self.viewport.center() {
            self.camera.set_pan(center);
        }
        self.input.cancel();
        self.invalidate();
    }

    /// Pans so the named system sits at the viewport centre. Unknown names
    /// and an unlaid-out viewport leave the view unchanged.
    pub fn center_on_system(&mut self, name: &str) -> bool {
        let Some(center) = self.viewport.center() else {
            return false;
        };
        let moved =
            self.navigator
                .center_on_system(&self.systems, name, &mut self.camera, center);
        if moved {
            self.invalidate();
        }
        moved
    }

    pub fn highlight_system(&mut self, name: Option<&str>) -> bool {
        let changed = self.navigator.highlight_system(name);
        if changed {
            self.invalidate();
        }
        changed
    }

    fn marks(&self) -> Marks<'_> {
        Marks {
            current: self.current_system.as_deref(),
            highlighted: self.navigator.highlighted(),
        }
    }

    /// Front-most system whose dot covers `screen_point`.
    pub fn system_at(&self, screen_point: DVec2) -> Option<&StarSystem> {
        if self.viewport.is_empty() {
            return None;
        }
        let mut scene = Scene::build(&self.systems, &[], &self.camera);
        scene.sort_by_depth();
        let renderer = FrameRenderer::new(&self.config.render);
        let marks = self.marks();
        scene
            .systems
            .iter()
            .rev()
            .find(|drawable| {
                let radius = renderer.style_for(drawable.system, &marks).radius;
                let screen = self.camera.to_screen(drawable.position());
                screen.distance(screen_point) <= radius
            })
            .map(|drawable| drawable.system)
    }

    /// Paints one frame. Returns `None` without drawing while the viewport
    /// has no area.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<FrameStats> {
        if self.viewport.is_empty() {
            return None;
        }
        let mut scene = Scene::build(&self.systems, &self.starfield, &self.camera);
        scene.sort_by_depth();
        let marks = self.marks();
        let stats =
            FrameRenderer::new(&self.config.render).render(surface, &scene, &self.camera, &marks);
        self.dirty = false;
        Some(stats)
    }
}

impl Default for StarMap {
    fn default() -> Self {
        Self::from_valid_config(MapConfig::default())
    }
}
