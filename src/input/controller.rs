use glam::DVec2;
use log::debug;

use crate::camera::camera::{CameraCommand, CameraState};
use crate::config::CameraConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Raw device events as delivered by the host window. Positions are in
/// surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { button: PointerButton, position: DVec2 },
    PointerUp { button: PointerButton, position: DVec2 },
    PointerMove { position: DVec2 },
    /// Positive `delta` rolls the wheel away from the user and zooms in.
    Wheel { delta: f64, position: DVec2 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Primary drag: screen-space pan.
    Panning,
    /// Secondary drag: yaw/pitch orbit.
    Orbiting,
}

/// Turns pointer and wheel events into [`CameraCommand`]s.
///
/// Panning and orbiting are mutually exclusive; a second button pressed
/// during a drag is ignored until the first is released. The wheel zooms in
/// any mode.
#[derive(Clone, Debug)]
pub struct InputController {
    mode: InteractionMode,
    anchor: DVec2,
    orbit_sensitivity: f64,
    wheel_step: f64,
}

impl InputController {
    pub fn new(config: &CameraConfig) -> Self {
        InputController {
            mode: InteractionMode::Idle,
            anchor: DVec2::ZERO,
            orbit_sensitivity: config.orbit_sensitivity,
            wheel_step: config.wheel_zoom_step,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Drops any drag in progress, e.g. when the window loses the pointer.
    pub fn cancel(&mut self) {
        self.set_mode(InteractionMode::Idle);
    }

    /// Advances the state machine and returns the camera mutation the event
    /// maps to, if any.
    pub fn translate(&mut self, event: InputEvent) -> Option<CameraCommand> {
        match event {
            InputEvent::PointerDown { button, position } => {
                if self.mode != InteractionMode::Idle {
                    return None;
                }
                let next = match button {
                    PointerButton::Primary => InteractionMode::Panning,
                    PointerButton::Secondary => InteractionMode::Orbiting,
                    PointerButton::Middle => return None,
                };
                self.anchor = position;
                self.set_mode(next);
                None
            }
            InputEvent::PointerUp { button, .. } => {
                let releases = matches!(
                    (self.mode, button),
                    (InteractionMode::Panning, PointerButton::Primary)
                        | (InteractionMode::Orbiting, PointerButton::Secondary)
                );
                if releases {
                    self.set_mode(InteractionMode::Idle);
                }
                None
            }
            InputEvent::PointerMove { position } => {
                let delta = position - self.anchor;
                match self.mode {
                    InteractionMode::Idle => None,
                    InteractionMode::Panning => {
                        self.anchor = position;
                        Some(CameraCommand::Pan(delta))
                    }
                    InteractionMode::Orbiting => {
                        self.anchor = position;
                        Some(CameraCommand::Orbit {
                            d_yaw: delta.x * self.orbit_sensitivity,
                            d_pitch: delta.y * self.orbit_sensitivity,
                        })
                    }
                }
            }
            InputEvent::Wheel { delta, position } => {
                let factor = if delta > 0.0 {
                    self.wheel_step
                } else if delta < 0.0 {
                    1.0 / self.wheel_step
                } else {
                    return None;
                };
                Some(CameraCommand::Zoom {
                    at: position,
                    factor,
                })
            }
        }
    }

    /// Applies `event` to `camera`. Returns true when the camera changed and
    /// the view needs repainting.
    pub fn handle(&mut self, event: InputEvent, camera: &mut CameraState) -> bool {
        self.translate(event)
            .is_some_and(|command| camera.apply(command))
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        if self.mode != mode {
            debug!("input mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::camera::{MAX_PITCH, MAX_ZOOM, MIN_ZOOM};
    use assert_approx_eq::assert_approx_eq;

    fn down(button: PointerButton, x: f64, y: f64) -> InputEvent {
        InputEvent::PointerDown {
            button,
            position: DVec2::new(x, y),
        }
    }

    fn up(button: PointerButton, x: f64, y: f64) -> InputEvent {
        InputEvent::PointerUp {
            button,
            position: DVec2::new(x, y),
        }
    }

    fn moved(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove {
            position: DVec2::new(x, y),
        }
    }

    fn wheel(delta: f64, x: f64, y: f64) -> InputEvent {
        InputEvent::Wheel {
            delta,
            position: DVec2::new(x, y),
        }
    }

    fn setup() -> (InputController, CameraState) {
        let config = CameraConfig::default();
        (
            InputController::new(&config),
            CameraState::new(0.0, 0.0, 1.0, DVec2::ZERO),
        )
    }

    #[test]
    fn primary_drag_pans_in_screen_space() {
        let (mut input, mut camera) = setup();
        camera.set_zoom(4.0);
        input.handle(down(PointerButton::Primary, 100.0, 100.0), &mut camera);
        assert_eq!(input.mode(), InteractionMode::Panning);
        assert!(input.handle(moved(110.0, 95.0), &mut camera));
        assert!(input.handle(moved(130.0, 95.0), &mut camera));
        assert_eq!(camera.pan(), DVec2::new(30.0, -5.0));
        input.handle(up(PointerButton::Primary, 130.0, 95.0), &mut camera);
        assert_eq!(input.mode(), InteractionMode::Idle);
        assert!(!input.handle(moved(500.0, 500.0), &mut camera));
        assert_eq!(camera.pan(), DVec2::new(30.0, -5.0));
    }

    #[test]
    fn secondary_drag_orbits() {
        let (mut input, mut camera) = setup();
        input.handle(down(PointerButton::Secondary, 0.0, 0.0), &mut camera);
        assert_eq!(input.mode(), InteractionMode::Orbiting);
        input.handle(moved(20.0, -10.0), &mut camera);
        assert_approx_eq!(camera.yaw(), 0.2);
        assert_approx_eq!(camera.pitch(), -0.1);
        assert_eq!(camera.pan(), DVec2::ZERO);
        input.handle(up(PointerButton::Secondary, 20.0, -10.0), &mut camera);
        assert_eq!(input.mode(), InteractionMode::Idle);
    }

    #[test]
    fn orbit_keeps_pitch_clamped() {
        let (mut input, mut camera) = setup();
        input.handle(down(PointerButton::Secondary, 0.0, 0.0), &mut camera);
        let mut y = 0.0;
        for _ in 0..100 {
            y += 37.0;
            input.handle(moved(0.0, y), &mut camera);
            assert!(camera.pitch().abs() <= MAX_PITCH);
        }
        assert_eq!(camera.pitch(), MAX_PITCH);
    }

    #[test]
    fn modes_are_exclusive() {
        let (mut input, mut camera) = setup();
        input.handle(down(PointerButton::Primary, 0.0, 0.0), &mut camera);
        input.handle(down(PointerButton::Secondary, 0.0, 0.0), &mut camera);
        assert_eq!(input.mode(), InteractionMode::Panning);
        input.handle(up(PointerButton::Secondary, 0.0, 0.0), &mut camera);
        assert_eq!(input.mode(), InteractionMode::Panning);
        input.handle(moved(5.0, 5.0), &mut camera);
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.pan(), DVec2::new(5.0, 5.0));
    }

    #[test]
    fn middle_button_is_ignored() {
        let (mut input, mut camera) = setup();
        input.handle(down(PointerButton::Middle, 0.0, 0.0), &mut camera);
        assert_eq!(input.mode(), InteractionMode::Idle);
    }

    #[test]
    fn wheel_zooms_geometrically_in_any_mode() {
        let (mut input, mut camera) = setup();
        input.handle(down(PointerButton::Primary, 0.0, 0.0), &mut camera);
        input.handle(wheel(120.0, 0.0, 0.0), &mut camera);
        input.handle(wheel(120.0, 0.0, 0.0), &mut camera);
        assert_approx_eq!(camera.zoom(), 1.25 * 1.25);
        assert_eq!(input.mode(), InteractionMode::Panning);
        input.handle(wheel(-120.0, 0.0, 0.0), &mut camera);
        assert_approx_eq!(camera.zoom(), 1.25);
        assert!(!input.handle(wheel(0.0, 0.0, 0.0), &mut camera));
    }

    #[test]
    fn wheel_never_escapes_zoom_bounds() {
        let (mut input, mut camera) = setup();
        for i in 0..300 {
            let delta = if (i / 60) % 2 == 0 { 1.0 } else { -1.0 };
            input.handle(wheel(delta * 120.0, 400.0, 300.0), &mut camera);
            assert!(camera.zoom() >= MIN_ZOOM && camera.zoom() <= MAX_ZOOM);
        }
    }

    #[test]
    fn cancel_returns_to_idle() {
        let (mut input, mut camera) = setup();
        input.handle(down(PointerButton::Secondary, 0.0, 0.0), &mut camera);
        input.cancel();
        assert_eq!(input.mode(), InteractionMode::Idle);
        assert!(!input.handle(moved(40.0, 40.0), &mut camera));
    }
}
